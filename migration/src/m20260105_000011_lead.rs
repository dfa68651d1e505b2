use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000006_gym_user::GymUser,
    m20260105_000010_member::Member,
};

static IDX_LEAD_GYM_ID: &str = "idx-lead-gym_id";
static IDX_LEAD_STATUS: &str = "idx-lead-status";
static FK_LEAD_GYM_ID: &str = "fk-lead-gym_id";
static FK_LEAD_ASSIGNED_TO_ID: &str = "fk-lead-assigned_to_id";
static FK_LEAD_CONVERTED_MEMBER_ID: &str = "fk-lead-converted_member_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Lead::Table)
                    .if_not_exists()
                    .col(pk_auto(Lead::Id))
                    .col(integer(Lead::GymId))
                    .col(string(Lead::Name))
                    .col(string(Lead::Phone))
                    .col(string_null(Lead::Email))
                    .col(string_len(Lead::Source, 32))
                    .col(string_null(Lead::Goal))
                    .col(string_null(Lead::BudgetRange))
                    .col(string_null(Lead::PreferredTime))
                    .col(string_len(Lead::Status, 32))
                    .col(text_null(Lead::LostReason))
                    .col(integer_null(Lead::AiScore))
                    .col(text_null(Lead::AiRecommendedAction))
                    .col(date_null(Lead::AiFollowUpDate))
                    .col(timestamp_null(Lead::LastContactedDate))
                    .col(date_null(Lead::NextFollowupDate))
                    .col(date_null(Lead::TrialDate))
                    .col(timestamp_null(Lead::ConvertedAt))
                    .col(integer_null(Lead::AssignedToId))
                    .col(text_null(Lead::Notes))
                    .col(integer_null(Lead::ConvertedMemberId))
                    .col(integer(Lead::FollowUpCount))
                    .col(boolean(Lead::IsDeleted).default(false).to_owned())
                    .col(timestamp_null(Lead::DeletedAt))
                    .col(timestamp(Lead::CreatedAt))
                    .col(timestamp(Lead::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEAD_GYM_ID)
                    .table(Lead::Table)
                    .col(Lead::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_LEAD_STATUS)
                    .table(Lead::Table)
                    .col(Lead::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEAD_GYM_ID)
                    .from_tbl(Lead::Table)
                    .from_col(Lead::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEAD_ASSIGNED_TO_ID)
                    .from_tbl(Lead::Table)
                    .from_col(Lead::AssignedToId)
                    .to_tbl(GymUser::Table)
                    .to_col(GymUser::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_LEAD_CONVERTED_MEMBER_ID)
                    .from_tbl(Lead::Table)
                    .from_col(Lead::ConvertedMemberId)
                    .to_tbl(Member::Table)
                    .to_col(Member::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LEAD_CONVERTED_MEMBER_ID)
                    .table(Lead::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LEAD_ASSIGNED_TO_ID)
                    .table(Lead::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_LEAD_GYM_ID)
                    .table(Lead::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LEAD_STATUS)
                    .table(Lead::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_LEAD_GYM_ID)
                    .table(Lead::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Lead::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Lead {
    Table,
    Id,
    GymId,
    Name,
    Phone,
    Email,
    Source,
    Goal,
    BudgetRange,
    PreferredTime,
    Status,
    LostReason,
    AiScore,
    AiRecommendedAction,
    AiFollowUpDate,
    LastContactedDate,
    NextFollowupDate,
    TrialDate,
    ConvertedAt,
    AssignedToId,
    Notes,
    ConvertedMemberId,
    FollowUpCount,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
