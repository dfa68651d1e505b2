use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000010_member::Member,
};

static IDX_PROGRESS_LOG_MEMBER_ID: &str = "idx-progress_log-member_id";
static FK_PROGRESS_LOG_GYM_ID: &str = "fk-progress_log-gym_id";
static FK_PROGRESS_LOG_MEMBER_ID: &str = "fk-progress_log-member_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ProgressLog::Table)
                    .if_not_exists()
                    .col(pk_auto(ProgressLog::Id))
                    .col(integer(ProgressLog::GymId))
                    .col(integer(ProgressLog::MemberId))
                    .col(date(ProgressLog::Date))
                    .col(double_null(ProgressLog::WeightKg))
                    .col(double_null(ProgressLog::BodyFatPct))
                    .col(double_null(ProgressLog::MuscleMassKg))
                    .col(double_null(ProgressLog::Bmi))
                    .col(double_null(ProgressLog::ChestCm))
                    .col(double_null(ProgressLog::WaistCm))
                    .col(double_null(ProgressLog::HipsCm))
                    .col(double_null(ProgressLog::BicepsCm))
                    .col(double_null(ProgressLog::ThighsCm))
                    .col(text_null(ProgressLog::Notes))
                    .col(timestamp(ProgressLog::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PROGRESS_LOG_MEMBER_ID)
                    .table(ProgressLog::Table)
                    .col(ProgressLog::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PROGRESS_LOG_GYM_ID)
                    .from_tbl(ProgressLog::Table)
                    .from_col(ProgressLog::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PROGRESS_LOG_MEMBER_ID)
                    .from_tbl(ProgressLog::Table)
                    .from_col(ProgressLog::MemberId)
                    .to_tbl(Member::Table)
                    .to_col(Member::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PROGRESS_LOG_MEMBER_ID)
                    .table(ProgressLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PROGRESS_LOG_GYM_ID)
                    .table(ProgressLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PROGRESS_LOG_MEMBER_ID)
                    .table(ProgressLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(ProgressLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ProgressLog {
    Table,
    Id,
    GymId,
    MemberId,
    Date,
    WeightKg,
    BodyFatPct,
    MuscleMassKg,
    Bmi,
    ChestCm,
    WaistCm,
    HipsCm,
    BicepsCm,
    ThighsCm,
    Notes,
    CreatedAt,
}
