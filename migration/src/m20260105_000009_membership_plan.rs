use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000005_gym::Gym;

static IDX_MEMBERSHIP_PLAN_GYM_ID: &str = "idx-membership_plan-gym_id";
static FK_MEMBERSHIP_PLAN_GYM_ID: &str = "fk-membership_plan-gym_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MembershipPlan::Table)
                    .if_not_exists()
                    .col(pk_auto(MembershipPlan::Id))
                    .col(integer(MembershipPlan::GymId))
                    .col(string(MembershipPlan::Name))
                    .col(integer(MembershipPlan::DurationMonths))
                    .col(big_integer(MembershipPlan::Price))
                    .col(boolean(MembershipPlan::IncludesTrainer))
                    .col(boolean(MembershipPlan::IncludesDietPlan))
                    .col(boolean(MembershipPlan::IncludesSupplements))
                    .col(text_null(MembershipPlan::Description))
                    .col(boolean(MembershipPlan::IsActive))
                    .col(boolean(MembershipPlan::IsDeleted).default(false).to_owned())
                    .col(timestamp_null(MembershipPlan::DeletedAt))
                    .col(timestamp(MembershipPlan::CreatedAt))
                    .col(timestamp(MembershipPlan::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEMBERSHIP_PLAN_GYM_ID)
                    .table(MembershipPlan::Table)
                    .col(MembershipPlan::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_MEMBERSHIP_PLAN_GYM_ID)
                    .from_tbl(MembershipPlan::Table)
                    .from_col(MembershipPlan::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
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
                    .name(FK_MEMBERSHIP_PLAN_GYM_ID)
                    .table(MembershipPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEMBERSHIP_PLAN_GYM_ID)
                    .table(MembershipPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(MembershipPlan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum MembershipPlan {
    Table,
    Id,
    GymId,
    Name,
    DurationMonths,
    Price,
    IncludesTrainer,
    IncludesDietPlan,
    IncludesSupplements,
    Description,
    IsActive,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
