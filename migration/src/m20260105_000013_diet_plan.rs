use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000006_gym_user::GymUser,
    m20260105_000010_member::Member,
};

static IDX_DIET_PLAN_GYM_ID: &str = "idx-diet_plan-gym_id";
static IDX_DIET_PLAN_MEMBER_ID: &str = "idx-diet_plan-member_id";
static FK_DIET_PLAN_GYM_ID: &str = "fk-diet_plan-gym_id";
static FK_DIET_PLAN_MEMBER_ID: &str = "fk-diet_plan-member_id";
static FK_DIET_PLAN_CREATED_BY_ID: &str = "fk-diet_plan-created_by_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(DietPlan::Table)
                    .if_not_exists()
                    .col(pk_auto(DietPlan::Id))
                    .col(integer(DietPlan::GymId))
                    .col(integer(DietPlan::MemberId))
                    .col(integer_null(DietPlan::CreatedById))
                    .col(string(DietPlan::Title))
                    .col(string_len(DietPlan::Goal, 32))
                    .col(string_len(DietPlan::DietaryPreference, 32))
                    .col(integer(DietPlan::DailyCalories))
                    .col(integer_null(DietPlan::DailyProteinG))
                    .col(integer_null(DietPlan::DailyCarbsG))
                    .col(integer_null(DietPlan::DailyFatG))
                    .col(json_binary(DietPlan::PlanData))
                    .col(string(DietPlan::AiModelUsed))
                    .col(integer(DietPlan::AiPromptTokens))
                    .col(integer(DietPlan::AiCompletionTokens))
                    .col(boolean(DietPlan::IsActive))
                    .col(timestamp(DietPlan::CreatedAt))
                    .col(timestamp(DietPlan::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DIET_PLAN_GYM_ID)
                    .table(DietPlan::Table)
                    .col(DietPlan::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_DIET_PLAN_MEMBER_ID)
                    .table(DietPlan::Table)
                    .col(DietPlan::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DIET_PLAN_GYM_ID)
                    .from_tbl(DietPlan::Table)
                    .from_col(DietPlan::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DIET_PLAN_MEMBER_ID)
                    .from_tbl(DietPlan::Table)
                    .from_col(DietPlan::MemberId)
                    .to_tbl(Member::Table)
                    .to_col(Member::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_DIET_PLAN_CREATED_BY_ID)
                    .from_tbl(DietPlan::Table)
                    .from_col(DietPlan::CreatedById)
                    .to_tbl(GymUser::Table)
                    .to_col(GymUser::Id)
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
                    .name(FK_DIET_PLAN_CREATED_BY_ID)
                    .table(DietPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DIET_PLAN_MEMBER_ID)
                    .table(DietPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_DIET_PLAN_GYM_ID)
                    .table(DietPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DIET_PLAN_MEMBER_ID)
                    .table(DietPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_DIET_PLAN_GYM_ID)
                    .table(DietPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(DietPlan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum DietPlan {
    Table,
    Id,
    GymId,
    MemberId,
    CreatedById,
    Title,
    Goal,
    DietaryPreference,
    DailyCalories,
    DailyProteinG,
    DailyCarbsG,
    DailyFatG,
    PlanData,
    AiModelUsed,
    AiPromptTokens,
    AiCompletionTokens,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
