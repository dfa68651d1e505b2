use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000006_gym_user::GymUser,
    m20260105_000010_member::Member,
};

static IDX_WORKOUT_PLAN_GYM_ID: &str = "idx-workout_plan-gym_id";
static IDX_WORKOUT_PLAN_MEMBER_ID: &str = "idx-workout_plan-member_id";
static FK_WORKOUT_PLAN_GYM_ID: &str = "fk-workout_plan-gym_id";
static FK_WORKOUT_PLAN_MEMBER_ID: &str = "fk-workout_plan-member_id";
static FK_WORKOUT_PLAN_CREATED_BY_ID: &str = "fk-workout_plan-created_by_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WorkoutPlan::Table)
                    .if_not_exists()
                    .col(pk_auto(WorkoutPlan::Id))
                    .col(integer(WorkoutPlan::GymId))
                    .col(integer(WorkoutPlan::MemberId))
                    .col(integer_null(WorkoutPlan::CreatedById))
                    .col(string(WorkoutPlan::Title))
                    .col(string_len(WorkoutPlan::Goal, 32))
                    .col(integer(WorkoutPlan::DurationWeeks))
                    .col(string_len(WorkoutPlan::Difficulty, 32))
                    .col(json_binary(WorkoutPlan::PlanData))
                    .col(string(WorkoutPlan::AiModelUsed))
                    .col(integer(WorkoutPlan::AiPromptTokens))
                    .col(integer(WorkoutPlan::AiCompletionTokens))
                    .col(boolean(WorkoutPlan::IsActive))
                    .col(timestamp(WorkoutPlan::CreatedAt))
                    .col(timestamp(WorkoutPlan::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WORKOUT_PLAN_GYM_ID)
                    .table(WorkoutPlan::Table)
                    .col(WorkoutPlan::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WORKOUT_PLAN_MEMBER_ID)
                    .table(WorkoutPlan::Table)
                    .col(WorkoutPlan::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WORKOUT_PLAN_GYM_ID)
                    .from_tbl(WorkoutPlan::Table)
                    .from_col(WorkoutPlan::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WORKOUT_PLAN_MEMBER_ID)
                    .from_tbl(WorkoutPlan::Table)
                    .from_col(WorkoutPlan::MemberId)
                    .to_tbl(Member::Table)
                    .to_col(Member::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WORKOUT_PLAN_CREATED_BY_ID)
                    .from_tbl(WorkoutPlan::Table)
                    .from_col(WorkoutPlan::CreatedById)
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
                    .name(FK_WORKOUT_PLAN_CREATED_BY_ID)
                    .table(WorkoutPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WORKOUT_PLAN_MEMBER_ID)
                    .table(WorkoutPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WORKOUT_PLAN_GYM_ID)
                    .table(WorkoutPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WORKOUT_PLAN_MEMBER_ID)
                    .table(WorkoutPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WORKOUT_PLAN_GYM_ID)
                    .table(WorkoutPlan::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WorkoutPlan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WorkoutPlan {
    Table,
    Id,
    GymId,
    MemberId,
    CreatedById,
    Title,
    Goal,
    DurationWeeks,
    Difficulty,
    PlanData,
    AiModelUsed,
    AiPromptTokens,
    AiCompletionTokens,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
