use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000006_gym_user::GymUser,
};

static IDX_AI_USAGE_LOG_GYM_ID: &str = "idx-ai_usage_log-gym_id";
static IDX_AI_USAGE_LOG_CREATED_AT: &str = "idx-ai_usage_log-created_at";
static FK_AI_USAGE_LOG_GYM_ID: &str = "fk-ai_usage_log-gym_id";
static FK_AI_USAGE_LOG_USER_ID: &str = "fk-ai_usage_log-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(AiUsageLog::Table)
                    .if_not_exists()
                    .col(pk_auto(AiUsageLog::Id))
                    .col(integer_null(AiUsageLog::GymId))
                    .col(integer_null(AiUsageLog::UserId))
                    .col(string_len(AiUsageLog::Feature, 32))
                    .col(string(AiUsageLog::ModelUsed))
                    .col(integer(AiUsageLog::PromptTokens))
                    .col(integer(AiUsageLog::CompletionTokens))
                    .col(integer(AiUsageLog::TotalTokens))
                    .col(big_integer(AiUsageLog::CostUsdMicros))
                    .col(big_integer(AiUsageLog::ResponseTimeMs))
                    .col(boolean(AiUsageLog::WasCached))
                    .col(boolean(AiUsageLog::WasSuccessful))
                    .col(text_null(AiUsageLog::ErrorMessage))
                    .col(text_null(AiUsageLog::PromptSummary))
                    .col(timestamp(AiUsageLog::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AI_USAGE_LOG_GYM_ID)
                    .table(AiUsageLog::Table)
                    .col(AiUsageLog::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_AI_USAGE_LOG_CREATED_AT)
                    .table(AiUsageLog::Table)
                    .col(AiUsageLog::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_AI_USAGE_LOG_GYM_ID)
                    .from_tbl(AiUsageLog::Table)
                    .from_col(AiUsageLog::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_AI_USAGE_LOG_USER_ID)
                    .from_tbl(AiUsageLog::Table)
                    .from_col(AiUsageLog::UserId)
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
                    .name(FK_AI_USAGE_LOG_USER_ID)
                    .table(AiUsageLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_AI_USAGE_LOG_GYM_ID)
                    .table(AiUsageLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AI_USAGE_LOG_CREATED_AT)
                    .table(AiUsageLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_AI_USAGE_LOG_GYM_ID)
                    .table(AiUsageLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(AiUsageLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum AiUsageLog {
    Table,
    Id,
    GymId,
    UserId,
    Feature,
    ModelUsed,
    PromptTokens,
    CompletionTokens,
    TotalTokens,
    CostUsdMicros,
    ResponseTimeMs,
    WasCached,
    WasSuccessful,
    ErrorMessage,
    PromptSummary,
    CreatedAt,
}
