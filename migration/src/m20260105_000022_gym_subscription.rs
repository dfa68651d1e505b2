use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000001_subscription_plan::SubscriptionPlan,
};

static IDX_GYM_SUBSCRIPTION_GYM_ID: &str = "idx-gym_subscription-gym_id";
static FK_GYM_SUBSCRIPTION_GYM_ID: &str = "fk-gym_subscription-gym_id";
static FK_GYM_SUBSCRIPTION_PLAN_ID: &str = "fk-gym_subscription-plan_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GymSubscription::Table)
                    .if_not_exists()
                    .col(pk_auto(GymSubscription::Id))
                    .col(integer(GymSubscription::GymId))
                    .col(integer(GymSubscription::PlanId))
                    .col(string_len(GymSubscription::BillingCycle, 32))
                    .col(big_integer(GymSubscription::Amount))
                    .col(string_null(GymSubscription::RazorpaySubscriptionId))
                    .col(string_null(GymSubscription::RazorpayCustomerId))
                    .col(string_len(GymSubscription::Status, 32))
                    .col(timestamp(GymSubscription::CurrentPeriodStart))
                    .col(timestamp(GymSubscription::CurrentPeriodEnd))
                    .col(timestamp_null(GymSubscription::CancelledAt))
                    .col(timestamp(GymSubscription::CreatedAt))
                    .col(timestamp(GymSubscription::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GYM_SUBSCRIPTION_GYM_ID)
                    .table(GymSubscription::Table)
                    .col(GymSubscription::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_SUBSCRIPTION_GYM_ID)
                    .from_tbl(GymSubscription::Table)
                    .from_col(GymSubscription::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_SUBSCRIPTION_PLAN_ID)
                    .from_tbl(GymSubscription::Table)
                    .from_col(GymSubscription::PlanId)
                    .to_tbl(SubscriptionPlan::Table)
                    .to_col(SubscriptionPlan::Id)
                    .on_delete(ForeignKeyAction::Restrict)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GYM_SUBSCRIPTION_PLAN_ID)
                    .table(GymSubscription::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GYM_SUBSCRIPTION_GYM_ID)
                    .table(GymSubscription::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GYM_SUBSCRIPTION_GYM_ID)
                    .table(GymSubscription::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GymSubscription::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum GymSubscription {
    Table,
    Id,
    GymId,
    PlanId,
    BillingCycle,
    Amount,
    RazorpaySubscriptionId,
    RazorpayCustomerId,
    Status,
    CurrentPeriodStart,
    CurrentPeriodEnd,
    CancelledAt,
    CreatedAt,
    UpdatedAt,
}
