use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000022_gym_subscription::GymSubscription,
    m20260105_000001_subscription_plan::SubscriptionPlan,
};

static IDX_PAYMENT_GYM_ID: &str = "idx-payment-gym_id";
static FK_PAYMENT_GYM_ID: &str = "fk-payment-gym_id";
static FK_PAYMENT_SUBSCRIPTION_ID: &str = "fk-payment-subscription_id";
static FK_PAYMENT_PLAN_ID: &str = "fk-payment-plan_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Payment::Table)
                    .if_not_exists()
                    .col(pk_auto(Payment::Id))
                    .col(integer(Payment::GymId))
                    .col(integer_null(Payment::SubscriptionId))
                    .col(integer_null(Payment::PlanId))
                    .col(string_len_null(Payment::BillingCycle, 32))
                    .col(string_null(Payment::RazorpayPaymentId))
                    .col(string_null(Payment::RazorpayOrderId).unique_key().to_owned())
                    .col(string_null(Payment::RazorpaySignature))
                    .col(big_integer(Payment::Amount))
                    .col(big_integer(Payment::GstAmount))
                    .col(string(Payment::Currency))
                    .col(string_len(Payment::Status, 32))
                    .col(string_null(Payment::PaymentMethod))
                    .col(string_null(Payment::InvoiceNumber))
                    .col(timestamp_null(Payment::PaidAt))
                    .col(timestamp(Payment::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_PAYMENT_GYM_ID)
                    .table(Payment::Table)
                    .col(Payment::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_GYM_ID)
                    .from_tbl(Payment::Table)
                    .from_col(Payment::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_SUBSCRIPTION_ID)
                    .from_tbl(Payment::Table)
                    .from_col(Payment::SubscriptionId)
                    .to_tbl(GymSubscription::Table)
                    .to_col(GymSubscription::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_PAYMENT_PLAN_ID)
                    .from_tbl(Payment::Table)
                    .from_col(Payment::PlanId)
                    .to_tbl(SubscriptionPlan::Table)
                    .to_col(SubscriptionPlan::Id)
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
                    .name(FK_PAYMENT_PLAN_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAYMENT_SUBSCRIPTION_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_PAYMENT_GYM_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_PAYMENT_GYM_ID)
                    .table(Payment::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Payment::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Payment {
    Table,
    Id,
    GymId,
    SubscriptionId,
    PlanId,
    BillingCycle,
    RazorpayPaymentId,
    RazorpayOrderId,
    RazorpaySignature,
    Amount,
    GstAmount,
    Currency,
    Status,
    PaymentMethod,
    InvoiceNumber,
    PaidAt,
    CreatedAt,
}
