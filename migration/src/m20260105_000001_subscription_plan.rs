use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(SubscriptionPlan::Table)
                    .if_not_exists()
                    .col(pk_auto(SubscriptionPlan::Id))
                    .col(string(SubscriptionPlan::Name))
                    .col(string_uniq(SubscriptionPlan::Slug))
                    .col(big_integer(SubscriptionPlan::PriceMonthly))
                    .col(big_integer(SubscriptionPlan::PriceYearly))
                    .col(integer(SubscriptionPlan::DiscountPct))
                    .col(integer(SubscriptionPlan::MaxMembers))
                    .col(integer(SubscriptionPlan::MaxAiQueriesPerMonth))
                    .col(integer(SubscriptionPlan::MaxStaffAccounts))
                    .col(integer(SubscriptionPlan::MaxLeads))
                    .col(boolean(SubscriptionPlan::HasLeadManagement))
                    .col(boolean(SubscriptionPlan::HasAiWorkout))
                    .col(boolean(SubscriptionPlan::HasAiDiet))
                    .col(boolean(SubscriptionPlan::HasAiLeadScoring))
                    .col(boolean(SubscriptionPlan::HasWhatsappIntegration))
                    .col(boolean(SubscriptionPlan::HasInstagramContent))
                    .col(boolean(SubscriptionPlan::HasAnalyticsDashboard))
                    .col(boolean(SubscriptionPlan::HasWhiteLabel))
                    .col(boolean(SubscriptionPlan::HasApiAccess))
                    .col(boolean(SubscriptionPlan::IsActive))
                    .col(integer(SubscriptionPlan::DisplayOrder))
                    .col(timestamp(SubscriptionPlan::CreatedAt))
                    .col(timestamp(SubscriptionPlan::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(SubscriptionPlan::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum SubscriptionPlan {
    Table,
    Id,
    Name,
    Slug,
    PriceMonthly,
    PriceYearly,
    DiscountPct,
    MaxMembers,
    MaxAiQueriesPerMonth,
    MaxStaffAccounts,
    MaxLeads,
    HasLeadManagement,
    HasAiWorkout,
    HasAiDiet,
    HasAiLeadScoring,
    HasWhatsappIntegration,
    HasInstagramContent,
    HasAnalyticsDashboard,
    HasWhiteLabel,
    HasApiAccess,
    IsActive,
    DisplayOrder,
    CreatedAt,
    UpdatedAt,
}
