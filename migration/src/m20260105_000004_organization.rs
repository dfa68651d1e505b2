use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000003_brand::Brand,
    m20260105_000001_subscription_plan::SubscriptionPlan,
};

static IDX_ORGANIZATION_BRAND_ID: &str = "idx-organization-brand_id";
static FK_ORGANIZATION_BRAND_ID: &str = "fk-organization-brand_id";
static FK_ORGANIZATION_SUBSCRIPTION_PLAN_ID: &str = "fk-organization-subscription_plan_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Organization::Table)
                    .if_not_exists()
                    .col(pk_auto(Organization::Id))
                    .col(integer_null(Organization::BrandId))
                    .col(string(Organization::Name))
                    .col(string_uniq(Organization::OrgCode))
                    .col(string_uniq(Organization::EntityCode))
                    .col(string_null(Organization::OwnerName))
                    .col(string_null(Organization::OwnerEmail))
                    .col(string_null(Organization::OwnerPhone))
                    .col(boolean(Organization::IsFranchise))
                    .col(date_null(Organization::FranchiseStartDate))
                    .col(integer_null(Organization::SubscriptionPlanId))
                    .col(boolean(Organization::IsActive))
                    .col(boolean(Organization::IsDeleted).default(false).to_owned())
                    .col(timestamp_null(Organization::DeletedAt))
                    .col(timestamp(Organization::CreatedAt))
                    .col(timestamp(Organization::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ORGANIZATION_BRAND_ID)
                    .table(Organization::Table)
                    .col(Organization::BrandId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ORGANIZATION_BRAND_ID)
                    .from_tbl(Organization::Table)
                    .from_col(Organization::BrandId)
                    .to_tbl(Brand::Table)
                    .to_col(Brand::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ORGANIZATION_SUBSCRIPTION_PLAN_ID)
                    .from_tbl(Organization::Table)
                    .from_col(Organization::SubscriptionPlanId)
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
                    .name(FK_ORGANIZATION_SUBSCRIPTION_PLAN_ID)
                    .table(Organization::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ORGANIZATION_BRAND_ID)
                    .table(Organization::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ORGANIZATION_BRAND_ID)
                    .table(Organization::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Organization::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Organization {
    Table,
    Id,
    BrandId,
    Name,
    OrgCode,
    EntityCode,
    OwnerName,
    OwnerEmail,
    OwnerPhone,
    IsFranchise,
    FranchiseStartDate,
    SubscriptionPlanId,
    IsActive,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
