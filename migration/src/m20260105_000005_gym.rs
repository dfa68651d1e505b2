use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000004_organization::Organization,
    m20260105_000001_subscription_plan::SubscriptionPlan,
};

static IDX_GYM_ORGANIZATION_ID: &str = "idx-gym-organization_id";
static FK_GYM_SUBSCRIPTION_PLAN_ID: &str = "fk-gym-subscription_plan_id";
static FK_GYM_ORGANIZATION_ID: &str = "fk-gym-organization_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Gym::Table)
                    .if_not_exists()
                    .col(pk_auto(Gym::Id))
                    .col(string(Gym::Name))
                    .col(string_uniq(Gym::Slug))
                    .col(string_uniq(Gym::GymCode))
                    .col(string(Gym::BrandColor))
                    .col(string(Gym::FontFamily))
                    .col(text_null(Gym::Logo))
                    .col(string(Gym::OwnerName))
                    .col(string(Gym::OwnerPhone))
                    .col(string_null(Gym::Email).unique_key().to_owned())
                    .col(text_null(Gym::Address))
                    .col(string_null(Gym::City))
                    .col(string_null(Gym::State))
                    .col(string_null(Gym::Pincode))
                    .col(string_len(Gym::GymType, 32))
                    .col(integer(Gym::MemberCapacity))
                    .col(integer_null(Gym::SubscriptionPlanId))
                    .col(string_len(Gym::SubscriptionStatus, 32))
                    .col(timestamp_null(Gym::TrialEndsAt))
                    .col(integer_null(Gym::OrganizationId))
                    .col(boolean(Gym::IsActive))
                    .col(boolean(Gym::IsDeleted).default(false).to_owned())
                    .col(timestamp_null(Gym::DeletedAt))
                    .col(timestamp(Gym::CreatedAt))
                    .col(timestamp(Gym::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GYM_ORGANIZATION_ID)
                    .table(Gym::Table)
                    .col(Gym::OrganizationId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_SUBSCRIPTION_PLAN_ID)
                    .from_tbl(Gym::Table)
                    .from_col(Gym::SubscriptionPlanId)
                    .to_tbl(SubscriptionPlan::Table)
                    .to_col(SubscriptionPlan::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_ORGANIZATION_ID)
                    .from_tbl(Gym::Table)
                    .from_col(Gym::OrganizationId)
                    .to_tbl(Organization::Table)
                    .to_col(Organization::Id)
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
                    .name(FK_GYM_ORGANIZATION_ID)
                    .table(Gym::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GYM_SUBSCRIPTION_PLAN_ID)
                    .table(Gym::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GYM_ORGANIZATION_ID)
                    .table(Gym::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Gym::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Gym {
    Table,
    Id,
    Name,
    Slug,
    GymCode,
    BrandColor,
    FontFamily,
    Logo,
    OwnerName,
    OwnerPhone,
    Email,
    Address,
    City,
    State,
    Pincode,
    GymType,
    MemberCapacity,
    SubscriptionPlanId,
    SubscriptionStatus,
    TrialEndsAt,
    OrganizationId,
    IsActive,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
