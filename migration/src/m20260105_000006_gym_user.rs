use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000003_brand::Brand,
    m20260105_000005_gym::Gym,
    m20260105_000002_holding_company::HoldingCompany,
    m20260105_000004_organization::Organization,
};

static IDX_GYM_USER_GYM_ID: &str = "idx-gym_user-gym_id";
static IDX_GYM_USER_PHONE: &str = "idx-gym_user-phone";
static FK_GYM_USER_GYM_ID: &str = "fk-gym_user-gym_id";
static FK_GYM_USER_HOLDING_COMPANY_ID: &str = "fk-gym_user-holding_company_id";
static FK_GYM_USER_BRAND_ID: &str = "fk-gym_user-brand_id";
static FK_GYM_USER_ORGANIZATION_ID: &str = "fk-gym_user-organization_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GymUser::Table)
                    .if_not_exists()
                    .col(pk_auto(GymUser::Id))
                    .col(integer_null(GymUser::GymId))
                    .col(integer_null(GymUser::HoldingCompanyId))
                    .col(integer_null(GymUser::BrandId))
                    .col(integer_null(GymUser::OrganizationId))
                    .col(string(GymUser::Phone))
                    .col(string_null(GymUser::Email))
                    .col(string_null(GymUser::Username).unique_key().to_owned())
                    .col(string(GymUser::Name))
                    .col(string_len(GymUser::Role, 32))
                    .col(boolean(GymUser::CanViewRevenue))
                    .col(boolean(GymUser::CanManageMembers))
                    .col(boolean(GymUser::CanManageLeads))
                    .col(boolean(GymUser::CanUseAi))
                    .col(boolean(GymUser::IsActive))
                    .col(boolean(GymUser::IsSuperuser))
                    .col(string_null(GymUser::PasswordHash))
                    .col(timestamp_null(GymUser::LastLogin))
                    .col(timestamp(GymUser::CreatedAt))
                    .col(timestamp(GymUser::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GYM_USER_GYM_ID)
                    .table(GymUser::Table)
                    .col(GymUser::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GYM_USER_PHONE)
                    .table(GymUser::Table)
                    .col(GymUser::Phone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_USER_GYM_ID)
                    .from_tbl(GymUser::Table)
                    .from_col(GymUser::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_USER_HOLDING_COMPANY_ID)
                    .from_tbl(GymUser::Table)
                    .from_col(GymUser::HoldingCompanyId)
                    .to_tbl(HoldingCompany::Table)
                    .to_col(HoldingCompany::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_USER_BRAND_ID)
                    .from_tbl(GymUser::Table)
                    .from_col(GymUser::BrandId)
                    .to_tbl(Brand::Table)
                    .to_col(Brand::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_USER_ORGANIZATION_ID)
                    .from_tbl(GymUser::Table)
                    .from_col(GymUser::OrganizationId)
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
                    .name(FK_GYM_USER_ORGANIZATION_ID)
                    .table(GymUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GYM_USER_BRAND_ID)
                    .table(GymUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GYM_USER_HOLDING_COMPANY_ID)
                    .table(GymUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GYM_USER_GYM_ID)
                    .table(GymUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GYM_USER_PHONE)
                    .table(GymUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GYM_USER_GYM_ID)
                    .table(GymUser::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GymUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum GymUser {
    Table,
    Id,
    GymId,
    HoldingCompanyId,
    BrandId,
    OrganizationId,
    Phone,
    Email,
    Username,
    Name,
    Role,
    CanViewRevenue,
    CanManageMembers,
    CanManageLeads,
    CanUseAi,
    IsActive,
    IsSuperuser,
    PasswordHash,
    LastLogin,
    CreatedAt,
    UpdatedAt,
}
