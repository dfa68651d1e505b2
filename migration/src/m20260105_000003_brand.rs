use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000002_holding_company::HoldingCompany;

static IDX_BRAND_HOLDING_COMPANY_ID: &str = "idx-brand-holding_company_id";
static FK_BRAND_HOLDING_COMPANY_ID: &str = "fk-brand-holding_company_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Brand::Table)
                    .if_not_exists()
                    .col(pk_auto(Brand::Id))
                    .col(integer(Brand::HoldingCompanyId))
                    .col(string(Brand::Name))
                    .col(string_uniq(Brand::BrandCode))
                    .col(integer(Brand::RoyaltyBasisPoints))
                    .col(big_integer(Brand::RoyaltyFlatFee))
                    .col(boolean(Brand::IsActive))
                    .col(timestamp(Brand::CreatedAt))
                    .col(timestamp(Brand::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_BRAND_HOLDING_COMPANY_ID)
                    .table(Brand::Table)
                    .col(Brand::HoldingCompanyId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_BRAND_HOLDING_COMPANY_ID)
                    .from_tbl(Brand::Table)
                    .from_col(Brand::HoldingCompanyId)
                    .to_tbl(HoldingCompany::Table)
                    .to_col(HoldingCompany::Id)
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
                    .name(FK_BRAND_HOLDING_COMPANY_ID)
                    .table(Brand::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_BRAND_HOLDING_COMPANY_ID)
                    .table(Brand::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Brand::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Brand {
    Table,
    Id,
    HoldingCompanyId,
    Name,
    BrandCode,
    RoyaltyBasisPoints,
    RoyaltyFlatFee,
    IsActive,
    CreatedAt,
    UpdatedAt,
}
