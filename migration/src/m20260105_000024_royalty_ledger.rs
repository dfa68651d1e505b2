use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000004_organization::Organization;

static IDX_ROYALTY_LEDGER_ORGANIZATION_ID_MONTH: &str = "idx-royalty_ledger-organization_id-month";
static FK_ROYALTY_LEDGER_ORGANIZATION_ID: &str = "fk-royalty_ledger-organization_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(RoyaltyLedger::Table)
                    .if_not_exists()
                    .col(pk_auto(RoyaltyLedger::Id))
                    .col(integer(RoyaltyLedger::OrganizationId))
                    .col(date(RoyaltyLedger::Month))
                    .col(big_integer(RoyaltyLedger::GrossRevenue))
                    .col(integer(RoyaltyLedger::RoyaltyBasisPoints))
                    .col(big_integer(RoyaltyLedger::RoyaltyFlatFee))
                    .col(big_integer(RoyaltyLedger::CalculatedRoyalty))
                    .col(boolean(RoyaltyLedger::IsPaid))
                    .col(date_null(RoyaltyLedger::PaidDate))
                    .col(string_null(RoyaltyLedger::TransactionRef))
                    .col(timestamp(RoyaltyLedger::CreatedAt))
                    .col(timestamp(RoyaltyLedger::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ROYALTY_LEDGER_ORGANIZATION_ID_MONTH)
                    .table(RoyaltyLedger::Table)
                    .col(RoyaltyLedger::OrganizationId)
                    .col(RoyaltyLedger::Month)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ROYALTY_LEDGER_ORGANIZATION_ID)
                    .from_tbl(RoyaltyLedger::Table)
                    .from_col(RoyaltyLedger::OrganizationId)
                    .to_tbl(Organization::Table)
                    .to_col(Organization::Id)
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
                    .name(FK_ROYALTY_LEDGER_ORGANIZATION_ID)
                    .table(RoyaltyLedger::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ROYALTY_LEDGER_ORGANIZATION_ID_MONTH)
                    .table(RoyaltyLedger::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(RoyaltyLedger::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum RoyaltyLedger {
    Table,
    Id,
    OrganizationId,
    Month,
    GrossRevenue,
    RoyaltyBasisPoints,
    RoyaltyFlatFee,
    CalculatedRoyalty,
    IsPaid,
    PaidDate,
    TransactionRef,
    CreatedAt,
    UpdatedAt,
}
