use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(HoldingCompany::Table)
                    .if_not_exists()
                    .col(pk_auto(HoldingCompany::Id))
                    .col(string(HoldingCompany::Name))
                    .col(string_uniq(HoldingCompany::HoldingCode))
                    .col(string(HoldingCompany::OwnerName))
                    .col(string_null(HoldingCompany::OwnerEmail))
                    .col(string_null(HoldingCompany::OwnerPhone))
                    .col(boolean(HoldingCompany::IsActive))
                    .col(boolean(HoldingCompany::IsDeleted).default(false).to_owned())
                    .col(timestamp_null(HoldingCompany::DeletedAt))
                    .col(timestamp(HoldingCompany::CreatedAt))
                    .col(timestamp(HoldingCompany::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(HoldingCompany::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum HoldingCompany {
    Table,
    Id,
    Name,
    HoldingCode,
    OwnerName,
    OwnerEmail,
    OwnerPhone,
    IsActive,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
