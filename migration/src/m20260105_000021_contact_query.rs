use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ContactQuery::Table)
                    .if_not_exists()
                    .col(pk_auto(ContactQuery::Id))
                    .col(string(ContactQuery::Name))
                    .col(string(ContactQuery::Email))
                    .col(string_null(ContactQuery::Phone))
                    .col(string_null(ContactQuery::Company))
                    .col(string(ContactQuery::Subject))
                    .col(text(ContactQuery::Message))
                    .col(string_null(ContactQuery::IpAddress))
                    .col(text_null(ContactQuery::UserAgent))
                    .col(boolean(ContactQuery::IsResolved))
                    .col(timestamp(ContactQuery::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ContactQuery::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum ContactQuery {
    Table,
    Id,
    Name,
    Email,
    Phone,
    Company,
    Subject,
    Message,
    IpAddress,
    UserAgent,
    IsResolved,
    CreatedAt,
}
