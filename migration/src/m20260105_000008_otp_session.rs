use sea_orm_migration::{prelude::*, schema::*};

static IDX_OTP_SESSION_PHONE: &str = "idx-otp_session-phone";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(OtpSession::Table)
                    .if_not_exists()
                    .col(pk_auto(OtpSession::Id))
                    .col(string(OtpSession::Phone))
                    .col(string(OtpSession::OtpCode))
                    .col(boolean(OtpSession::IsVerified))
                    .col(integer(OtpSession::Attempts))
                    .col(timestamp(OtpSession::ExpiresAt))
                    .col(timestamp(OtpSession::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_OTP_SESSION_PHONE)
                    .table(OtpSession::Table)
                    .col(OtpSession::Phone)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_OTP_SESSION_PHONE)
                    .table(OtpSession::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(OtpSession::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum OtpSession {
    Table,
    Id,
    Phone,
    OtpCode,
    IsVerified,
    Attempts,
    ExpiresAt,
    CreatedAt,
}
