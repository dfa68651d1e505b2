use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000010_member::Member,
};

static IDX_WHATSAPP_MESSAGE_LOG_GYM_ID: &str = "idx-whatsapp_message_log-gym_id";
static IDX_WHATSAPP_MESSAGE_LOG_MEMBER_ID: &str = "idx-whatsapp_message_log-member_id";
static FK_WHATSAPP_MESSAGE_LOG_GYM_ID: &str = "fk-whatsapp_message_log-gym_id";
static FK_WHATSAPP_MESSAGE_LOG_MEMBER_ID: &str = "fk-whatsapp_message_log-member_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WhatsappMessageLog::Table)
                    .if_not_exists()
                    .col(pk_auto(WhatsappMessageLog::Id))
                    .col(integer(WhatsappMessageLog::GymId))
                    .col(integer_null(WhatsappMessageLog::MemberId))
                    .col(string(WhatsappMessageLog::Phone))
                    .col(text(WhatsappMessageLog::Message))
                    .col(string_len(WhatsappMessageLog::Status, 32))
                    .col(text_null(WhatsappMessageLog::Response))
                    .col(timestamp(WhatsappMessageLog::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WHATSAPP_MESSAGE_LOG_GYM_ID)
                    .table(WhatsappMessageLog::Table)
                    .col(WhatsappMessageLog::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WHATSAPP_MESSAGE_LOG_MEMBER_ID)
                    .table(WhatsappMessageLog::Table)
                    .col(WhatsappMessageLog::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WHATSAPP_MESSAGE_LOG_GYM_ID)
                    .from_tbl(WhatsappMessageLog::Table)
                    .from_col(WhatsappMessageLog::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WHATSAPP_MESSAGE_LOG_MEMBER_ID)
                    .from_tbl(WhatsappMessageLog::Table)
                    .from_col(WhatsappMessageLog::MemberId)
                    .to_tbl(Member::Table)
                    .to_col(Member::Id)
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
                    .name(FK_WHATSAPP_MESSAGE_LOG_MEMBER_ID)
                    .table(WhatsappMessageLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WHATSAPP_MESSAGE_LOG_GYM_ID)
                    .table(WhatsappMessageLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WHATSAPP_MESSAGE_LOG_MEMBER_ID)
                    .table(WhatsappMessageLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WHATSAPP_MESSAGE_LOG_GYM_ID)
                    .table(WhatsappMessageLog::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WhatsappMessageLog::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WhatsappMessageLog {
    Table,
    Id,
    GymId,
    MemberId,
    Phone,
    Message,
    Status,
    Response,
    CreatedAt,
}
