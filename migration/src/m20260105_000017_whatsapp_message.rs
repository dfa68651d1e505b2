use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000011_lead::Lead,
    m20260105_000010_member::Member,
};

static IDX_WHATSAPP_MESSAGE_GYM_ID: &str = "idx-whatsapp_message-gym_id";
static IDX_WHATSAPP_MESSAGE_MEMBER_ID: &str = "idx-whatsapp_message-member_id";
static FK_WHATSAPP_MESSAGE_GYM_ID: &str = "fk-whatsapp_message-gym_id";
static FK_WHATSAPP_MESSAGE_MEMBER_ID: &str = "fk-whatsapp_message-member_id";
static FK_WHATSAPP_MESSAGE_LEAD_ID: &str = "fk-whatsapp_message-lead_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WhatsappMessage::Table)
                    .if_not_exists()
                    .col(pk_auto(WhatsappMessage::Id))
                    .col(integer(WhatsappMessage::GymId))
                    .col(integer_null(WhatsappMessage::MemberId))
                    .col(integer_null(WhatsappMessage::LeadId))
                    .col(string_len(WhatsappMessage::Direction, 32))
                    .col(string_len(WhatsappMessage::MessageType, 32))
                    .col(string(WhatsappMessage::RecipientPhone))
                    .col(text(WhatsappMessage::Content))
                    .col(string_null(WhatsappMessage::TemplateName))
                    .col(string_null(WhatsappMessage::WaMessageId))
                    .col(string_len(WhatsappMessage::Status, 32))
                    .col(text_null(WhatsappMessage::ErrorMessage))
                    .col(big_integer(WhatsappMessage::CostPaise))
                    .col(timestamp(WhatsappMessage::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WHATSAPP_MESSAGE_GYM_ID)
                    .table(WhatsappMessage::Table)
                    .col(WhatsappMessage::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WHATSAPP_MESSAGE_MEMBER_ID)
                    .table(WhatsappMessage::Table)
                    .col(WhatsappMessage::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WHATSAPP_MESSAGE_GYM_ID)
                    .from_tbl(WhatsappMessage::Table)
                    .from_col(WhatsappMessage::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WHATSAPP_MESSAGE_MEMBER_ID)
                    .from_tbl(WhatsappMessage::Table)
                    .from_col(WhatsappMessage::MemberId)
                    .to_tbl(Member::Table)
                    .to_col(Member::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WHATSAPP_MESSAGE_LEAD_ID)
                    .from_tbl(WhatsappMessage::Table)
                    .from_col(WhatsappMessage::LeadId)
                    .to_tbl(Lead::Table)
                    .to_col(Lead::Id)
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
                    .name(FK_WHATSAPP_MESSAGE_LEAD_ID)
                    .table(WhatsappMessage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WHATSAPP_MESSAGE_MEMBER_ID)
                    .table(WhatsappMessage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_WHATSAPP_MESSAGE_GYM_ID)
                    .table(WhatsappMessage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WHATSAPP_MESSAGE_MEMBER_ID)
                    .table(WhatsappMessage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WHATSAPP_MESSAGE_GYM_ID)
                    .table(WhatsappMessage::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WhatsappMessage::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WhatsappMessage {
    Table,
    Id,
    GymId,
    MemberId,
    LeadId,
    Direction,
    MessageType,
    RecipientPhone,
    Content,
    TemplateName,
    WaMessageId,
    Status,
    ErrorMessage,
    CostPaise,
    CreatedAt,
}
