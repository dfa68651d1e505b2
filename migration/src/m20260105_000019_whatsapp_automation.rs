use sea_orm_migration::{prelude::*, schema::*};

use crate::m20260105_000005_gym::Gym;

static IDX_WHATSAPP_AUTOMATION_GYM_ID: &str = "idx-whatsapp_automation-gym_id";
static FK_WHATSAPP_AUTOMATION_GYM_ID: &str = "fk-whatsapp_automation-gym_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(WhatsappAutomation::Table)
                    .if_not_exists()
                    .col(pk_auto(WhatsappAutomation::Id))
                    .col(integer(WhatsappAutomation::GymId))
                    .col(string_len(WhatsappAutomation::AutomationType, 32))
                    .col(integer_null(WhatsappAutomation::DaysBefore))
                    .col(text(WhatsappAutomation::Template))
                    .col(boolean(WhatsappAutomation::Enabled))
                    .col(timestamp_null(WhatsappAutomation::LastRunAt))
                    .col(timestamp(WhatsappAutomation::CreatedAt))
                    .col(timestamp(WhatsappAutomation::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_WHATSAPP_AUTOMATION_GYM_ID)
                    .table(WhatsappAutomation::Table)
                    .col(WhatsappAutomation::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_WHATSAPP_AUTOMATION_GYM_ID)
                    .from_tbl(WhatsappAutomation::Table)
                    .from_col(WhatsappAutomation::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
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
                    .name(FK_WHATSAPP_AUTOMATION_GYM_ID)
                    .table(WhatsappAutomation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_WHATSAPP_AUTOMATION_GYM_ID)
                    .table(WhatsappAutomation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(WhatsappAutomation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum WhatsappAutomation {
    Table,
    Id,
    GymId,
    AutomationType,
    DaysBefore,
    Template,
    Enabled,
    LastRunAt,
    CreatedAt,
    UpdatedAt,
}
