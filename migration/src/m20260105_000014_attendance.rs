use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000010_member::Member,
};

static IDX_ATTENDANCE_GYM_ID: &str = "idx-attendance-gym_id";
static IDX_ATTENDANCE_MEMBER_ID: &str = "idx-attendance-member_id";
static FK_ATTENDANCE_GYM_ID: &str = "fk-attendance-gym_id";
static FK_ATTENDANCE_MEMBER_ID: &str = "fk-attendance-member_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Attendance::Table)
                    .if_not_exists()
                    .col(pk_auto(Attendance::Id))
                    .col(integer(Attendance::GymId))
                    .col(integer(Attendance::MemberId))
                    .col(timestamp(Attendance::CheckIn))
                    .col(timestamp_null(Attendance::CheckOut))
                    .col(integer_null(Attendance::DurationMinutes))
                    .col(text_null(Attendance::Notes))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ATTENDANCE_GYM_ID)
                    .table(Attendance::Table)
                    .col(Attendance::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_ATTENDANCE_MEMBER_ID)
                    .table(Attendance::Table)
                    .col(Attendance::MemberId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ATTENDANCE_GYM_ID)
                    .from_tbl(Attendance::Table)
                    .from_col(Attendance::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_ATTENDANCE_MEMBER_ID)
                    .from_tbl(Attendance::Table)
                    .from_col(Attendance::MemberId)
                    .to_tbl(Member::Table)
                    .to_col(Member::Id)
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
                    .name(FK_ATTENDANCE_MEMBER_ID)
                    .table(Attendance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_ATTENDANCE_GYM_ID)
                    .table(Attendance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ATTENDANCE_MEMBER_ID)
                    .table(Attendance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_ATTENDANCE_GYM_ID)
                    .table(Attendance::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Attendance::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Attendance {
    Table,
    Id,
    GymId,
    MemberId,
    CheckIn,
    CheckOut,
    DurationMinutes,
    Notes,
}
