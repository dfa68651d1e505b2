use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000006_gym_user::GymUser,
};

static IDX_GYM_USER_LOCATION_USER_ID_GYM_ID: &str = "idx-gym_user_location-user_id-gym_id";
static FK_GYM_USER_LOCATION_USER_ID: &str = "fk-gym_user_location-user_id";
static FK_GYM_USER_LOCATION_GYM_ID: &str = "fk-gym_user_location-gym_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(GymUserLocation::Table)
                    .if_not_exists()
                    .col(pk_auto(GymUserLocation::Id))
                    .col(integer(GymUserLocation::UserId))
                    .col(integer(GymUserLocation::GymId))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_GYM_USER_LOCATION_USER_ID_GYM_ID)
                    .table(GymUserLocation::Table)
                    .col(GymUserLocation::UserId)
                    .col(GymUserLocation::GymId)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_USER_LOCATION_USER_ID)
                    .from_tbl(GymUserLocation::Table)
                    .from_col(GymUserLocation::UserId)
                    .to_tbl(GymUser::Table)
                    .to_col(GymUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_GYM_USER_LOCATION_GYM_ID)
                    .from_tbl(GymUserLocation::Table)
                    .from_col(GymUserLocation::GymId)
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
                    .name(FK_GYM_USER_LOCATION_GYM_ID)
                    .table(GymUserLocation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_GYM_USER_LOCATION_USER_ID)
                    .table(GymUserLocation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_GYM_USER_LOCATION_USER_ID_GYM_ID)
                    .table(GymUserLocation::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(GymUserLocation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum GymUserLocation {
    Table,
    Id,
    UserId,
    GymId,
}
