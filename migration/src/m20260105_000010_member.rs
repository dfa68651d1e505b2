use sea_orm_migration::{prelude::*, schema::*};

use crate::{
    m20260105_000005_gym::Gym,
    m20260105_000006_gym_user::GymUser,
    m20260105_000009_membership_plan::MembershipPlan,
};

static IDX_MEMBER_GYM_ID: &str = "idx-member-gym_id";
static IDX_MEMBER_PHONE: &str = "idx-member-phone";
static IDX_MEMBER_MEMBERSHIP_EXPIRY: &str = "idx-member-membership_expiry";
static FK_MEMBER_GYM_ID: &str = "fk-member-gym_id";
static FK_MEMBER_MEMBERSHIP_PLAN_ID: &str = "fk-member-membership_plan_id";
static FK_MEMBER_ASSIGNED_TRAINER_ID: &str = "fk-member-assigned_trainer_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Member::Table)
                    .if_not_exists()
                    .col(pk_auto(Member::Id))
                    .col(integer(Member::GymId))
                    .col(string(Member::Name))
                    .col(string(Member::Phone))
                    .col(string_null(Member::Email))
                    .col(string_len_null(Member::Gender, 32))
                    .col(date_null(Member::DateOfBirth))
                    .col(string_len(Member::Goal, 32))
                    .col(string_len(Member::ExperienceLevel, 32))
                    .col(text_null(Member::MedicalConditions))
                    .col(string_len(Member::DietaryPreference, 32))
                    .col(double_null(Member::HeightCm))
                    .col(double_null(Member::WeightKg))
                    .col(double_null(Member::BodyFatPct))
                    .col(double_null(Member::Bmi))
                    .col(integer_null(Member::MembershipPlanId))
                    .col(date(Member::JoinDate))
                    .col(date_null(Member::MembershipStart))
                    .col(date_null(Member::MembershipExpiry))
                    .col(big_integer(Member::AmountPaid))
                    .col(integer_null(Member::AssignedTrainerId))
                    .col(integer(Member::AttendanceStreak))
                    .col(timestamp_null(Member::LastCheckIn))
                    .col(integer(Member::ChurnRiskScore))
                    .col(string_len(Member::Status, 32))
                    .col(string_null(Member::EmergencyContact))
                    .col(boolean(Member::IsDeleted).default(false).to_owned())
                    .col(timestamp_null(Member::DeletedAt))
                    .col(timestamp(Member::CreatedAt))
                    .col(timestamp(Member::UpdatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEMBER_GYM_ID)
                    .table(Member::Table)
                    .col(Member::GymId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEMBER_PHONE)
                    .table(Member::Table)
                    .col(Member::Phone)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_MEMBER_MEMBERSHIP_EXPIRY)
                    .table(Member::Table)
                    .col(Member::MembershipExpiry)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_MEMBER_GYM_ID)
                    .from_tbl(Member::Table)
                    .from_col(Member::GymId)
                    .to_tbl(Gym::Table)
                    .to_col(Gym::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_MEMBER_MEMBERSHIP_PLAN_ID)
                    .from_tbl(Member::Table)
                    .from_col(Member::MembershipPlanId)
                    .to_tbl(MembershipPlan::Table)
                    .to_col(MembershipPlan::Id)
                    .on_delete(ForeignKeyAction::SetNull)
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_MEMBER_ASSIGNED_TRAINER_ID)
                    .from_tbl(Member::Table)
                    .from_col(Member::AssignedTrainerId)
                    .to_tbl(GymUser::Table)
                    .to_col(GymUser::Id)
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
                    .name(FK_MEMBER_ASSIGNED_TRAINER_ID)
                    .table(Member::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_MEMBER_MEMBERSHIP_PLAN_ID)
                    .table(Member::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_MEMBER_GYM_ID)
                    .table(Member::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEMBER_MEMBERSHIP_EXPIRY)
                    .table(Member::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEMBER_PHONE)
                    .table(Member::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_MEMBER_GYM_ID)
                    .table(Member::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(Member::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum Member {
    Table,
    Id,
    GymId,
    Name,
    Phone,
    Email,
    Gender,
    DateOfBirth,
    Goal,
    ExperienceLevel,
    MedicalConditions,
    DietaryPreference,
    HeightCm,
    WeightKg,
    BodyFatPct,
    Bmi,
    MembershipPlanId,
    JoinDate,
    MembershipStart,
    MembershipExpiry,
    AmountPaid,
    AssignedTrainerId,
    AttendanceStreak,
    LastCheckIn,
    ChurnRiskScore,
    Status,
    EmergencyContact,
    IsDeleted,
    DeletedAt,
    CreatedAt,
    UpdatedAt,
}
