use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{
    DietaryPreference, ExperienceLevel, FitnessGoal, Gender, MemberStatus,
};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "member")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gym_id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<Date>,
    pub goal: FitnessGoal,
    pub experience_level: ExperienceLevel,
    #[sea_orm(column_type = "Text")]
    pub medical_conditions: Option<String>,
    pub dietary_preference: DietaryPreference,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub bmi: Option<f64>,
    pub membership_plan_id: Option<i32>,
    pub join_date: Date,
    pub membership_start: Option<Date>,
    pub membership_expiry: Option<Date>,
    pub amount_paid: i64,
    pub assigned_trainer_id: Option<i32>,
    pub attendance_streak: i32,
    pub last_check_in: Option<DateTime>,
    pub churn_risk_score: i32,
    pub status: MemberStatus,
    pub emergency_contact: Option<String>,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::gym::Entity",
        from = "Column::GymId",
        to = "super::gym::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Gym,
    #[sea_orm(
        belongs_to = "super::membership_plan::Entity",
        from = "Column::MembershipPlanId",
        to = "super::membership_plan::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    MembershipPlan,
    #[sea_orm(
        belongs_to = "super::gym_user::Entity",
        from = "Column::AssignedTrainerId",
        to = "super::gym_user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    GymUser,
}

impl Related<super::gym::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gym.def()
    }
}

impl Related<super::membership_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::MembershipPlan.def()
    }
}

impl Related<super::gym_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GymUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
