use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{LeadSource, LeadStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "lead")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gym_id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub source: LeadSource,
    pub goal: Option<String>,
    pub budget_range: Option<String>,
    pub preferred_time: Option<String>,
    pub status: LeadStatus,
    #[sea_orm(column_type = "Text")]
    pub lost_reason: Option<String>,
    pub ai_score: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub ai_recommended_action: Option<String>,
    pub ai_follow_up_date: Option<Date>,
    pub last_contacted_date: Option<DateTime>,
    pub next_followup_date: Option<Date>,
    pub trial_date: Option<Date>,
    pub converted_at: Option<DateTime>,
    pub assigned_to_id: Option<i32>,
    #[sea_orm(column_type = "Text")]
    pub notes: Option<String>,
    pub converted_member_id: Option<i32>,
    pub follow_up_count: i32,
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
        belongs_to = "super::gym_user::Entity",
        from = "Column::AssignedToId",
        to = "super::gym_user::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    GymUser,
    #[sea_orm(
        belongs_to = "super::member::Entity",
        from = "Column::ConvertedMemberId",
        to = "super::member::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Member,
}

impl Related<super::gym::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gym.def()
    }
}

impl Related<super::gym_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GymUser.def()
    }
}

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
