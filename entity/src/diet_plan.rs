use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{DietaryPreference, FitnessGoal};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "diet_plan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gym_id: i32,
    pub member_id: i32,
    pub created_by_id: Option<i32>,
    pub title: String,
    pub goal: FitnessGoal,
    pub dietary_preference: DietaryPreference,
    pub daily_calories: i32,
    pub daily_protein_g: Option<i32>,
    pub daily_carbs_g: Option<i32>,
    pub daily_fat_g: Option<i32>,
    pub plan_data: Json,
    pub ai_model_used: String,
    pub ai_prompt_tokens: i32,
    pub ai_completion_tokens: i32,
    pub is_active: bool,
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
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_update = "NoAction",
        on_delete = "Cascade"
    )]
    Member,
    #[sea_orm(
        belongs_to = "super::gym_user::Entity",
        from = "Column::CreatedById",
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

impl Related<super::member::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Member.def()
    }
}

impl Related<super::gym_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GymUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
