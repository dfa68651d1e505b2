use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::AiFeature;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "ai_usage_log")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gym_id: Option<i32>,
    pub user_id: Option<i32>,
    pub feature: AiFeature,
    pub model_used: String,
    pub prompt_tokens: i32,
    pub completion_tokens: i32,
    pub total_tokens: i32,
    pub cost_usd_micros: i64,
    pub response_time_ms: i64,
    pub was_cached: bool,
    pub was_successful: bool,
    #[sea_orm(column_type = "Text")]
    pub error_message: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub prompt_summary: Option<String>,
    pub created_at: DateTime,
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
        from = "Column::UserId",
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

impl Related<super::gym_user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GymUser.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
