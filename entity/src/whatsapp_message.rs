use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{DeliveryStatus, MessageDirection, MessageType};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "whatsapp_message")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gym_id: i32,
    pub member_id: Option<i32>,
    pub lead_id: Option<i32>,
    pub direction: MessageDirection,
    pub message_type: MessageType,
    pub recipient_phone: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub template_name: Option<String>,
    pub wa_message_id: Option<String>,
    pub status: DeliveryStatus,
    #[sea_orm(column_type = "Text")]
    pub error_message: Option<String>,
    pub cost_paise: i64,
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
        belongs_to = "super::member::Entity",
        from = "Column::MemberId",
        to = "super::member::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Member,
    #[sea_orm(
        belongs_to = "super::lead::Entity",
        from = "Column::LeadId",
        to = "super::lead::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Lead,
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

impl Related<super::lead::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Lead.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
