use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{GymType, SubscriptionStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "gym")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    #[sea_orm(unique)]
    pub gym_code: String,
    pub brand_color: String,
    pub font_family: String,
    #[sea_orm(column_type = "Text")]
    pub logo: Option<String>,
    pub owner_name: String,
    pub owner_phone: String,
    #[sea_orm(unique)]
    pub email: Option<String>,
    #[sea_orm(column_type = "Text")]
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub gym_type: GymType,
    pub member_capacity: i32,
    pub subscription_plan_id: Option<i32>,
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<DateTime>,
    pub organization_id: Option<i32>,
    pub is_active: bool,
    pub is_deleted: bool,
    pub deleted_at: Option<DateTime>,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::subscription_plan::Entity",
        from = "Column::SubscriptionPlanId",
        to = "super::subscription_plan::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    SubscriptionPlan,
    #[sea_orm(
        belongs_to = "super::organization::Entity",
        from = "Column::OrganizationId",
        to = "super::organization::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    Organization,
}

impl Related<super::subscription_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubscriptionPlan.def()
    }
}

impl Related<super::organization::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Organization.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
