use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{BillingCycle, BillingStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "gym_subscription")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gym_id: i32,
    pub plan_id: i32,
    pub billing_cycle: BillingCycle,
    pub amount: i64,
    pub razorpay_subscription_id: Option<String>,
    pub razorpay_customer_id: Option<String>,
    pub status: BillingStatus,
    pub current_period_start: DateTime,
    pub current_period_end: DateTime,
    pub cancelled_at: Option<DateTime>,
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
        belongs_to = "super::subscription_plan::Entity",
        from = "Column::PlanId",
        to = "super::subscription_plan::Column::Id",
        on_update = "NoAction",
        on_delete = "Restrict"
    )]
    SubscriptionPlan,
}

impl Related<super::gym::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gym.def()
    }
}

impl Related<super::subscription_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubscriptionPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
