use sea_orm::entity::prelude::*;

use super::sea_orm_active_enums::{BillingCycle, PaymentStatus};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "payment")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub gym_id: i32,
    pub subscription_id: Option<i32>,
    pub plan_id: Option<i32>,
    pub billing_cycle: Option<BillingCycle>,
    pub razorpay_payment_id: Option<String>,
    #[sea_orm(unique)]
    pub razorpay_order_id: Option<String>,
    pub razorpay_signature: Option<String>,
    pub amount: i64,
    pub gst_amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub payment_method: Option<String>,
    pub invoice_number: Option<String>,
    pub paid_at: Option<DateTime>,
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
        belongs_to = "super::gym_subscription::Entity",
        from = "Column::SubscriptionId",
        to = "super::gym_subscription::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    GymSubscription,
    #[sea_orm(
        belongs_to = "super::subscription_plan::Entity",
        from = "Column::PlanId",
        to = "super::subscription_plan::Column::Id",
        on_update = "NoAction",
        on_delete = "SetNull"
    )]
    SubscriptionPlan,
}

impl Related<super::gym::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Gym.def()
    }
}

impl Related<super::gym_subscription::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GymSubscription.def()
    }
}

impl Related<super::subscription_plan::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::SubscriptionPlan.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
