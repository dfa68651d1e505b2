use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Eq)]
#[sea_orm(table_name = "subscription_plan")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(unique)]
    pub slug: String,
    pub price_monthly: i64,
    pub price_yearly: i64,
    pub discount_pct: i32,
    pub max_members: i32,
    pub max_ai_queries_per_month: i32,
    pub max_staff_accounts: i32,
    pub max_leads: i32,
    pub has_lead_management: bool,
    pub has_ai_workout: bool,
    pub has_ai_diet: bool,
    pub has_ai_lead_scoring: bool,
    pub has_whatsapp_integration: bool,
    pub has_instagram_content: bool,
    pub has_analytics_dashboard: bool,
    pub has_white_label: bool,
    pub has_api_access: bool,
    pub is_active: bool,
    pub display_order: i32,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
