use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{BillingCycle, PaymentStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct SubscriptionPlanDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    /// Prices in paise
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
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CheckoutDto {
    pub plan_slug: String,
    pub billing_cycle: BillingCycle,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CheckoutResponseDto {
    pub order_id: String,
    /// Total including GST, in paise
    pub amount: i64,
    pub currency: String,
    /// Public Razorpay key for the checkout widget
    pub key_id: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyPaymentDto {
    pub razorpay_order_id: String,
    pub razorpay_payment_id: String,
    pub razorpay_signature: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct PaymentDto {
    pub id: i32,
    pub razorpay_order_id: Option<String>,
    pub razorpay_payment_id: Option<String>,
    pub amount: i64,
    pub gst_amount: i64,
    pub currency: String,
    pub status: PaymentStatus,
    pub invoice_number: Option<String>,
    pub paid_at: Option<NaiveDateTime>,
    pub created_at: NaiveDateTime,
}
