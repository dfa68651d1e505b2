//! String-backed enums shared by the entity models.

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of facility a gym operates.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum GymType {
    #[sea_orm(string_value = "standard")]
    Standard,
    #[sea_orm(string_value = "crossfit")]
    Crossfit,
    #[sea_orm(string_value = "yoga")]
    Yoga,
    #[sea_orm(string_value = "martial_arts")]
    MartialArts,
    #[sea_orm(string_value = "multi")]
    Multi,
    #[sea_orm(string_value = "personal_training")]
    PersonalTraining,
}

/// SaaS subscription state of a gym tenant.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum SubscriptionStatus {
    #[sea_orm(string_value = "trial")]
    Trial,
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "past_due")]
    PastDue,
    #[sea_orm(string_value = "churned")]
    Churned,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Role of a staff account, from enterprise admins down to front desk.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    #[sea_orm(string_value = "holding_admin")]
    HoldingAdmin,
    #[sea_orm(string_value = "brand_admin")]
    BrandAdmin,
    #[sea_orm(string_value = "org_admin")]
    OrgAdmin,
    #[sea_orm(string_value = "region_manager")]
    RegionManager,
    #[sea_orm(string_value = "owner")]
    Owner,
    #[sea_orm(string_value = "manager")]
    Manager,
    #[sea_orm(string_value = "trainer")]
    Trainer,
    #[sea_orm(string_value = "receptionist")]
    Receptionist,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum Gender {
    #[sea_orm(string_value = "male")]
    Male,
    #[sea_orm(string_value = "female")]
    Female,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Primary training goal of a member.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum FitnessGoal {
    #[sea_orm(string_value = "fat_loss")]
    FatLoss,
    #[sea_orm(string_value = "muscle_gain")]
    MuscleGain,
    #[sea_orm(string_value = "general_fitness")]
    GeneralFitness,
    #[sea_orm(string_value = "sports")]
    Sports,
    #[sea_orm(string_value = "rehab")]
    Rehab,
    #[sea_orm(string_value = "strength")]
    Strength,
    #[sea_orm(string_value = "flexibility")]
    Flexibility,
}

/// Training experience, also used as workout plan difficulty.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum ExperienceLevel {
    #[sea_orm(string_value = "beginner")]
    Beginner,
    #[sea_orm(string_value = "intermediate")]
    Intermediate,
    #[sea_orm(string_value = "advanced")]
    Advanced,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum DietaryPreference {
    #[sea_orm(string_value = "veg")]
    Veg,
    #[sea_orm(string_value = "non_veg")]
    NonVeg,
    #[sea_orm(string_value = "vegan")]
    Vegan,
    #[sea_orm(string_value = "eggetarian")]
    Eggetarian,
    #[sea_orm(string_value = "jain")]
    Jain,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum MemberStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "expired")]
    Expired,
    #[sea_orm(string_value = "frozen")]
    Frozen,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
}

/// Channel a lead arrived through.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum LeadSource {
    #[sea_orm(string_value = "instagram")]
    Instagram,
    #[sea_orm(string_value = "facebook")]
    Facebook,
    #[sea_orm(string_value = "google")]
    Google,
    #[sea_orm(string_value = "walkin")]
    Walkin,
    #[sea_orm(string_value = "referral")]
    Referral,
    #[sea_orm(string_value = "whatsapp")]
    Whatsapp,
    #[sea_orm(string_value = "justdial")]
    Justdial,
    #[sea_orm(string_value = "website")]
    Website,
    #[sea_orm(string_value = "sulekha")]
    Sulekha,
    #[sea_orm(string_value = "other")]
    Other,
}

/// Sales pipeline stage of a lead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum LeadStatus {
    #[sea_orm(string_value = "new")]
    New,
    #[sea_orm(string_value = "contacted")]
    Contacted,
    #[sea_orm(string_value = "interested")]
    Interested,
    #[sea_orm(string_value = "trial_booked")]
    TrialBooked,
    #[sea_orm(string_value = "trial_done")]
    TrialDone,
    #[sea_orm(string_value = "negotiating")]
    Negotiating,
    #[sea_orm(string_value = "converted")]
    Converted,
    #[sea_orm(string_value = "lost")]
    Lost,
}

/// Feature an LLM call was made for.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum AiFeature {
    #[sea_orm(string_value = "workout_plan")]
    WorkoutPlan,
    #[sea_orm(string_value = "diet_plan")]
    DietPlan,
    #[sea_orm(string_value = "lead_scoring")]
    LeadScoring,
    #[sea_orm(string_value = "instagram_content")]
    InstagramContent,
    #[sea_orm(string_value = "whatsapp_reply")]
    WhatsappReply,
    #[sea_orm(string_value = "churn_prediction")]
    ChurnPrediction,
    #[sea_orm(string_value = "member_insight")]
    MemberInsight,
    #[sea_orm(string_value = "content_generation")]
    ContentGeneration,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum MessageDirection {
    #[sea_orm(string_value = "inbound")]
    Inbound,
    #[sea_orm(string_value = "outbound")]
    Outbound,
}

/// Purpose of a WhatsApp message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum MessageType {
    #[sea_orm(string_value = "payment_reminder")]
    PaymentReminder,
    #[sea_orm(string_value = "welcome")]
    Welcome,
    #[sea_orm(string_value = "lead_follow_up")]
    LeadFollowUp,
    #[sea_orm(string_value = "workout_share")]
    WorkoutShare,
    #[sea_orm(string_value = "diet_share")]
    DietShare,
    #[sea_orm(string_value = "birthday")]
    Birthday,
    #[sea_orm(string_value = "expiry_reminder")]
    ExpiryReminder,
    #[sea_orm(string_value = "attendance_alert")]
    AttendanceAlert,
    #[sea_orm(string_value = "promotion")]
    Promotion,
    #[sea_orm(string_value = "custom")]
    Custom,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum DeliveryStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "sent")]
    Sent,
    #[sea_orm(string_value = "delivered")]
    Delivered,
    #[sea_orm(string_value = "read")]
    Read,
    #[sea_orm(string_value = "failed")]
    Failed,
}

/// Trigger of a scheduled WhatsApp automation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum AutomationType {
    #[sea_orm(string_value = "expiry_reminder")]
    ExpiryReminder,
    #[sea_orm(string_value = "payment_pending")]
    PaymentPending,
    #[sea_orm(string_value = "inactive_reminder")]
    InactiveReminder,
    #[sea_orm(string_value = "birthday")]
    Birthday,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum BillingCycle {
    #[sea_orm(string_value = "monthly")]
    Monthly,
    #[sea_orm(string_value = "yearly")]
    Yearly,
}

/// State of a gym's paid subscription.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum BillingStatus {
    #[sea_orm(string_value = "active")]
    Active,
    #[sea_orm(string_value = "past_due")]
    PastDue,
    #[sea_orm(string_value = "cancelled")]
    Cancelled,
    #[sea_orm(string_value = "paused")]
    Paused,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, DeriveActiveEnum, Serialize, Deserialize, ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[sea_orm(string_value = "captured")]
    Captured,
    #[sea_orm(string_value = "failed")]
    Failed,
    #[sea_orm(string_value = "refunded")]
    Refunded,
    #[sea_orm(string_value = "pending")]
    Pending,
}
