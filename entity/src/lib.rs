//! SeaORM entity definitions for every GymEdge table.

pub mod prelude;

pub mod ai_usage_log;
pub mod attendance;
pub mod brand;
pub mod contact_query;
pub mod diet_plan;
pub mod gym;
pub mod gym_subscription;
pub mod gym_user;
pub mod gym_user_location;
pub mod holding_company;
pub mod lead;
pub mod member;
pub mod membership_plan;
pub mod organization;
pub mod otp_session;
pub mod payment;
pub mod progress_log;
pub mod quote;
pub mod royalty_ledger;
pub mod sea_orm_active_enums;
pub mod subscription_plan;
pub mod whatsapp_automation;
pub mod whatsapp_message;
pub mod whatsapp_message_log;
pub mod workout_plan;
