pub use sea_orm_migration::prelude::*;

mod m20260105_000001_subscription_plan;
mod m20260105_000002_holding_company;
mod m20260105_000003_brand;
mod m20260105_000004_organization;
mod m20260105_000005_gym;
mod m20260105_000006_gym_user;
mod m20260105_000007_gym_user_location;
mod m20260105_000008_otp_session;
mod m20260105_000009_membership_plan;
mod m20260105_000010_member;
mod m20260105_000011_lead;
mod m20260105_000012_workout_plan;
mod m20260105_000013_diet_plan;
mod m20260105_000014_attendance;
mod m20260105_000015_progress_log;
mod m20260105_000016_ai_usage_log;
mod m20260105_000017_whatsapp_message;
mod m20260105_000018_whatsapp_message_log;
mod m20260105_000019_whatsapp_automation;
mod m20260105_000020_quote;
mod m20260105_000021_contact_query;
mod m20260105_000022_gym_subscription;
mod m20260105_000023_payment;
mod m20260105_000024_royalty_ledger;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20260105_000001_subscription_plan::Migration),
            Box::new(m20260105_000002_holding_company::Migration),
            Box::new(m20260105_000003_brand::Migration),
            Box::new(m20260105_000004_organization::Migration),
            Box::new(m20260105_000005_gym::Migration),
            Box::new(m20260105_000006_gym_user::Migration),
            Box::new(m20260105_000007_gym_user_location::Migration),
            Box::new(m20260105_000008_otp_session::Migration),
            Box::new(m20260105_000009_membership_plan::Migration),
            Box::new(m20260105_000010_member::Migration),
            Box::new(m20260105_000011_lead::Migration),
            Box::new(m20260105_000012_workout_plan::Migration),
            Box::new(m20260105_000013_diet_plan::Migration),
            Box::new(m20260105_000014_attendance::Migration),
            Box::new(m20260105_000015_progress_log::Migration),
            Box::new(m20260105_000016_ai_usage_log::Migration),
            Box::new(m20260105_000017_whatsapp_message::Migration),
            Box::new(m20260105_000018_whatsapp_message_log::Migration),
            Box::new(m20260105_000019_whatsapp_automation::Migration),
            Box::new(m20260105_000020_quote::Migration),
            Box::new(m20260105_000021_contact_query::Migration),
            Box::new(m20260105_000022_gym_subscription::Migration),
            Box::new(m20260105_000023_payment::Migration),
            Box::new(m20260105_000024_royalty_ledger::Migration),
        ]
    }
}
