pub use super::ai_usage_log::Entity as AiUsageLog;
pub use super::attendance::Entity as Attendance;
pub use super::brand::Entity as Brand;
pub use super::contact_query::Entity as ContactQuery;
pub use super::diet_plan::Entity as DietPlan;
pub use super::gym::Entity as Gym;
pub use super::gym_subscription::Entity as GymSubscription;
pub use super::gym_user::Entity as GymUser;
pub use super::gym_user_location::Entity as GymUserLocation;
pub use super::holding_company::Entity as HoldingCompany;
pub use super::lead::Entity as Lead;
pub use super::member::Entity as Member;
pub use super::membership_plan::Entity as MembershipPlan;
pub use super::organization::Entity as Organization;
pub use super::otp_session::Entity as OtpSession;
pub use super::payment::Entity as Payment;
pub use super::progress_log::Entity as ProgressLog;
pub use super::quote::Entity as Quote;
pub use super::royalty_ledger::Entity as RoyaltyLedger;
pub use super::subscription_plan::Entity as SubscriptionPlan;
pub use super::whatsapp_automation::Entity as WhatsappAutomation;
pub use super::whatsapp_message::Entity as WhatsappMessage;
pub use super::whatsapp_message_log::Entity as WhatsappMessageLog;
pub use super::workout_plan::Entity as WorkoutPlan;
