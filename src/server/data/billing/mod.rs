//! SaaS subscription plans, gym subscriptions and payments.

pub mod gym_subscription;
pub mod payment;
pub mod subscription_plan;
