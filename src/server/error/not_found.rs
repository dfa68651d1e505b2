use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Record missing or outside the caller's gym.
///
/// Records of another gym are reported exactly like missing ones.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum NotFoundError {
    #[error("Gym not found.")]
    Gym,
    #[error("Member not found.")]
    Member,
    #[error("Membership plan not found.")]
    MembershipPlan,
    #[error("Lead not found.")]
    Lead,
    #[error("Attendance record not found.")]
    Attendance,
    #[error("Workout plan not found.")]
    WorkoutPlan,
    #[error("Diet plan not found.")]
    DietPlan,
    #[error("Automation not found.")]
    Automation,
    #[error("Subscription plan not found.")]
    SubscriptionPlan,
    #[error("Payment not found.")]
    Payment,
    #[error("Royalty ledger entry not found.")]
    RoyaltyLedger,
}

impl IntoResponse for NotFoundError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::NOT_FOUND, self.to_string())
    }
}
