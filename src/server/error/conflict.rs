use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConflictError {
    #[error("Member with this phone number already exists.")]
    DuplicateMemberPhone,
    #[error("Lead is already converted.")]
    LeadAlreadyConverted,
    #[error("Member is already checked in.")]
    AlreadyCheckedIn,
    #[error("Member is already checked out.")]
    AlreadyCheckedOut,
    #[error("Payment has already been processed.")]
    PaymentAlreadyProcessed,
}

impl IntoResponse for ConflictError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::CONFLICT, self.to_string())
    }
}
