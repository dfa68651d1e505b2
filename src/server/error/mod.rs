//! Error types for the GymEdge server.
//!
//! Domain errors live in their own submodules and are aggregated by [`Error`]. Every error
//! implements `IntoResponse`: domain errors map to 4xx/502 responses carrying a message fit
//! for the dashboard, everything else becomes a logged 500.

pub mod auth;
pub mod config;
pub mod conflict;
pub mod external;
pub mod limit;
pub mod not_found;
pub mod retry;
pub mod validation;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, conflict::ConflictError, external::ExternalError,
        limit::LimitError, not_found::NotFoundError, validation::ValidationError,
    },
};

/// Main error type for the GymEdge server.
///
/// Aggregates domain errors and library errors so `?` works across repositories,
/// services and controllers.
#[derive(Error, Debug)]
pub enum Error {
    /// Missing or invalid environment variables.
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Login, OTP, session and permission failures.
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Invalid request input.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    /// A gym-scoped record that does not exist for the caller.
    #[error(transparent)]
    NotFoundError(#[from] NotFoundError),
    /// The request conflicts with existing data.
    #[error(transparent)]
    ConflictError(#[from] ConflictError),
    /// Rate limits and plan quotas.
    #[error(transparent)]
    LimitError(#[from] LimitError),
    /// Failures of the LLM, WhatsApp, SMS or payment gateways.
    #[error(transparent)]
    ExternalError(#[from] ExternalError),
    /// Failed to parse a value from a string or other format.
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Invariant violated inside GymEdge itself.
    #[error("Internal error: {0:?}")]
    InternalError(String),
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    #[error(transparent)]
    SchedulerError(#[from] tokio_cron_scheduler::JobSchedulerError),
    #[error(transparent)]
    ReqwestError(#[from] reqwest::Error),
    #[error(transparent)]
    SerdeJsonError(#[from] serde_json::Error),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::ValidationError(err) => err.into_response(),
            Self::NotFoundError(err) => err.into_response(),
            Self::ConflictError(err) => err.into_response(),
            Self::LimitError(err) => err.into_response(),
            Self::ExternalError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Builds the JSON error body shared by every domain error.
pub(crate) fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorDto {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Wraps any displayable error into a logged 500 Internal Server Error response.
///
/// The client only sees a generic message so internal details never leak.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        error_response(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::*;

    /// Expect database errors to be hidden behind a 500
    #[test]
    fn db_error_is_internal_server_error() {
        let resp = Error::DbErr(sea_orm::DbErr::Custom("boom".to_string())).into_response();

        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    /// Expect domain errors to keep their own status code
    #[test]
    fn domain_errors_delegate_status() {
        let not_found: Error = NotFoundError::Member.into();
        let conflict: Error = ConflictError::LeadAlreadyConverted.into();

        assert_eq!(not_found.into_response().status(), StatusCode::NOT_FOUND);
        assert_eq!(conflict.into_response().status(), StatusCode::CONFLICT);
    }
}
