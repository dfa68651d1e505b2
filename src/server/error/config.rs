//! Environment configuration failures raised by `Config::from_env` at startup.

use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::server::error::InternalServerError;

#[derive(Error, Debug)]
pub enum ConfigError {
    /// `DATABASE_URL` or `VALKEY_URL` is unset or blank
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),
    /// A flag, number or provider name that does not parse
    #[error("Invalid value for environment variable {var}: {reason}")]
    InvalidEnvValue { var: String, reason: String },
}

/// Configuration is only read at boot, a request never sees these details.
impl IntoResponse for ConfigError {
    fn into_response(self) -> Response {
        InternalServerError(self).into_response()
    }
}
