use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Plan quota exhausted.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LimitError {
    #[error("Monthly AI query limit reached for your plan.")]
    AiQuotaExceeded,
}

impl IntoResponse for LimitError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        error_response(StatusCode::TOO_MANY_REQUESTS, self.to_string())
    }
}
