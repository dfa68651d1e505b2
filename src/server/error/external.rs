use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Failures of third-party gateways: LLM providers, Twilio, Razorpay.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ExternalError {
    #[error("{0}")]
    AiNotConfigured(String),
    #[error("AI returned an invalid response: {0}")]
    AiInvalidResponse(String),
    #[error("AI request failed: {0}")]
    AiRequestFailed(String),
    #[error("SMS gateway request failed: {0}")]
    SmsFailed(String),
    #[error("Payment gateway error: {0}")]
    PaymentGateway(String),
    #[error("Payment gateway not configured.")]
    PaymentNotConfigured,
}

impl IntoResponse for ExternalError {
    fn into_response(self) -> Response {
        tracing::warn!("{}", self);

        error_response(StatusCode::BAD_GATEWAY, self.to_string())
    }
}
