use std::collections::BTreeMap;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{model::api::FieldErrorDto, server::error::error_response};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// A single message shown to the user as is
    #[error("{0}")]
    Invalid(String),
    /// Per-field messages, keyed by field name
    #[error("Invalid input: {0:?}")]
    Fields(BTreeMap<String, String>),
}

impl ValidationError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid(message.into())
    }
}

impl IntoResponse for ValidationError {
    fn into_response(self) -> Response {
        tracing::debug!("{}", self);

        match self {
            Self::Invalid(message) => error_response(StatusCode::BAD_REQUEST, message),
            Self::Fields(fields) => (
                StatusCode::BAD_REQUEST,
                Json(FieldErrorDto {
                    error: "Invalid input.".to_string(),
                    fields,
                }),
            )
                .into_response(),
        }
    }
}
