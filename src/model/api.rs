use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// The response when one or more request fields failed validation
#[derive(Serialize, Deserialize, ToSchema)]
pub struct FieldErrorDto {
    pub error: String,
    /// Error message per offending field
    pub fields: BTreeMap<String, String>,
}

/// Plain acknowledgement message
#[derive(Serialize, Deserialize, ToSchema)]
pub struct MessageDto {
    pub message: String,
}
