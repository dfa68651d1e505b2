use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication credentials were not provided.")]
    NotLoggedIn,
    #[error("User ID {0} not found in database despite having an active session")]
    UserNotInDatabase(i32),
    /// Carries the message of the permission that denied the request
    #[error("{0}")]
    PermissionDenied(&'static str),
    #[error("{0}")]
    AccessDenied(String),
    #[error("{0}")]
    InvalidCredentials(String),
    #[error("{0}")]
    OtpInvalid(String),
    #[error("OTP already sent. Please wait before requesting again.")]
    OtpRateLimited,
    #[error("Failed to send OTP. Please try again.")]
    OtpDeliveryFailed,
    #[error("Invalid or expired selection session.")]
    SelectionExpired,
    #[error("Signup session expired. Please start again.")]
    SignupExpired,
    #[error("Account deactivated.")]
    AccountDeactivated,
}

impl AuthError {
    fn status(&self) -> StatusCode {
        match self {
            Self::NotLoggedIn
            | Self::UserNotInDatabase(_)
            | Self::InvalidCredentials(_)
            | Self::SelectionExpired => StatusCode::UNAUTHORIZED,
            Self::PermissionDenied(_) | Self::AccessDenied(_) | Self::AccountDeactivated => {
                StatusCode::FORBIDDEN
            }
            Self::OtpInvalid(_) | Self::SignupExpired => StatusCode::BAD_REQUEST,
            Self::OtpRateLimited => StatusCode::TOO_MANY_REQUESTS,
            Self::OtpDeliveryFailed => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(user_id = %user_id, "{}", self);

                error_response(
                    StatusCode::UNAUTHORIZED,
                    AuthError::NotLoggedIn.to_string(),
                )
            }
            err => {
                tracing::debug!("{}", err);

                error_response(err.status(), err.to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use axum::{http::StatusCode, response::IntoResponse};

    use super::AuthError;

    /// Expect session and credential failures to be 401 and permission failures 403
    #[test]
    fn maps_status_codes() {
        let cases = [
            (AuthError::NotLoggedIn, StatusCode::UNAUTHORIZED),
            (AuthError::UserNotInDatabase(1), StatusCode::UNAUTHORIZED),
            (
                AuthError::PermissionDenied("denied"),
                StatusCode::FORBIDDEN,
            ),
            (AuthError::AccountDeactivated, StatusCode::FORBIDDEN),
            (
                AuthError::OtpInvalid("Invalid OTP.".to_string()),
                StatusCode::BAD_REQUEST,
            ),
            (AuthError::OtpRateLimited, StatusCode::TOO_MANY_REQUESTS),
            (AuthError::OtpDeliveryFailed, StatusCode::BAD_GATEWAY),
        ];

        for (err, status) in cases {
            assert_eq!(err.into_response().status(), status);
        }
    }
}
