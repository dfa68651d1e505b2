use sea_orm::DbErr;

use super::Error;

/// Strategy for handling errors in a retry context
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff (transient failures)
    Retry,
    /// Failed permanently (bad request, missing data, bugs)
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::ReqwestError(reqwest_error) => match reqwest_error.status() {
                // Gateway temporarily unavailable
                Some(status) if status.is_server_error() => ErrorRetryStrategy::Retry,
                Some(_) => ErrorRetryStrategy::Fail,
                // Network error or connection issue
                None => ErrorRetryStrategy::Retry,
            },

            Self::DbErr(db_err) => match db_err {
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,
                // Query, constraint and conversion errors won't resolve with a retry
                _ => ErrorRetryStrategy::Fail,
            },

            // Could be Valkey connection issues
            Self::SessionError(_) => ErrorRetryStrategy::Retry,
            Self::SessionRedisError(_) => ErrorRetryStrategy::Retry,

            Self::ConfigError(_)
            | Self::AuthError(_)
            | Self::ValidationError(_)
            | Self::NotFoundError(_)
            | Self::ConflictError(_)
            | Self::LimitError(_)
            | Self::ExternalError(_)
            | Self::ParseError(_)
            | Self::InternalError(_)
            | Self::SchedulerError(_)
            | Self::SerdeJsonError(_) => ErrorRetryStrategy::Fail,
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbErr, RuntimeErr};

    use crate::server::error::{not_found::NotFoundError, retry::ErrorRetryStrategy, Error};

    /// Expect connection errors to be retried
    #[test]
    fn retries_connection_errors() {
        let err = Error::DbErr(DbErr::Conn(RuntimeErr::Internal("down".to_string())));

        assert!(matches!(err.to_retry_strategy(), ErrorRetryStrategy::Retry));
    }

    /// Expect query and domain errors to fail immediately
    #[test]
    fn fails_permanent_errors() {
        let query = Error::DbErr(DbErr::Custom("bad query".to_string()));
        let not_found: Error = NotFoundError::Member.into();

        assert!(matches!(query.to_retry_strategy(), ErrorRetryStrategy::Fail));
        assert!(matches!(not_found.to_retry_strategy(), ErrorRetryStrategy::Fail));
    }
}
