//! Pending multi-account selection after a verified OTP.

use chrono::{Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_ACCOUNT_SELECTION_KEY: &str = "gymedge:auth:selection";

/// How long the user has to pick an account
pub const SELECTION_TTL: Duration = Duration::minutes(5);

#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct SessionAccountSelection {
    pub phone: String,
    pub expires_at: NaiveDateTime,
}

impl SessionAccountSelection {
    pub async fn insert(session: &Session, phone: &str) -> Result<(), Error> {
        let selection = SessionAccountSelection {
            phone: phone.to_string(),
            expires_at: Utc::now().naive_utc() + SELECTION_TTL,
        };

        session
            .insert(SESSION_ACCOUNT_SELECTION_KEY, selection)
            .await?;

        Ok(())
    }

    /// Returns the verified phone of an unexpired selection
    pub async fn get_phone(session: &Session) -> Result<Option<String>, Error> {
        let selection = session
            .get::<SessionAccountSelection>(SESSION_ACCOUNT_SELECTION_KEY)
            .await?;

        Ok(selection
            .filter(|s| s.expires_at > Utc::now().naive_utc())
            .map(|s| s.phone))
    }

    pub async fn remove(session: &Session) -> Result<(), Error> {
        session
            .remove::<SessionAccountSelection>(SESSION_ACCOUNT_SELECTION_KEY)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use gymedge_test_utils::prelude::*;

    use super::{SessionAccountSelection, SESSION_ACCOUNT_SELECTION_KEY};

    /// Expect the phone of a fresh selection to be returned
    #[tokio::test]
    async fn returns_phone_for_fresh_selection() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        SessionAccountSelection::insert(&test.session, "9876543210")
            .await
            .unwrap();
        let phone = SessionAccountSelection::get_phone(&test.session).await.unwrap();

        assert_eq!(phone.as_deref(), Some("9876543210"));

        Ok(())
    }

    /// Expect None once the selection window has passed
    #[tokio::test]
    async fn ignores_expired_selection() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;
        test.session
            .insert(
                SESSION_ACCOUNT_SELECTION_KEY,
                SessionAccountSelection {
                    phone: "9876543210".to_string(),
                    expires_at: Utc::now().naive_utc() - Duration::seconds(1),
                },
            )
            .await?;

        let phone = SessionAccountSelection::get_phone(&test.session).await.unwrap();

        assert!(phone.is_none());

        Ok(())
    }
}
