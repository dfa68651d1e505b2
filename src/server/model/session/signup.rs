//! Owner signup waiting for phone verification.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::Error;

pub const SESSION_PENDING_SIGNUP_KEY: &str = "gymedge:auth:signup";

/// Validated signup form. The password is stored as an argon2 hash only.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PendingSignup {
    pub gym_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub password_hash: String,
    pub city: Option<String>,
    pub plan_slug: Option<String>,
}

pub struct SessionPendingSignup;

impl SessionPendingSignup {
    pub async fn insert(session: &Session, signup: &PendingSignup) -> Result<(), Error> {
        session.insert(SESSION_PENDING_SIGNUP_KEY, signup).await?;

        Ok(())
    }

    pub async fn get(session: &Session) -> Result<Option<PendingSignup>, Error> {
        Ok(session.get(SESSION_PENDING_SIGNUP_KEY).await?)
    }

    pub async fn remove(session: &Session) -> Result<(), Error> {
        session
            .remove::<PendingSignup>(SESSION_PENDING_SIGNUP_KEY)
            .await?;

        Ok(())
    }
}
