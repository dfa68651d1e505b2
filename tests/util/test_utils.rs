//! Helpers for calling handlers directly with a [`TestContext`].

use axum::{body::to_bytes, response::Response};
use gymedge::server::{
    config::Config, model::app::AppState, model::session::user::SessionUserId,
};
use gymedge_test_utils::TestContext;
use serde::de::DeserializeOwned;

/// Extension trait for TestContext to create the AppState handlers expect
pub trait TestContextExt {
    fn into_app_state(&self) -> AppState;
}

impl TestContextExt for TestContext {
    /// Development config: OTP bypass and WhatsApp simulation on, no API keys
    fn into_app_state(&self) -> AppState {
        AppState::new(self.db.clone(), Config::default()).unwrap()
    }
}

/// Stores the user ID in the test session as a completed login would
pub async fn login(test: &TestContext, user_id: i32) {
    SessionUserId::insert(&test.session, user_id).await.unwrap();
}

/// Deserializes a JSON response body
pub async fn read_json<T: DeserializeOwned>(resp: Response) -> T {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();

    serde_json::from_slice(&bytes).unwrap()
}
