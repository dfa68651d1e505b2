//! Test context returned by `TestBuilder::build`.
//!
//! The context owns an in-memory SQLite database, an in-memory session and a mockito
//! server standing in for the LLM, WhatsApp, Twilio and Razorpay APIs.

use std::sync::Arc;

use mockito::{Mock, Server, ServerGuard};
use sea_orm::{sea_query::TableCreateStatement, ConnectionTrait, Database, DatabaseConnection};
use tower_sessions::{MemoryStore, Session};

use crate::error::TestError;

/// Test environment produced by [`TestBuilder`](crate::TestBuilder).
///
/// ```ignore
/// let mut test = TestBuilder::new().with_tenant_tables().build().await?;
///
/// let gym = test.tenancy().insert_gym("Iron Paradise").await?;
/// let owner = test.user().insert_owner(gym.id, "9876543210").await?;
///
/// test.assert_mocks();
/// ```
pub struct TestContext {
    /// Connection to the in-memory SQLite database
    pub db: DatabaseConnection,
    /// Session backed by an in-memory store
    pub session: Session,

    pub(crate) server: ServerGuard,
    pub(crate) mocks: Vec<Mock>,
}

impl TestContext {
    pub(crate) async fn new() -> Result<Self, TestError> {
        let server = Server::new_async().await;

        let store = Arc::new(MemoryStore::default());
        let session = Session::new(None, store, None);

        let db = Database::connect("sqlite::memory:").await?;

        Ok(TestContext {
            db,
            session,
            server,
            mocks: Vec::new(),
        })
    }

    pub(crate) async fn with_tables(
        &self,
        stmts: Vec<TableCreateStatement>,
    ) -> Result<(), TestError> {
        for stmt in stmts {
            self.db.execute(&stmt).await?;
        }

        Ok(())
    }

    /// Base URL of the mock HTTP server, used in place of every third-party API URL.
    pub fn server_url(&self) -> String {
        self.server.url()
    }

    /// Mutable access to the mock server for endpoints created after `build()`.
    pub fn server(&mut self) -> &mut ServerGuard {
        &mut self.server
    }

    /// Assert all mock endpoints were called the expected number of times.
    ///
    /// # Panics
    /// Panics if any mock endpoint was not called as expected
    pub fn assert_mocks(&self) {
        for mock in &self.mocks {
            mock.assert();
        }
    }
}
