//! Shared test scaffolding for the GymEdge workspace.
//!
//! Tests are written in two phases. A [`TestBuilder`] declares the tables and mock HTTP
//! endpoints a test needs, and `build()` turns that into a [`TestContext`] holding an
//! in-memory SQLite database, an in-memory session and a mockito server. Fixture helpers
//! hanging off the context insert gyms, staff, members and leads with sensible defaults.

pub mod builder;
pub mod context;
pub mod error;
pub mod fixtures;

pub use builder::TestBuilder;
pub use context::TestContext;
pub use error::TestError;

pub mod prelude {
    pub use crate::{TestBuilder, TestContext, TestError};
}
