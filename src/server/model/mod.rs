//! Server application models and type definitions.
//!
//! Application state shared by handlers and jobs, the authenticated user with its permission
//! checks, and typed wrappers for the values kept in the session store.

pub mod app;
pub mod auth;
pub mod session;
