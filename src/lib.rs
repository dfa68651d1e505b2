//! GymEdge: multi-tenant gym management backend.
//!
//! `model` holds the JSON DTOs shared by the HTTP API, `server` holds everything that
//! runs on the backend.

pub mod model;
pub mod server;
