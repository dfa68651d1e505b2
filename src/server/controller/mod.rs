//! Axum handlers for the GymEdge JSON API.
//!
//! Handlers load the session user, check the permissions an endpoint needs, call a service
//! and wrap its result in a response. Each handler carries its OpenAPI description.

pub mod ai;
pub mod auth;
pub mod billing;
pub mod communication;
pub mod dashboard;
pub mod enterprise;
pub mod fitness;
pub mod gym;
pub mod lead;
pub mod member;
pub mod util;
