//! Request and response DTOs of the JSON API.

pub mod api;
pub mod auth;
pub mod billing;
pub mod communication;
pub mod dashboard;
pub mod enterprise;
pub mod fitness;
pub mod gym;
pub mod lead;
pub mod member;
