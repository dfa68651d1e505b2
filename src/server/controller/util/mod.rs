//! Helpers shared by the controllers: loading the session user and reading client details.

pub mod client;
pub mod get_user;
