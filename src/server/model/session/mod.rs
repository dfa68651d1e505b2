//! Session data models and utilities.
//!
//! Type-safe wrappers for the values GymEdge keeps in the Valkey-backed session store. Each
//! submodule owns one namespaced key with methods to insert, retrieve and remove it.

pub mod account_selection;
pub mod login_entity;
pub mod signup;
pub mod user;
