//! Integration tests for the HTTP handlers.
//!
//! Handlers are called directly with an in-memory database and session, checking the
//! status codes and bodies the dashboard relies on.

mod ai;
mod auth;
mod billing;
mod communication;
mod dashboard;
mod enterprise;
mod fitness;
mod gym;
mod lead;
mod member;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use gymedge_test_utils::prelude::*;

use crate::util::{login, read_json, TestContextExt};
