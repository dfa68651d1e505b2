//! Fixture helpers for inserting test data.
//!
//! Each submodule adds an accessor on [`TestContext`](crate::TestContext) returning a
//! fixture struct with insert helpers for one domain:
//!
//! - `tenancy` - subscription plans, gyms and the enterprise hierarchy
//! - `user` - staff accounts and location grants
//! - `member` - membership plans and members
//! - `lead` - sales leads
//! - `communications` - automations and quotes

pub mod communications;
pub mod lead;
pub mod member;
pub mod tenancy;
pub mod user;
