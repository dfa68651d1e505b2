//! Business logic of GymEdge.
//!
//! Services sit between the controllers and the repositories. They enforce gym scoping,
//! validate input, run multi-step writes in transactions and talk to the LLM, WhatsApp,
//! Twilio and Razorpay APIs.

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
pub mod retry;
