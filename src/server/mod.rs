//! Server application core modules.
//!
//! Everything that runs on the GymEdge backend: HTTP routing and handlers, sessions and
//! role-based permissions, SeaORM repositories, business services, the integrations with
//! Twilio, WhatsApp, Razorpay and the LLM providers, and the cron scheduler.

pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod scheduler;
pub mod service;
pub mod startup;
pub mod util;
