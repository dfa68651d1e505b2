//! WhatsApp messages, automations, quotes and contact queries.

pub mod automation;
pub mod contact;
pub mod message;
pub mod message_log;
pub mod quote;
