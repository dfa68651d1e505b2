//! Small helpers shared by services: code and slug generation, phone normalization, calendar
//! arithmetic and CSV parsing.

pub mod code;
pub mod csv;
pub mod phone;
pub mod slug;
pub mod time;
