//! Attendance, body progress and AI-generated plans.

pub mod attendance;
pub mod diet_plan;
pub mod progress;
pub mod workout_plan;
