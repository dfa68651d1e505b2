//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries for one table each and return `Result<_, DbErr>`. They
//! are generic over [`sea_orm::ConnectionTrait`] so services can run them inside a
//! transaction. Gym-owned tables take the gym ID on every read so records of another gym are
//! never visible; soft-deleted rows are excluded from all reads.

pub mod ai_usage;
pub mod billing;
pub mod communication;
pub mod enterprise;
pub mod fitness;
pub mod gym;
pub mod lead;
pub mod member;
pub mod user;

/// Start and end of a UTC day, for filtering timestamp columns by date
pub(crate) fn day_bounds(
    date: chrono::NaiveDate,
) -> (chrono::NaiveDateTime, chrono::NaiveDateTime) {
    let start = date.and_time(chrono::NaiveTime::MIN);

    (start, start + chrono::Duration::days(1))
}

/// `%term%` pattern for case-insensitive substring search against a lowercased column
pub(crate) fn like_pattern(term: &str) -> String {
    format!("%{}%", term.trim().to_lowercase())
}
