//! Calendar helpers for billing periods, ledgers and reports.

use chrono::{Datelike, Months, NaiveDate, NaiveDateTime, Utc};

/// Current UTC date
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Current UTC timestamp as stored in the database
pub fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap_or(date)
}

pub fn next_month_start(date: NaiveDate) -> NaiveDate {
    add_months(month_start(date), 1)
}

pub fn previous_month_start(date: NaiveDate) -> NaiveDate {
    month_start(date)
        .checked_sub_months(Months::new(1))
        .unwrap_or(date)
}

/// Adds calendar months, clamping to the last day of shorter months (31 Jan + 1 = 28/29 Feb).
/// Negative values are treated as zero.
pub fn add_months(date: NaiveDate, months: i32) -> NaiveDate {
    date.checked_add_months(Months::new(months.max(0) as u32))
        .unwrap_or(date)
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn finds_month_boundaries() {
        assert_eq!(month_start(date(2025, 3, 17)), date(2025, 3, 1));
        assert_eq!(next_month_start(date(2025, 12, 31)), date(2026, 1, 1));
        assert_eq!(previous_month_start(date(2025, 1, 15)), date(2024, 12, 1));
    }

    /// Expect month end clamping on short months
    #[test]
    fn clamps_to_month_end() {
        assert_eq!(add_months(date(2025, 1, 31), 1), date(2025, 2, 28));
        assert_eq!(add_months(date(2024, 1, 31), 1), date(2024, 2, 29));
        assert_eq!(add_months(date(2025, 5, 15), 12), date(2026, 5, 15));
        assert_eq!(add_months(date(2025, 5, 15), 0), date(2025, 5, 15));
    }
}
