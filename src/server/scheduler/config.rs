//! Cron expressions of the background jobs. Six fields, seconds first, evaluated in UTC.

/// Hourly at the top of the hour
pub const OTP_CLEANUP_CRON: &str = "0 0 * * * *";

/// 03:30 UTC (09:00 IST)
pub const AUTOMATIONS_CRON: &str = "0 30 3 * * *";

/// 04:30 UTC (10:00 IST)
pub const RENEWAL_REMINDERS_CRON: &str = "0 30 4 * * *";

/// 01:30 UTC (07:00 IST)
pub const DAILY_QUOTES_CRON: &str = "0 30 1 * * *";

/// 21:00 UTC (02:30 IST)
pub const CHURN_SCORES_CRON: &str = "0 0 21 * * *";

/// 21:30 UTC (03:00 IST)
pub const LEAD_SCORES_CRON: &str = "0 30 21 * * *";

/// 20:00 UTC on the 1st of each month, covering the month that just ended
pub const ROYALTY_LEDGERS_CRON: &str = "0 0 20 1 * *";

#[cfg(test)]
mod tests {
    use tokio_cron_scheduler::Job;

    use super::*;

    /// Expect every job expression to be accepted by the cron parser
    #[test]
    fn expressions_parse() {
        for cron in [
            OTP_CLEANUP_CRON,
            AUTOMATIONS_CRON,
            RENEWAL_REMINDERS_CRON,
            DAILY_QUOTES_CRON,
            CHURN_SCORES_CRON,
            LEAD_SCORES_CRON,
            ROYALTY_LEDGERS_CRON,
        ] {
            let job = Job::new_async(cron, |_, _| Box::pin(async {}));

            assert!(job.is_ok(), "{}", cron);
        }
    }
}
