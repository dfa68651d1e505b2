//! Cron scheduler for GymEdge's periodic maintenance.
//!
//! Jobs clean up expired OTPs, run the WhatsApp automations, reminders and daily quotes,
//! recompute churn and lead scores, and generate the monthly royalty ledgers. A failing run
//! is logged and retried at the next tick.

use std::sync::Arc;

use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::Error, model::app::AppState};

pub mod config;
pub mod jobs;

pub struct Scheduler {
    state: AppState,
    sched: JobScheduler,
}

impl Scheduler {
    /// Creates a new instance of [`Scheduler`]
    pub async fn new(state: AppState) -> Result<Self, Error> {
        let sched = JobScheduler::new().await?;
        Ok(Self { state, sched })
    }

    /// Registers every job and starts the scheduler.
    ///
    /// # Returns
    /// - `Ok(())`: all jobs registered and the scheduler is running
    /// - `Err(Error)`: invalid cron expression or scheduler failure
    pub async fn start(mut self) -> Result<(), Error> {
        self.schedule_job(config::OTP_CLEANUP_CRON, "expired OTP", jobs::cleanup_expired_otps)
            .await?;
        self.schedule_job(config::AUTOMATIONS_CRON, "automation message", jobs::run_automations)
            .await?;
        self.schedule_job(
            config::RENEWAL_REMINDERS_CRON,
            "renewal reminder",
            jobs::send_renewal_reminders,
        )
        .await?;
        self.schedule_job(config::DAILY_QUOTES_CRON, "daily quote", jobs::send_daily_quotes)
            .await?;
        self.schedule_job(config::CHURN_SCORES_CRON, "churn score", jobs::rescore_churn)
            .await?;
        self.schedule_job(config::LEAD_SCORES_CRON, "lead score", jobs::rescore_leads)
            .await?;
        self.schedule_job(
            config::ROYALTY_LEDGERS_CRON,
            "royalty ledger",
            jobs::generate_royalty_ledgers,
        )
        .await?;

        self.sched.start().await?;

        Ok(())
    }

    /// Schedules a recurring job with the specified cron expression.
    ///
    /// The job receives a clone of the application state and logs the count it returns, or
    /// the error it failed with.
    pub async fn schedule_job<F, Fut>(
        &mut self,
        cron: &str,
        name: &str,
        function: F,
    ) -> Result<(), Error>
    where
        F: Fn(AppState) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<usize, Error>> + Send + 'static,
    {
        let state = self.state.clone();
        let name = name.to_string();
        let function = Arc::new(function);

        self.sched
            .add(Job::new_async(cron, move |_, _| {
                let state = state.clone();
                let name = name.clone();
                let function = Arc::clone(&function);

                Box::pin(async move {
                    match function(state).await {
                        Ok(count) => tracing::info!("Processed {} {} record(s)", count, name),
                        Err(e) => tracing::error!("Error running {} job: {:?}", name, e),
                    }
                })
            })?)
            .await?;

        Ok(())
    }
}
