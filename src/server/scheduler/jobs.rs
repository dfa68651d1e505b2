//! Bodies of the background jobs. Each returns how many records it touched.

use chrono::Datelike;

use crate::server::{
    data::gym::GymRepository,
    error::Error,
    model::app::AppState,
    service::{
        auth::otp::OtpService, communication::automation::AutomationService,
        dashboard::DashboardService, enterprise::EnterpriseService, lead::LeadService,
    },
    util::time::{previous_month_start, today},
};

pub async fn cleanup_expired_otps(state: AppState) -> Result<usize, Error> {
    let deleted = OtpService::new(&state.db, &state.config, &state.http)
        .cleanup_expired_otps()
        .await?;

    Ok(deleted as usize)
}

pub async fn run_automations(state: AppState) -> Result<usize, Error> {
    let summary = AutomationService::new(&state.db, &state.http, &state.config)
        .run_automations(today())
        .await?;

    tracing::info!(
        gyms = summary.gyms,
        skipped = summary.skipped,
        failed = summary.failed,
        "Automation run finished"
    );

    Ok(summary.sent as usize)
}

pub async fn send_renewal_reminders(state: AppState) -> Result<usize, Error> {
    let summary = AutomationService::new(&state.db, &state.http, &state.config)
        .send_renewal_reminders(today())
        .await?;

    if summary.failed > 0 {
        tracing::warn!(failed = summary.failed, "Some renewal reminders failed");
    }

    Ok(summary.sent as usize)
}

pub async fn send_daily_quotes(state: AppState) -> Result<usize, Error> {
    let sent = AutomationService::new(&state.db, &state.http, &state.config)
        .send_daily_quotes(today())
        .await?;

    Ok(sent as usize)
}

pub async fn rescore_churn(state: AppState) -> Result<usize, Error> {
    DashboardService::new(&state.db).rescore_churn(today()).await
}

/// Rescores open leads gym by gym; one failing gym does not stop the others
pub async fn rescore_leads(state: AppState) -> Result<usize, Error> {
    let gyms = GymRepository::new(&state.db).find_active().await?;
    let service = LeadService::new(&state.db);

    let mut scored = 0;
    for gym in gyms {
        match service.rescore_gym_leads(gym.id).await {
            Ok(count) => scored += count,
            Err(e) => tracing::error!(gym_id = gym.id, "Failed to rescore leads: {:?}", e),
        }
    }

    Ok(scored)
}

/// Generates the royalty ledgers of the month before the current one
pub async fn generate_royalty_ledgers(state: AppState) -> Result<usize, Error> {
    let month = previous_month_start(today());

    EnterpriseService::new(&state.db)
        .generate_all_ledgers(month.year(), month.month())
        .await
}
