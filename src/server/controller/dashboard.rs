use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        dashboard::{BusinessHealthDto, DashboardDto, EnterpriseFlagDto},
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::{app::AppState, auth::Permission},
        service::dashboard::DashboardService,
        util::time::now,
    },
};

pub static DASHBOARD_TAG: &str = "dashboard";

/// Headline gym statistics and insights
///
/// Enterprise accounts get `{"enterprise": true}` and use the enterprise dashboards instead.
#[utoipa::path(
    get,
    path = "/api/dashboard",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Gym dashboard or the enterprise flag", body = DashboardDto),
        (status = 403, description = "User has no gym", body = ErrorDto)
    ),
)]
pub async fn dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;

    if user.is_enterprise() {
        return Ok((
            StatusCode::OK,
            Json(DashboardDto::Enterprise(EnterpriseFlagDto { enterprise: true })),
        ));
    }
    user.require(&[Permission::GymStaff])?;

    let stats = DashboardService::new(&state.db)
        .dashboard_stats(user.gym_id()?, now(), user.has(Permission::ViewRevenue))
        .await?;

    Ok((StatusCode::OK, Json(DashboardDto::Gym(Box::new(stats)))))
}

/// Revenue trend, retention and members needing follow up
#[utoipa::path(
    get,
    path = "/api/dashboard/health",
    tag = DASHBOARD_TAG,
    responses(
        (status = 200, description = "Business health", body = BusinessHealthDto),
        (status = 403, description = "User has no gym", body = ErrorDto)
    ),
)]
pub async fn business_health(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::GymStaff])?;

    let health = DashboardService::new(&state.db)
        .business_health(user.gym_id()?, now(), user.has(Permission::ViewRevenue))
        .await?;

    Ok((StatusCode::OK, Json(health)))
}
