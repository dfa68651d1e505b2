use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        enterprise::{
            HoldingDashboardDto, MarkRoyaltyPaidDto, OrganizationDashboardDto, RoyaltyEntryDto,
            RoyaltyReportDto,
        },
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::{app::AppState, auth::Permission},
        service::enterprise::EnterpriseService,
    },
};

pub static ENTERPRISE_TAG: &str = "enterprises";

/// Group-wide statistics for a holding company admin
#[utoipa::path(
    get,
    path = "/api/enterprises/dashboard/holding",
    tag = ENTERPRISE_TAG,
    responses(
        (status = 200, description = "Holding dashboard", body = HoldingDashboardDto),
        (status = 400, description = "User not linked to a Holding Company", body = ErrorDto),
        (status = 403, description = "Not a holding admin", body = ErrorDto)
    ),
)]
pub async fn holding_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::HoldingAdmin])?;

    let dashboard = EnterpriseService::new(&state.db)
        .holding_dashboard(&user.0)
        .await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// Location statistics for an organization admin
#[utoipa::path(
    get,
    path = "/api/enterprises/dashboard/organization",
    tag = ENTERPRISE_TAG,
    responses(
        (status = 200, description = "Organization dashboard", body = OrganizationDashboardDto),
        (status = 400, description = "User not linked to an Organization", body = ErrorDto),
        (status = 403, description = "Not an organization admin", body = ErrorDto)
    ),
)]
pub async fn organization_dashboard(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::OrgAdmin])?;

    let dashboard = EnterpriseService::new(&state.db)
        .organization_dashboard(&user.0)
        .await?;

    Ok((StatusCode::OK, Json(dashboard)))
}

/// Royalty terms and monthly ledger history of the user's organization
#[utoipa::path(
    get,
    path = "/api/enterprises/royalties",
    tag = ENTERPRISE_TAG,
    responses(
        (status = 200, description = "Royalty report", body = RoyaltyReportDto),
        (status = 400, description = "User not linked to an Organization", body = ErrorDto),
        (status = 403, description = "Not an organization admin", body = ErrorDto)
    ),
)]
pub async fn royalty_report(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::OrgAdmin])?;

    let report = EnterpriseService::new(&state.db)
        .royalty_report(&user.0)
        .await?;

    Ok((StatusCode::OK, Json(report)))
}

/// Record a royalty payment
#[utoipa::path(
    post,
    path = "/api/enterprises/royalties/{id}/paid",
    tag = ENTERPRISE_TAG,
    params(("id" = i32, Path, description = "Royalty ledger ID")),
    request_body = MarkRoyaltyPaidDto,
    responses(
        (status = 200, description = "Ledger marked paid", body = RoyaltyEntryDto),
        (status = 403, description = "Not an admin of the ledger's brand", body = ErrorDto),
        (status = 404, description = "Ledger not found", body = ErrorDto)
    ),
)]
pub async fn mark_royalty_paid(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<MarkRoyaltyPaidDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    if !user.0.is_superuser {
        user.require(&[Permission::BrandAdmin])?;
    }

    let entry = EnterpriseService::new(&state.db)
        .mark_ledger_paid(&user.0, id, body.transaction_ref)
        .await?;

    Ok((StatusCode::OK, Json(entry)))
}
