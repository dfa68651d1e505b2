use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        lead::{
            BulkConvertDto, BulkConvertResultDto, ConvertedLeadDto, CreateLeadDto, LeadDto,
            LeadListQuery, LeadSummaryDto, UpdateLeadDto,
        },
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::{
            app::AppState,
            auth::{CurrentUser, Permission},
        },
        service::lead::LeadService,
    },
};

pub static LEAD_TAG: &str = "leads";

async fn lead_manager(state: &AppState, session: &Session) -> Result<CurrentUser, Error> {
    let user = get_current_user(state, session).await?;
    user.require(&[Permission::GymStaff, Permission::ManageLeads])?;

    Ok(user)
}

/// List the gym's leads
#[utoipa::path(
    get,
    path = "/api/leads",
    tag = LEAD_TAG,
    params(LeadListQuery),
    responses(
        (status = 200, description = "Leads, newest first", body = Vec<LeadDto>),
        (status = 403, description = "Missing lead permissions", body = ErrorDto)
    ),
)]
pub async fn list_leads(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<LeadListQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    let leads = LeadService::new(&state.db)
        .list_leads(user.gym_id()?, &filter)
        .await?;

    Ok((StatusCode::OK, Json(leads)))
}

/// Capture a new lead
#[utoipa::path(
    post,
    path = "/api/leads",
    tag = LEAD_TAG,
    request_body = CreateLeadDto,
    responses(
        (status = 201, description = "Lead created", body = LeadDto),
        (status = 400, description = "Invalid lead fields", body = ErrorDto)
    ),
)]
pub async fn create_lead(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateLeadDto>,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    let lead = LeadService::new(&state.db)
        .create_lead(user.gym_id()?, body)
        .await?;

    Ok((StatusCode::CREATED, Json(lead)))
}

/// Get a lead
#[utoipa::path(
    get,
    path = "/api/leads/{id}",
    tag = LEAD_TAG,
    params(("id" = i32, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "The lead", body = LeadDto),
        (status = 404, description = "Lead not found", body = ErrorDto)
    ),
)]
pub async fn get_lead(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    let lead = LeadService::new(&state.db)
        .get_lead(user.gym_id()?, id)
        .await?;

    Ok((StatusCode::OK, Json(lead)))
}

/// Update a lead, moving it to contacted stamps the follow up
#[utoipa::path(
    patch,
    path = "/api/leads/{id}",
    tag = LEAD_TAG,
    params(("id" = i32, Path, description = "Lead ID")),
    request_body = UpdateLeadDto,
    responses(
        (status = 200, description = "Updated lead", body = LeadDto),
        (status = 404, description = "Lead not found", body = ErrorDto)
    ),
)]
pub async fn update_lead(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<UpdateLeadDto>,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    let lead = LeadService::new(&state.db)
        .update_lead(user.gym_id()?, id, body)
        .await?;

    Ok((StatusCode::OK, Json(lead)))
}

/// Delete a lead
#[utoipa::path(
    delete,
    path = "/api/leads/{id}",
    tag = LEAD_TAG,
    params(("id" = i32, Path, description = "Lead ID")),
    responses(
        (status = 204, description = "Lead deleted"),
        (status = 404, description = "Lead not found", body = ErrorDto)
    ),
)]
pub async fn delete_lead(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    LeadService::new(&state.db)
        .delete_lead(user.gym_id()?, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Convert a lead into a member
#[utoipa::path(
    post,
    path = "/api/leads/{id}/convert",
    tag = LEAD_TAG,
    params(("id" = i32, Path, description = "Lead ID")),
    responses(
        (status = 201, description = "Member created from the lead", body = ConvertedLeadDto),
        (status = 404, description = "Lead not found", body = ErrorDto),
        (status = 409, description = "Lead already converted or phone in use", body = ErrorDto)
    ),
)]
pub async fn convert_lead(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    let converted = LeadService::new(&state.db)
        .convert_lead(user.gym_id()?, id)
        .await?;

    Ok((StatusCode::CREATED, Json(converted)))
}

/// Convert several leads, reporting each failure separately
#[utoipa::path(
    post,
    path = "/api/leads/bulk-convert",
    tag = LEAD_TAG,
    request_body = BulkConvertDto,
    responses(
        (status = 200, description = "Converted and failed leads", body = BulkConvertResultDto),
        (status = 403, description = "Missing lead permissions", body = ErrorDto)
    ),
)]
pub async fn bulk_convert_leads(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<BulkConvertDto>,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    let result = LeadService::new(&state.db)
        .bulk_convert(user.gym_id()?, &body.ids)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

/// Funnel counts and conversion rate
#[utoipa::path(
    get,
    path = "/api/leads/summary",
    tag = LEAD_TAG,
    responses(
        (status = 200, description = "Lead summary", body = LeadSummaryDto),
        (status = 403, description = "Missing lead permissions", body = ErrorDto)
    ),
)]
pub async fn lead_summary(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    let summary = LeadService::new(&state.db)
        .lead_summary(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(summary)))
}

/// Score a lead and recommend the next action
#[utoipa::path(
    post,
    path = "/api/leads/{id}/score",
    tag = LEAD_TAG,
    params(("id" = i32, Path, description = "Lead ID")),
    responses(
        (status = 200, description = "Lead with its new score", body = LeadDto),
        (status = 404, description = "Lead not found", body = ErrorDto)
    ),
)]
pub async fn score_lead(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = lead_manager(&state, &session).await?;

    let lead = LeadService::new(&state.db)
        .score_lead(user.gym_id()?, id)
        .await?;

    Ok((StatusCode::OK, Json(lead)))
}
