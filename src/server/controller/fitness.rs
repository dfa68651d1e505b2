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
        fitness::{AttendanceDto, CreateProgressLogDto, ProgressLogDto},
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::{
            app::AppState,
            auth::{CurrentUser, Permission},
        },
        service::fitness::FitnessService,
    },
};

pub static FITNESS_TAG: &str = "fitness";

async fn gym_staff(state: &AppState, session: &Session) -> Result<CurrentUser, Error> {
    let user = get_current_user(state, session).await?;
    user.require(&[Permission::GymStaff])?;

    Ok(user)
}

/// Check a member in
#[utoipa::path(
    post,
    path = "/api/members/{id}/check-in",
    tag = FITNESS_TAG,
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 201, description = "Attendance opened", body = AttendanceDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 409, description = "Member is already checked in today", body = ErrorDto)
    ),
)]
pub async fn check_in(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let attendance = FitnessService::new(&state.db)
        .check_in(user.gym_id()?, user.trainer_scope(), id)
        .await?;

    Ok((StatusCode::CREATED, Json(attendance)))
}

/// Check a member out of an open attendance
#[utoipa::path(
    post,
    path = "/api/attendance/{id}/check-out",
    tag = FITNESS_TAG,
    params(("id" = i32, Path, description = "Attendance ID")),
    responses(
        (status = 200, description = "Attendance closed with its duration", body = AttendanceDto),
        (status = 404, description = "Attendance not found", body = ErrorDto),
        (status = 409, description = "Already checked out", body = ErrorDto)
    ),
)]
pub async fn check_out(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let attendance = FitnessService::new(&state.db)
        .check_out(user.gym_id()?, id)
        .await?;

    Ok((StatusCode::OK, Json(attendance)))
}

/// A member's attendance, newest first
#[utoipa::path(
    get,
    path = "/api/members/{id}/attendance",
    tag = FITNESS_TAG,
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Attendance history", body = Vec<AttendanceDto>),
        (status = 404, description = "Member not found", body = ErrorDto)
    ),
)]
pub async fn attendance_history(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let history = FitnessService::new(&state.db)
        .attendance_history(user.gym_id()?, user.trainer_scope(), id)
        .await?;

    Ok((StatusCode::OK, Json(history)))
}

/// A member's progress logs, newest first
#[utoipa::path(
    get,
    path = "/api/members/{id}/progress",
    tag = FITNESS_TAG,
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "Progress logs", body = Vec<ProgressLogDto>),
        (status = 404, description = "Member not found", body = ErrorDto)
    ),
)]
pub async fn list_progress(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let logs = FitnessService::new(&state.db)
        .list_progress(user.gym_id()?, user.trainer_scope(), id)
        .await?;

    Ok((StatusCode::OK, Json(logs)))
}

/// Record body measurements for a member
#[utoipa::path(
    post,
    path = "/api/members/{id}/progress",
    tag = FITNESS_TAG,
    params(("id" = i32, Path, description = "Member ID")),
    request_body = CreateProgressLogDto,
    responses(
        (status = 201, description = "Progress logged", body = ProgressLogDto),
        (status = 404, description = "Member not found", body = ErrorDto)
    ),
)]
pub async fn log_progress(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<CreateProgressLogDto>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let log = FitnessService::new(&state.db)
        .log_progress(user.gym_id()?, user.trainer_scope(), id, body)
        .await?;

    Ok((StatusCode::CREATED, Json(log)))
}
