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
        fitness::{AiUsageDto, DietPlanDto, GenerateDietDto, GenerateWorkoutDto, WorkoutPlanDto},
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::{
            app::AppState,
            auth::{CurrentUser, Permission},
        },
        service::ai::AiService,
    },
};

pub static AI_TAG: &str = "ai";

async fn ai_user(state: &AppState, session: &Session) -> Result<CurrentUser, Error> {
    let user = get_current_user(state, session).await?;
    user.require(&[Permission::GymStaff, Permission::UseAi])?;

    Ok(user)
}

/// Generate a 4-week workout plan for a member
#[utoipa::path(
    post,
    path = "/api/ai/workout",
    tag = AI_TAG,
    request_body = GenerateWorkoutDto,
    responses(
        (status = 201, description = "Plan generated and saved", body = WorkoutPlanDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 429, description = "Monthly AI query limit reached", body = ErrorDto),
        (status = 502, description = "AI provider failed or is not configured", body = ErrorDto)
    ),
)]
pub async fn generate_workout(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<GenerateWorkoutDto>,
) -> Result<impl IntoResponse, Error> {
    let user = ai_user(&state, &session).await?;

    let plan = AiService::new(&state.db, &state.http, &state.config)
        .generate_workout_plan(user.gym_id()?, Some(user.id()), body)
        .await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// List the gym's workout plans
#[utoipa::path(
    get,
    path = "/api/ai/workout",
    tag = AI_TAG,
    responses(
        (status = 200, description = "Workout plans, newest first", body = Vec<WorkoutPlanDto>),
        (status = 403, description = "Missing AI permission", body = ErrorDto)
    ),
)]
pub async fn list_workout_plans(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = ai_user(&state, &session).await?;

    let plans = AiService::new(&state.db, &state.http, &state.config)
        .list_workout_plans(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(plans)))
}

/// Get a workout plan
#[utoipa::path(
    get,
    path = "/api/ai/workout/{id}",
    tag = AI_TAG,
    params(("id" = i32, Path, description = "Workout plan ID")),
    responses(
        (status = 200, description = "The workout plan", body = WorkoutPlanDto),
        (status = 404, description = "Workout plan not found", body = ErrorDto)
    ),
)]
pub async fn get_workout_plan(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = ai_user(&state, &session).await?;

    let plan = AiService::new(&state.db, &state.http, &state.config)
        .get_workout_plan(user.gym_id()?, id)
        .await?;

    Ok((StatusCode::OK, Json(plan)))
}

/// Generate a weekly Indian diet plan for a member
#[utoipa::path(
    post,
    path = "/api/ai/diet",
    tag = AI_TAG,
    request_body = GenerateDietDto,
    responses(
        (status = 201, description = "Plan generated and saved", body = DietPlanDto),
        (status = 400, description = "Invalid calories or budget", body = ErrorDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 429, description = "Monthly AI query limit reached", body = ErrorDto),
        (status = 502, description = "AI provider failed or is not configured", body = ErrorDto)
    ),
)]
pub async fn generate_diet(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<GenerateDietDto>,
) -> Result<impl IntoResponse, Error> {
    let user = ai_user(&state, &session).await?;

    let plan = AiService::new(&state.db, &state.http, &state.config)
        .generate_diet_plan(user.gym_id()?, Some(user.id()), body)
        .await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// List the gym's diet plans
#[utoipa::path(
    get,
    path = "/api/ai/diet",
    tag = AI_TAG,
    responses(
        (status = 200, description = "Diet plans, newest first", body = Vec<DietPlanDto>),
        (status = 403, description = "Missing AI permission", body = ErrorDto)
    ),
)]
pub async fn list_diet_plans(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = ai_user(&state, &session).await?;

    let plans = AiService::new(&state.db, &state.http, &state.config)
        .list_diet_plans(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(plans)))
}

/// Get a diet plan
#[utoipa::path(
    get,
    path = "/api/ai/diet/{id}",
    tag = AI_TAG,
    params(("id" = i32, Path, description = "Diet plan ID")),
    responses(
        (status = 200, description = "The diet plan", body = DietPlanDto),
        (status = 404, description = "Diet plan not found", body = ErrorDto)
    ),
)]
pub async fn get_diet_plan(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = ai_user(&state, &session).await?;

    let plan = AiService::new(&state.db, &state.http, &state.config)
        .get_diet_plan(user.gym_id()?, id)
        .await?;

    Ok((StatusCode::OK, Json(plan)))
}

/// This month's AI calls against the plan allowance
#[utoipa::path(
    get,
    path = "/api/ai/usage",
    tag = AI_TAG,
    responses(
        (status = 200, description = "AI usage", body = AiUsageDto),
        (status = 403, description = "User has no gym", body = ErrorDto)
    ),
)]
pub async fn ai_usage(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::GymStaff])?;

    let usage = AiService::new(&state.db, &state.http, &state.config)
        .usage(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(usage)))
}
