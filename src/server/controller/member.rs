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
        member::{
            CreateMemberDto, CreateMembershipPlanDto, ImportResultDto, MemberDto,
            MemberListQuery, MemberPageDto, MemberStatsDto, MembershipPlanDto, UpdateMemberDto,
            UpdateMembershipPlanDto,
        },
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::{
            app::AppState,
            auth::{CurrentUser, Permission},
        },
        service::member::{plan::MembershipPlanService, MemberService},
    },
};

pub static MEMBER_TAG: &str = "members";
pub static MEMBERSHIP_PLAN_TAG: &str = "membership-plans";

const MEMBER_PERMISSIONS: [Permission; 2] = [Permission::GymStaff, Permission::ManageMembers];

async fn member_manager(state: &AppState, session: &Session) -> Result<CurrentUser, Error> {
    let user = get_current_user(state, session).await?;
    user.require(&MEMBER_PERMISSIONS)?;

    Ok(user)
}

/// List members with filters, search, ordering and pagination
#[utoipa::path(
    get,
    path = "/api/members",
    tag = MEMBER_TAG,
    params(MemberListQuery),
    responses(
        (status = 200, description = "A page of 20 members", body = MemberPageDto),
        (status = 403, description = "Missing member permissions", body = ErrorDto)
    ),
)]
pub async fn list_members(
    State(state): State<AppState>,
    session: Session,
    Query(filter): Query<MemberListQuery>,
) -> Result<impl IntoResponse, Error> {
    let user = member_manager(&state, &session).await?;

    let page = MemberService::new(&state.db, &state.http, &state.config)
        .list_members(user.gym_id()?, user.trainer_scope(), &filter)
        .await?;

    Ok((StatusCode::OK, Json(page)))
}

/// Add a member and send the WhatsApp welcome message
#[utoipa::path(
    post,
    path = "/api/members",
    tag = MEMBER_TAG,
    request_body = CreateMemberDto,
    responses(
        (status = 201, description = "Member created", body = MemberDto),
        (status = 400, description = "Invalid member fields", body = ErrorDto),
        (status = 409, description = "Phone already used in this gym", body = ErrorDto)
    ),
)]
pub async fn create_member(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateMemberDto>,
) -> Result<impl IntoResponse, Error> {
    let user = member_manager(&state, &session).await?;

    let member = MemberService::new(&state.db, &state.http, &state.config)
        .create_member(user.gym_id()?, body)
        .await?;

    Ok((StatusCode::CREATED, Json(member)))
}

/// Get a member
#[utoipa::path(
    get,
    path = "/api/members/{id}",
    tag = MEMBER_TAG,
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 200, description = "The member", body = MemberDto),
        (status = 404, description = "Member not found", body = ErrorDto)
    ),
)]
pub async fn get_member(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = member_manager(&state, &session).await?;

    let member = MemberService::new(&state.db, &state.http, &state.config)
        .get_member(user.gym_id()?, user.trainer_scope(), id)
        .await?;

    Ok((StatusCode::OK, Json(member)))
}

/// Update a member
#[utoipa::path(
    patch,
    path = "/api/members/{id}",
    tag = MEMBER_TAG,
    params(("id" = i32, Path, description = "Member ID")),
    request_body = UpdateMemberDto,
    responses(
        (status = 200, description = "Updated member", body = MemberDto),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 409, description = "Phone already used in this gym", body = ErrorDto)
    ),
)]
pub async fn update_member(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<UpdateMemberDto>,
) -> Result<impl IntoResponse, Error> {
    let user = member_manager(&state, &session).await?;

    let member = MemberService::new(&state.db, &state.http, &state.config)
        .update_member(user.gym_id()?, user.trainer_scope(), id, body)
        .await?;

    Ok((StatusCode::OK, Json(member)))
}

/// Soft delete a member
#[utoipa::path(
    delete,
    path = "/api/members/{id}",
    tag = MEMBER_TAG,
    params(("id" = i32, Path, description = "Member ID")),
    responses(
        (status = 204, description = "Member deleted"),
        (status = 404, description = "Member not found", body = ErrorDto)
    ),
)]
pub async fn delete_member(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = member_manager(&state, &session).await?;

    MemberService::new(&state.db, &state.http, &state.config)
        .delete_member(user.gym_id()?, user.trainer_scope(), id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Member counts by status and churn risk
#[utoipa::path(
    get,
    path = "/api/members/stats",
    tag = MEMBER_TAG,
    responses(
        (status = 200, description = "Member statistics", body = MemberStatsDto),
        (status = 403, description = "Missing member permissions", body = ErrorDto)
    ),
)]
pub async fn member_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = member_manager(&state, &session).await?;

    let stats = MemberService::new(&state.db, &state.http, &state.config)
        .member_stats(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(stats)))
}

/// Import members from a CSV file with `name` and `phone` columns
#[utoipa::path(
    post,
    path = "/api/members/import",
    tag = MEMBER_TAG,
    request_body(content = String, content_type = "text/csv"),
    responses(
        (status = 200, description = "Imported count and row errors", body = ImportResultDto),
        (status = 400, description = "Missing required columns", body = ErrorDto)
    ),
)]
pub async fn import_members(
    State(state): State<AppState>,
    session: Session,
    body: String,
) -> Result<impl IntoResponse, Error> {
    let user = member_manager(&state, &session).await?;

    let result = MemberService::new(&state.db, &state.http, &state.config)
        .bulk_import(user.gym_id()?, &body)
        .await?;

    Ok((StatusCode::OK, Json(result)))
}

async fn gym_staff(state: &AppState, session: &Session) -> Result<CurrentUser, Error> {
    let user = get_current_user(state, session).await?;
    user.require(&[Permission::GymStaff])?;

    Ok(user)
}

/// List the gym's membership plans
#[utoipa::path(
    get,
    path = "/api/membership-plans",
    tag = MEMBERSHIP_PLAN_TAG,
    responses(
        (status = 200, description = "Plans ordered by duration and price", body = Vec<MembershipPlanDto>),
        (status = 403, description = "User has no gym", body = ErrorDto)
    ),
)]
pub async fn list_membership_plans(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let plans = MembershipPlanService::new(&state.db)
        .list(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(plans)))
}

/// Create a membership plan
#[utoipa::path(
    post,
    path = "/api/membership-plans",
    tag = MEMBERSHIP_PLAN_TAG,
    request_body = CreateMembershipPlanDto,
    responses(
        (status = 201, description = "Plan created", body = MembershipPlanDto),
        (status = 400, description = "Invalid plan fields", body = ErrorDto)
    ),
)]
pub async fn create_membership_plan(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateMembershipPlanDto>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let plan = MembershipPlanService::new(&state.db)
        .create(user.gym_id()?, body)
        .await?;

    Ok((StatusCode::CREATED, Json(plan)))
}

/// Get a membership plan
#[utoipa::path(
    get,
    path = "/api/membership-plans/{id}",
    tag = MEMBERSHIP_PLAN_TAG,
    params(("id" = i32, Path, description = "Membership plan ID")),
    responses(
        (status = 200, description = "The plan", body = MembershipPlanDto),
        (status = 404, description = "Plan not found", body = ErrorDto)
    ),
)]
pub async fn get_membership_plan(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let plan = MembershipPlanService::new(&state.db)
        .get(user.gym_id()?, id)
        .await?;

    Ok((StatusCode::OK, Json(plan)))
}

/// Update a membership plan
#[utoipa::path(
    patch,
    path = "/api/membership-plans/{id}",
    tag = MEMBERSHIP_PLAN_TAG,
    params(("id" = i32, Path, description = "Membership plan ID")),
    request_body = UpdateMembershipPlanDto,
    responses(
        (status = 200, description = "Updated plan", body = MembershipPlanDto),
        (status = 404, description = "Plan not found", body = ErrorDto)
    ),
)]
pub async fn update_membership_plan(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<UpdateMembershipPlanDto>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    let plan = MembershipPlanService::new(&state.db)
        .update(user.gym_id()?, id, body)
        .await?;

    Ok((StatusCode::OK, Json(plan)))
}

/// Soft delete a membership plan
#[utoipa::path(
    delete,
    path = "/api/membership-plans/{id}",
    tag = MEMBERSHIP_PLAN_TAG,
    params(("id" = i32, Path, description = "Membership plan ID")),
    responses(
        (status = 204, description = "Plan deleted"),
        (status = 404, description = "Plan not found", body = ErrorDto)
    ),
)]
pub async fn delete_membership_plan(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = gym_staff(&state, &session).await?;

    MembershipPlanService::new(&state.db)
        .delete(user.gym_id()?, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}
