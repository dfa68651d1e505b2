use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        gym::{GymDto, UpdateGymDto},
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::{app::AppState, auth::Permission},
        service::gym::{gym_dto, GymService},
    },
};

pub static GYM_TAG: &str = "gym";

/// Get the logged in user's gym with its branding
#[utoipa::path(
    get,
    path = "/api/gym",
    tag = GYM_TAG,
    responses(
        (status = 200, description = "The user's gym", body = GymDto),
        (status = 401, description = "Not logged in", body = ErrorDto),
        (status = 403, description = "User has no gym", body = ErrorDto)
    ),
)]
pub async fn get_gym(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::GymStaff])?;

    let gym = GymService::new(&state.db).get_gym(user.gym_id()?).await?;

    Ok((StatusCode::OK, Json(gym_dto(gym))))
}

/// Update the gym's name, branding and address
#[utoipa::path(
    patch,
    path = "/api/gym",
    tag = GYM_TAG,
    request_body = UpdateGymDto,
    responses(
        (status = 200, description = "Updated gym", body = GymDto),
        (status = 400, description = "Invalid branding values", body = ErrorDto),
        (status = 403, description = "Only gym owners can perform this action", body = ErrorDto)
    ),
)]
pub async fn update_gym(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<UpdateGymDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::GymOwner])?;

    let gym = GymService::new(&state.db)
        .update_branding(user.gym_id()?, body)
        .await?;

    Ok((StatusCode::OK, Json(gym_dto(gym))))
}
