use axum::{
    extract::{Path, State},
    http::{Extensions, HeaderMap, StatusCode},
    response::IntoResponse,
    Json,
};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, MessageDto},
        communication::{
            AutomationDto, ContactQueryDto, CreateAutomationDto, UpdateAutomationDto,
            WhatsappMessageDto,
        },
    },
    server::{
        controller::util::{
            client::{client_ip, user_agent},
            get_user::get_current_user,
        },
        error::Error,
        model::{
            app::AppState,
            auth::{CurrentUser, Permission},
        },
        service::communication::{automation::AutomationService, CommunicationService},
    },
};

pub static COMMUNICATION_TAG: &str = "communications";

async fn automation_manager(state: &AppState, session: &Session) -> Result<CurrentUser, Error> {
    let user = get_current_user(state, session).await?;
    user.require(&[Permission::GymOwnerOrManager])?;

    Ok(user)
}

/// List the gym's WhatsApp automations
#[utoipa::path(
    get,
    path = "/api/automations",
    tag = COMMUNICATION_TAG,
    responses(
        (status = 200, description = "Automations", body = Vec<AutomationDto>),
        (status = 403, description = "Only gym owners or managers can perform this action", body = ErrorDto)
    ),
)]
pub async fn list_automations(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = automation_manager(&state, &session).await?;

    let automations = AutomationService::new(&state.db, &state.http, &state.config)
        .list(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(automations)))
}

/// Create a WhatsApp automation
#[utoipa::path(
    post,
    path = "/api/automations",
    tag = COMMUNICATION_TAG,
    request_body = CreateAutomationDto,
    responses(
        (status = 201, description = "Automation created", body = AutomationDto),
        (status = 400, description = "Invalid template or schedule", body = ErrorDto)
    ),
)]
pub async fn create_automation(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CreateAutomationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = automation_manager(&state, &session).await?;

    let automation = AutomationService::new(&state.db, &state.http, &state.config)
        .create(user.gym_id()?, body)
        .await?;

    Ok((StatusCode::CREATED, Json(automation)))
}

/// Update a WhatsApp automation
#[utoipa::path(
    patch,
    path = "/api/automations/{id}",
    tag = COMMUNICATION_TAG,
    params(("id" = i32, Path, description = "Automation ID")),
    request_body = UpdateAutomationDto,
    responses(
        (status = 200, description = "Updated automation", body = AutomationDto),
        (status = 404, description = "Automation not found", body = ErrorDto)
    ),
)]
pub async fn update_automation(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
    Json(body): Json<UpdateAutomationDto>,
) -> Result<impl IntoResponse, Error> {
    let user = automation_manager(&state, &session).await?;

    let automation = AutomationService::new(&state.db, &state.http, &state.config)
        .update(user.gym_id()?, id, body)
        .await?;

    Ok((StatusCode::OK, Json(automation)))
}

/// Delete a WhatsApp automation
#[utoipa::path(
    delete,
    path = "/api/automations/{id}",
    tag = COMMUNICATION_TAG,
    params(("id" = i32, Path, description = "Automation ID")),
    responses(
        (status = 204, description = "Automation deleted"),
        (status = 404, description = "Automation not found", body = ErrorDto)
    ),
)]
pub async fn delete_automation(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<i32>,
) -> Result<impl IntoResponse, Error> {
    let user = automation_manager(&state, &session).await?;

    AutomationService::new(&state.db, &state.http, &state.config)
        .delete(user.gym_id()?, id)
        .await?;

    Ok(StatusCode::NO_CONTENT)
}

/// The gym's 50 latest WhatsApp messages
#[utoipa::path(
    get,
    path = "/api/whatsapp/messages",
    tag = COMMUNICATION_TAG,
    responses(
        (status = 200, description = "Messages, newest first", body = Vec<WhatsappMessageDto>),
        (status = 403, description = "User has no gym", body = ErrorDto)
    ),
)]
pub async fn message_history(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::GymStaff])?;

    let messages = CommunicationService::new(&state.db)
        .message_history(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(messages)))
}

/// Public contact form
#[utoipa::path(
    post,
    path = "/api/contact",
    tag = COMMUNICATION_TAG,
    request_body = ContactQueryDto,
    responses(
        (status = 201, description = "Query received", body = MessageDto),
        (status = 400, description = "Missing required fields", body = ErrorDto)
    ),
)]
pub async fn submit_contact(
    State(state): State<AppState>,
    headers: HeaderMap,
    extensions: Extensions,
    Json(body): Json<ContactQueryDto>,
) -> Result<impl IntoResponse, Error> {
    CommunicationService::new(&state.db)
        .submit_contact(
            body,
            client_ip(&headers, &extensions),
            user_agent(&headers),
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(MessageDto {
            message: "Thank you! We will get back to you shortly.".to_string(),
        }),
    ))
}
