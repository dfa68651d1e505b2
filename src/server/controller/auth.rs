use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, FieldErrorDto, MessageDto},
        auth::{
            CheckUsernameDto, EntityCodeDto, GymLoginDto, LoginEntityDto, PasswordLoginDto,
            SelectAccountDto, SendOtpDto, SendOtpResponseDto, SignupDto, SignupVerifyDto,
            UpdateProfileDto, UserDto, UsernameAvailabilityDto, VerifyOtpDto,
            VerifyOtpResponseDto,
        },
    },
    server::{
        controller::util::get_user::get_current_user,
        error::{auth::AuthError, Error},
        model::{
            app::AppState,
            session::{
                account_selection::SessionAccountSelection, login_entity::SessionLoginEntity,
                signup::SessionPendingSignup, user::SessionUserId,
            },
        },
        service::auth::{
            account_dto,
            login::{AuthService, OtpLoginOutcome},
            signup::SignupService,
            user_dto,
        },
    },
};

pub static AUTH_TAG: &str = "auth";

/// Stores the logged in user and drops the intermediate login state
async fn start_session(session: &Session, user: &entity::gym_user::Model) -> Result<(), Error> {
    SessionUserId::insert(session, user.id).await?;
    SessionLoginEntity::remove(session).await?;
    SessionAccountSelection::remove(session).await?;

    Ok(())
}

/// Resolve a gym, holding, brand or organization login code
///
/// The resolved entity is kept in the session and scopes the OTP login that follows.
#[utoipa::path(
    post,
    path = "/api/auth/entity",
    tag = AUTH_TAG,
    request_body = EntityCodeDto,
    responses(
        (status = 200, description = "Code resolved", body = LoginEntityDto),
        (status = 400, description = "Unknown or empty code", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn resolve_entity(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<EntityCodeDto>,
) -> Result<impl IntoResponse, Error> {
    let entity = AuthService::new(&state.db, &state.config, &state.http)
        .resolve_entity_code(&body.code)
        .await?;

    SessionLoginEntity::insert(&session, &entity).await?;

    Ok((StatusCode::OK, Json(entity)))
}

/// Send a login OTP
#[utoipa::path(
    post,
    path = "/api/auth/send-otp",
    tag = AUTH_TAG,
    request_body = SendOtpDto,
    responses(
        (status = 200, description = "OTP sent", body = SendOtpResponseDto),
        (status = 400, description = "Invalid or unregistered phone", body = ErrorDto),
        (status = 429, description = "An OTP was sent less than a minute ago", body = ErrorDto),
        (status = 502, description = "SMS delivery failed", body = ErrorDto)
    ),
)]
pub async fn send_otp(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SendOtpDto>,
) -> Result<impl IntoResponse, Error> {
    let entity = SessionLoginEntity::get(&session).await?;

    AuthService::new(&state.db, &state.config, &state.http)
        .send_scoped_otp(entity.as_ref(), &body.phone)
        .await?;

    Ok((
        StatusCode::OK,
        Json(SendOtpResponseDto {
            message: "OTP sent successfully.".to_string(),
            expires_in_minutes: state.config.otp_expiry_minutes,
        }),
    ))
}

/// Verify a login OTP
///
/// Logs in directly when the phone belongs to one account, otherwise returns the accounts
/// to choose from.
#[utoipa::path(
    post,
    path = "/api/auth/verify-otp",
    tag = AUTH_TAG,
    request_body = VerifyOtpDto,
    responses(
        (status = 200, description = "Logged in or account selection required", body = VerifyOtpResponseDto),
        (status = 400, description = "Invalid, expired or exhausted OTP", body = ErrorDto),
        (status = 403, description = "User does not belong to the login entity", body = ErrorDto)
    ),
)]
pub async fn verify_otp(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<VerifyOtpDto>,
) -> Result<impl IntoResponse, Error> {
    let entity = SessionLoginEntity::get(&session).await?;

    let outcome = AuthService::new(&state.db, &state.config, &state.http)
        .verify_scoped_otp(entity.as_ref(), &body.phone, &body.otp)
        .await?;

    let response = match outcome {
        OtpLoginOutcome::LoggedIn { user, is_new_user } => {
            start_session(&session, &user).await?;

            VerifyOtpResponseDto {
                is_multi_account: false,
                accounts: Vec::new(),
                user: Some(user_dto(&user)),
                is_new_user,
            }
        }
        OtpLoginOutcome::SelectAccount(accounts) => {
            let phone = accounts
                .first()
                .map(|user| user.phone.clone())
                .unwrap_or_default();
            SessionAccountSelection::insert(&session, &phone).await?;

            VerifyOtpResponseDto {
                is_multi_account: true,
                accounts: accounts.iter().map(account_dto).collect(),
                user: None,
                is_new_user: false,
            }
        }
    };

    Ok((StatusCode::OK, Json(response)))
}

/// Pick one of the accounts offered after OTP verification
#[utoipa::path(
    post,
    path = "/api/auth/select-account",
    tag = AUTH_TAG,
    request_body = SelectAccountDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "No pending selection", body = ErrorDto),
        (status = 403, description = "Account does not belong to the verified phone", body = ErrorDto)
    ),
)]
pub async fn select_account(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SelectAccountDto>,
) -> Result<impl IntoResponse, Error> {
    let Some(phone) = SessionAccountSelection::get_phone(&session).await? else {
        return Err(AuthError::SelectionExpired.into());
    };

    let user = AuthService::new(&state.db, &state.config, &state.http)
        .select_account(&phone, body.account_id)
        .await?;

    start_session(&session, &user).await?;

    Ok((StatusCode::OK, Json(user_dto(&user))))
}

/// Username and password login with a gym or organization code
#[utoipa::path(
    post,
    path = "/api/auth/login",
    tag = AUTH_TAG,
    request_body = PasswordLoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 400, description = "Missing fields or unknown code", body = ErrorDto),
        (status = 401, description = "Invalid username or password", body = ErrorDto),
        (status = 403, description = "No access to the gym or organization", body = ErrorDto)
    ),
)]
pub async fn password_login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<PasswordLoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db, &state.config, &state.http)
        .password_login(&body)
        .await?;

    start_session(&session, &user).await?;

    Ok((StatusCode::OK, Json(user_dto(&user))))
}

/// Email or username login scoped to one gym
#[utoipa::path(
    post,
    path = "/api/auth/gym-login",
    tag = AUTH_TAG,
    request_body = GymLoginDto,
    responses(
        (status = 200, description = "Logged in", body = UserDto),
        (status = 401, description = "Invalid credentials", body = ErrorDto)
    ),
)]
pub async fn gym_login(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<GymLoginDto>,
) -> Result<impl IntoResponse, Error> {
    let user = AuthService::new(&state.db, &state.config, &state.http)
        .gym_login(&body)
        .await?;

    start_session(&session, &user).await?;

    Ok((StatusCode::OK, Json(user_dto(&user))))
}

/// Start an owner signup and send the verification OTP
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    tag = AUTH_TAG,
    request_body = SignupDto,
    responses(
        (status = 200, description = "Signup pending phone verification", body = MessageDto),
        (status = 400, description = "One or more fields are invalid", body = FieldErrorDto),
        (status = 429, description = "An OTP was sent less than a minute ago", body = ErrorDto)
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SignupDto>,
) -> Result<impl IntoResponse, Error> {
    let pending = SignupService::new(&state.db, &state.config, &state.http)
        .start_signup(body)
        .await?;

    SessionPendingSignup::insert(&session, &pending).await?;

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "OTP sent to your phone.".to_string(),
        }),
    ))
}

/// Verify the owner's phone and create the trial gym
#[utoipa::path(
    post,
    path = "/api/auth/signup/verify",
    tag = AUTH_TAG,
    request_body = SignupVerifyDto,
    responses(
        (status = 201, description = "Gym created and owner logged in", body = UserDto),
        (status = 400, description = "Signup session expired or invalid OTP", body = ErrorDto)
    ),
)]
pub async fn signup_verify(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<SignupVerifyDto>,
) -> Result<impl IntoResponse, Error> {
    let Some(pending) = SessionPendingSignup::get(&session).await? else {
        return Err(AuthError::SignupExpired.into());
    };

    let (_, owner) = SignupService::new(&state.db, &state.config, &state.http)
        .complete_signup(pending, &body.otp)
        .await?;
    let owner = AuthService::new(&state.db, &state.config, &state.http)
        .complete_login(owner)
        .await?;

    SessionPendingSignup::remove(&session).await?;
    start_session(&session, &owner).await?;

    Ok((StatusCode::CREATED, Json(user_dto(&owner))))
}

/// Check whether a username can be used for signup
#[utoipa::path(
    post,
    path = "/api/auth/check-username",
    tag = AUTH_TAG,
    request_body = CheckUsernameDto,
    responses(
        (status = 200, description = "Availability with the reason when unavailable", body = UsernameAvailabilityDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn check_username(
    State(state): State<AppState>,
    Json(body): Json<CheckUsernameDto>,
) -> Result<impl IntoResponse, Error> {
    let availability = SignupService::new(&state.db, &state.config, &state.http)
        .check_username(&body.username)
        .await?;

    Ok((StatusCode::OK, Json(availability)))
}

/// Get the logged in user
#[utoipa::path(
    get,
    path = "/api/auth/profile",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged in user", body = UserDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn get_profile(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;

    Ok((StatusCode::OK, Json(user_dto(&user.0))))
}

/// Update the logged in user's name or email
#[utoipa::path(
    patch,
    path = "/api/auth/profile",
    tag = AUTH_TAG,
    request_body = UpdateProfileDto,
    responses(
        (status = 200, description = "Updated user", body = UserDto),
        (status = 400, description = "Empty name", body = ErrorDto),
        (status = 401, description = "Not logged in", body = ErrorDto)
    ),
)]
pub async fn update_profile(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<UpdateProfileDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;

    let user = AuthService::new(&state.db, &state.config, &state.http)
        .update_profile(user.0, body)
        .await?;

    Ok((StatusCode::OK, Json(user_dto(&user))))
}

/// Log out by clearing the session
#[utoipa::path(
    get,
    path = "/api/auth/logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Logged out", body = MessageDto),
        (status = 500, description = "Session store failure", body = ErrorDto)
    ),
)]
pub async fn logout(session: Session) -> Result<impl IntoResponse, Error> {
    // Clearing a session that was never stored errors in the store
    if SessionUserId::get(&session).await?.is_some() {
        session.clear().await;
    }

    Ok((
        StatusCode::OK,
        Json(MessageDto {
            message: "Logged out.".to_string(),
        }),
    ))
}
