use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::ErrorDto,
        billing::{
            CheckoutDto, CheckoutResponseDto, PaymentDto, SubscriptionPlanDto, VerifyPaymentDto,
        },
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::{app::AppState, auth::Permission},
        service::billing::BillingService,
    },
};

pub static BILLING_TAG: &str = "billing";

/// Active SaaS subscription plans
#[utoipa::path(
    get,
    path = "/api/billing/plans",
    tag = BILLING_TAG,
    responses(
        (status = 200, description = "Plans by display order", body = Vec<SubscriptionPlanDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list_plans(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let plans = BillingService::new(&state.db, &state.http, &state.config)
        .list_plans()
        .await?;

    Ok((StatusCode::OK, Json(plans)))
}

/// Create a Razorpay order for a plan upgrade
#[utoipa::path(
    post,
    path = "/api/billing/checkout",
    tag = BILLING_TAG,
    request_body = CheckoutDto,
    responses(
        (status = 200, description = "Order ready for the checkout widget", body = CheckoutResponseDto),
        (status = 403, description = "Only gym owners can perform this action", body = ErrorDto),
        (status = 404, description = "Plan not found", body = ErrorDto),
        (status = 502, description = "Razorpay failed or is not configured", body = ErrorDto)
    ),
)]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<CheckoutDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::GymOwner])?;

    let order = BillingService::new(&state.db, &state.http, &state.config)
        .create_checkout(user.gym_id()?, body)
        .await?;

    Ok((StatusCode::OK, Json(order)))
}

/// Verify a Razorpay payment signature and activate the subscription
#[utoipa::path(
    post,
    path = "/api/billing/verify",
    tag = BILLING_TAG,
    request_body = VerifyPaymentDto,
    responses(
        (status = 200, description = "Payment captured", body = PaymentDto),
        (status = 400, description = "Payment signature verification failed", body = ErrorDto),
        (status = 404, description = "Payment not found", body = ErrorDto),
        (status = 409, description = "Payment has already been processed", body = ErrorDto)
    ),
)]
pub async fn verify_payment(
    State(state): State<AppState>,
    session: Session,
    Json(body): Json<VerifyPaymentDto>,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::GymOwner])?;

    let payment = BillingService::new(&state.db, &state.http, &state.config)
        .verify_payment(user.gym_id()?, body)
        .await?;

    Ok((StatusCode::OK, Json(payment)))
}

/// The gym's payments, newest first
#[utoipa::path(
    get,
    path = "/api/billing/history",
    tag = BILLING_TAG,
    responses(
        (status = 200, description = "Payment history", body = Vec<PaymentDto>),
        (status = 403, description = "User has no gym", body = ErrorDto)
    ),
)]
pub async fn payment_history(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let user = get_current_user(&state, &session).await?;
    user.require(&[Permission::GymStaff])?;

    let payments = BillingService::new(&state.db, &state.http, &state.config)
        .payment_history(user.gym_id()?)
        .await?;

    Ok((StatusCode::OK, Json(payments)))
}
