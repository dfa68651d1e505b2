//! HTTP routing and OpenAPI documentation configuration.
//!
//! Every API endpoint is registered here together with its OpenAPI description, and Swagger
//! UI is served at `/api/docs` with the generated document at `/api/docs/openapi.json`.

use axum::Router;
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{
    controller::{
        ai, auth, billing, communication, dashboard, enterprise, fitness, gym, lead, member,
    },
    model::app::AppState,
};

/// Builds the application's HTTP router with all API endpoints and Swagger UI documentation.
///
/// Handlers registered through the same `routes!` call share a path and differ by method.
/// The returned router still needs the [`AppState`] and the session layer.
///
/// # Example
/// ```ignore
/// let app = routes().with_state(state).layer(session);
/// ```
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "GymEdge", description = "GymEdge gym management API"), tags(
        (name = auth::AUTH_TAG, description = "Login, signup and profile"),
        (name = gym::GYM_TAG, description = "Gym settings"),
        (name = member::MEMBER_TAG, description = "Member CRM"),
        (name = member::MEMBERSHIP_PLAN_TAG, description = "Membership plans sold by the gym"),
        (name = lead::LEAD_TAG, description = "Lead pipeline and scoring"),
        (name = fitness::FITNESS_TAG, description = "Attendance and progress tracking"),
        (name = ai::AI_TAG, description = "AI workout and diet plans"),
        (name = dashboard::DASHBOARD_TAG, description = "Gym dashboard and business health"),
        (name = communication::COMMUNICATION_TAG, description = "WhatsApp automations and contact form"),
        (name = billing::BILLING_TAG, description = "SaaS plans and Razorpay payments"),
        (name = enterprise::ENTERPRISE_TAG, description = "Enterprise dashboards and royalties"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(auth::resolve_entity))
        .routes(routes!(auth::send_otp))
        .routes(routes!(auth::verify_otp))
        .routes(routes!(auth::select_account))
        .routes(routes!(auth::password_login))
        .routes(routes!(auth::gym_login))
        .routes(routes!(auth::signup))
        .routes(routes!(auth::signup_verify))
        .routes(routes!(auth::check_username))
        .routes(routes!(auth::get_profile, auth::update_profile))
        .routes(routes!(auth::logout))
        .routes(routes!(gym::get_gym, gym::update_gym))
        .routes(routes!(member::list_members, member::create_member))
        .routes(routes!(member::member_stats))
        .routes(routes!(member::import_members))
        .routes(routes!(
            member::get_member,
            member::update_member,
            member::delete_member
        ))
        .routes(routes!(
            member::list_membership_plans,
            member::create_membership_plan
        ))
        .routes(routes!(
            member::get_membership_plan,
            member::update_membership_plan,
            member::delete_membership_plan
        ))
        .routes(routes!(lead::list_leads, lead::create_lead))
        .routes(routes!(lead::lead_summary))
        .routes(routes!(lead::bulk_convert_leads))
        .routes(routes!(lead::get_lead, lead::update_lead, lead::delete_lead))
        .routes(routes!(lead::convert_lead))
        .routes(routes!(lead::score_lead))
        .routes(routes!(fitness::check_in))
        .routes(routes!(fitness::check_out))
        .routes(routes!(fitness::attendance_history))
        .routes(routes!(fitness::list_progress, fitness::log_progress))
        .routes(routes!(ai::generate_workout, ai::list_workout_plans))
        .routes(routes!(ai::get_workout_plan))
        .routes(routes!(ai::generate_diet, ai::list_diet_plans))
        .routes(routes!(ai::get_diet_plan))
        .routes(routes!(ai::ai_usage))
        .routes(routes!(dashboard::dashboard))
        .routes(routes!(dashboard::business_health))
        .routes(routes!(
            communication::list_automations,
            communication::create_automation
        ))
        .routes(routes!(
            communication::update_automation,
            communication::delete_automation
        ))
        .routes(routes!(communication::message_history))
        .routes(routes!(communication::submit_contact))
        .routes(routes!(billing::list_plans))
        .routes(routes!(billing::checkout))
        .routes(routes!(billing::verify_payment))
        .routes(routes!(billing::payment_history))
        .routes(routes!(enterprise::holding_dashboard))
        .routes(routes!(enterprise::organization_dashboard))
        .routes(routes!(enterprise::royalty_report))
        .routes(routes!(enterprise::mark_royalty_paid))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}
