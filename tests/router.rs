//! Requests sent through the full router with the session layer.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use gymedge::{
    model::{api::ErrorDto, billing::SubscriptionPlanDto},
    server::router,
};
use gymedge_test_utils::prelude::*;
use tower::ServiceExt;
use tower_sessions::{MemoryStore, SessionManagerLayer};

use crate::util::{read_json, TestContextExt};

fn app(test: &TestContext) -> Router {
    router::routes()
        .with_state(test.into_app_state())
        .layer(SessionManagerLayer::new(MemoryStore::default()))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

/// Expect the public plan listing to be served without a session
#[tokio::test]
async fn serves_public_plans() -> Result<(), TestError> {
    let mut test = TestBuilder::new().with_all_tables().build().await?;
    test.tenancy().insert_subscription_plan("starter").await?;

    let resp = app(&test).oneshot(get("/api/billing/plans")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let plans: Vec<SubscriptionPlanDto> = read_json(resp).await;
    assert_eq!(plans.len(), 1);

    Ok(())
}

/// Expect 401 from a staff endpoint when no one is logged in
#[tokio::test]
async fn rejects_anonymous_staff_request() -> Result<(), TestError> {
    let test = TestBuilder::new().with_all_tables().build().await?;

    let resp = app(&test).oneshot(get("/api/gym")).await.unwrap();

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorDto = read_json(resp).await;
    assert!(!body.error.is_empty());

    Ok(())
}

/// Expect the OpenAPI document to list the registered endpoints
#[tokio::test]
async fn serves_openapi_document() -> Result<(), TestError> {
    let test = TestBuilder::new().build().await?;

    let resp = app(&test)
        .oneshot(get("/api/docs/openapi.json"))
        .await
        .unwrap();

    assert_eq!(resp.status(), StatusCode::OK);
    let doc: serde_json::Value = read_json(resp).await;
    assert!(doc["paths"]["/api/gym"].is_object());
    assert!(doc["paths"]["/api/members/{id}/check-in"].is_object());

    Ok(())
}
