use axum::http::{Extensions, HeaderMap, HeaderValue};
use gymedge::{model::communication::ContactQueryDto, server::controller::communication::submit_contact};
use sea_orm::EntityTrait;

use super::*;

fn contact(name: &str) -> ContactQueryDto {
    ContactQueryDto {
        name: name.to_string(),
        email: "asha@example.com".to_string(),
        phone: None,
        company: Some("Iron Paradise".to_string()),
        subject: "Pricing".to_string(),
        message: "Do you offer yearly plans?".to_string(),
    }
}

mod submit_contact {
    use super::*;

    /// Expect 201 and the forwarded client IP stored with the query
    #[tokio::test]
    async fn stores_query() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;
        let mut headers = HeaderMap::new();
        headers.insert("x-forwarded-for", HeaderValue::from_static("203.0.113.7, 10.0.0.1"));
        headers.insert("user-agent", HeaderValue::from_static("Mozilla/5.0"));

        let result = submit_contact(
            State(test.into_app_state()),
            headers,
            Extensions::new(),
            Json(contact("Asha")),
        )
        .await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().into_response().status(), StatusCode::CREATED);

        let queries = entity::prelude::ContactQuery::find().all(&test.db).await?;
        assert_eq!(queries.len(), 1);
        assert_eq!(queries[0].ip_address.as_deref(), Some("203.0.113.7"));
        assert_eq!(queries[0].user_agent.as_deref(), Some("Mozilla/5.0"));

        Ok(())
    }

    /// Expect 400 when a required field is blank
    #[tokio::test]
    async fn rejects_blank_name() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;

        let result = submit_contact(
            State(test.into_app_state()),
            HeaderMap::new(),
            Extensions::new(),
            Json(contact("  ")),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}
