use entity::sea_orm_active_enums::UserRole;
use gymedge::server::controller::dashboard::{business_health, dashboard};
use serde_json::Value;

use super::*;

mod dashboard {
    use super::*;

    /// Expect gym statistics for a gym owner
    #[tokio::test]
    async fn returns_gym_stats() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;

        let result = dashboard(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = read_json(resp).await;
        assert_eq!(body["total_members"], 1);
        assert_eq!(body["recent_members"].as_array().map(Vec::len), Some(1));

        Ok(())
    }

    /// Expect only the enterprise flag for an enterprise admin
    #[tokio::test]
    async fn flags_enterprise_user() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let holding = test.tenancy().insert_holding_company("HC001").await?;
        let admin = test
            .user()
            .insert_enterprise_user(UserRole::HoldingAdmin, Some(holding.id), None, None)
            .await?;
        login(&test, admin.id).await;

        let result = dashboard(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let body: Value = read_json(result.unwrap().into_response()).await;
        assert_eq!(body, serde_json::json!({ "enterprise": true }));

        Ok(())
    }

    /// Expect 401 when nobody is logged in
    #[tokio::test]
    async fn returns_unauthorized_without_login() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;

        let result = dashboard(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}

mod business_health {
    use super::*;

    /// Expect revenue hidden from staff without the revenue permission
    #[tokio::test]
    async fn hides_revenue_from_staff() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let receptionist = test
            .user()
            .insert_user(Some(gym.id), "9876543211", UserRole::Receptionist)
            .await?;
        login(&test, receptionist.id).await;

        let result = business_health(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let body: Value = read_json(result.unwrap().into_response()).await;
        assert_eq!(body["revenue"]["mtd"], 0);
        assert_eq!(body["revenue"]["last_month"], 0);

        Ok(())
    }
}
