use entity::sea_orm_active_enums::UserRole;
use gymedge::{
    model::enterprise::{HoldingDashboardDto, MarkRoyaltyPaidDto, RoyaltyReportDto},
    server::controller::enterprise::{
        holding_dashboard, mark_royalty_paid, organization_dashboard, royalty_report,
    },
};

use super::*;

mod holding_dashboard {
    use super::*;

    /// Expect group statistics across brands, organizations and gyms
    #[tokio::test]
    async fn summarizes_group() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let holding = test.tenancy().insert_holding_company("HC001").await?;
        let brand = test.tenancy().insert_brand(holding.id, "BR001", 500, 0).await?;
        let org = test.tenancy().insert_organization(Some(brand.id), "ORG001").await?;
        let gym = test
            .tenancy()
            .insert_gym_for_organization("Iron Paradise", Some(org.id))
            .await?;
        test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        let admin = test
            .user()
            .insert_enterprise_user(UserRole::HoldingAdmin, Some(holding.id), None, None)
            .await?;
        login(&test, admin.id).await;

        let result = holding_dashboard(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let dashboard: HoldingDashboardDto = read_json(result.unwrap().into_response()).await;
        assert_eq!(dashboard.stats.total_brands, 1);
        assert_eq!(dashboard.stats.total_gyms, 1);
        assert_eq!(dashboard.stats.total_members, 1);

        Ok(())
    }

    /// Expect 403 for an organization admin
    #[tokio::test]
    async fn forbidden_for_org_admin() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let org = test.tenancy().insert_organization(None, "ORG001").await?;
        let admin = test
            .user()
            .insert_enterprise_user(UserRole::OrgAdmin, None, None, Some(org.id))
            .await?;
        login(&test, admin.id).await;

        let result = holding_dashboard(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }
}

mod organization_dashboard {
    use super::*;

    /// Expect 400 for an admin not linked to an organization
    #[tokio::test]
    async fn rejects_unlinked_admin() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let admin = test
            .user()
            .insert_enterprise_user(UserRole::OrgAdmin, None, None, None)
            .await?;
        login(&test, admin.id).await;

        let result =
            organization_dashboard(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod royalties {
    use super::*;

    /// Expect the report to create the current month's ledger, which a brand admin can settle
    #[tokio::test]
    async fn report_then_mark_paid() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let holding = test.tenancy().insert_holding_company("HC001").await?;
        let brand = test.tenancy().insert_brand(holding.id, "BR001", 500, 0).await?;
        let org = test.tenancy().insert_organization(Some(brand.id), "ORG001").await?;
        let admin = test
            .user()
            .insert_enterprise_user(UserRole::BrandAdmin, Some(holding.id), Some(brand.id), Some(org.id))
            .await?;
        login(&test, admin.id).await;
        let state = test.into_app_state();

        let result = royalty_report(State(state.clone()), test.session.clone()).await;

        assert!(result.is_ok());
        let report: RoyaltyReportDto = read_json(result.unwrap().into_response()).await;
        assert_eq!(report.history.len(), 1);
        assert!(!report.history[0].is_paid);

        let result = mark_royalty_paid(
            State(state),
            test.session.clone(),
            Path(report.history[0].id),
            Json(MarkRoyaltyPaidDto {
                transaction_ref: Some("UTR123".to_string()),
            }),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        Ok(())
    }

    /// Expect 404 for a ledger that does not exist
    #[tokio::test]
    async fn mark_paid_missing_ledger() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let holding = test.tenancy().insert_holding_company("HC001").await?;
        let admin = test
            .user()
            .insert_enterprise_user(UserRole::HoldingAdmin, Some(holding.id), None, None)
            .await?;
        login(&test, admin.id).await;

        let result = mark_royalty_paid(
            State(test.into_app_state()),
            test.session.clone(),
            Path(42),
            Json(MarkRoyaltyPaidDto {
                transaction_ref: None,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}
