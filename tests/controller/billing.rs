use entity::sea_orm_active_enums::{BillingCycle, UserRole};
use gymedge::{
    model::billing::{CheckoutDto, SubscriptionPlanDto},
    server::controller::billing::{checkout, list_plans, payment_history},
};

use super::*;

mod list_plans {
    use super::*;

    /// Expect the active plans without logging in
    #[tokio::test]
    async fn lists_plans_publicly() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        test.tenancy().insert_subscription_plan("pro").await?;

        let result = list_plans(State(test.into_app_state())).await;

        assert!(result.is_ok());
        let plans: Vec<SubscriptionPlanDto> = read_json(result.unwrap().into_response()).await;
        assert_eq!(plans.len(), 1);
        assert_eq!(plans[0].slug, "pro");

        Ok(())
    }
}

mod checkout {
    use super::*;

    /// Expect 403 for anyone but the gym owner
    #[tokio::test]
    async fn forbidden_for_manager() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        test.tenancy().insert_subscription_plan("pro").await?;
        let manager = test
            .user()
            .insert_user(Some(gym.id), "9876543211", UserRole::Manager)
            .await?;
        login(&test, manager.id).await;

        let result = checkout(
            State(test.into_app_state()),
            test.session.clone(),
            Json(CheckoutDto {
                plan_slug: "pro".to_string(),
                billing_cycle: BillingCycle::Monthly,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }

    /// Expect 502 when Razorpay keys are not configured
    #[tokio::test]
    async fn fails_without_gateway_keys() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        test.tenancy().insert_subscription_plan("pro").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let result = checkout(
            State(test.into_app_state()),
            test.session.clone(),
            Json(CheckoutDto {
                plan_slug: "pro".to_string(),
                billing_cycle: BillingCycle::Monthly,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        Ok(())
    }
}

mod payment_history {
    use gymedge::model::billing::PaymentDto;

    use super::*;

    /// Expect an empty history for a new gym
    #[tokio::test]
    async fn empty_for_new_gym() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let result = payment_history(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let payments: Vec<PaymentDto> = read_json(result.unwrap().into_response()).await;
        assert!(payments.is_empty());

        Ok(())
    }
}
