use entity::sea_orm_active_enums::{DietaryPreference, ExperienceLevel, FitnessGoal};
use gymedge::{
    model::fitness::{AiUsageDto, GenerateDietDto, GenerateWorkoutDto},
    server::controller::ai::{ai_usage, generate_diet, generate_workout},
};

use super::*;

mod generate_workout {
    use super::*;

    /// Expect 404 for a member outside the user's gym
    #[tokio::test]
    async fn not_found_for_unknown_member() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let result = generate_workout(
            State(test.into_app_state()),
            test.session.clone(),
            Json(GenerateWorkoutDto {
                member_id: 999,
                goal: FitnessGoal::FatLoss,
                level: ExperienceLevel::Beginner,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    /// Expect 502 when no provider key is configured
    #[tokio::test]
    async fn bad_gateway_without_provider_key() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;

        let result = generate_workout(
            State(test.into_app_state()),
            test.session.clone(),
            Json(GenerateWorkoutDto {
                member_id: member.id,
                goal: FitnessGoal::MuscleGain,
                level: ExperienceLevel::Beginner,
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);

        Ok(())
    }
}

mod generate_diet {
    use super::*;

    /// Expect 400 for a budget outside low, medium and high
    #[tokio::test]
    async fn rejects_unknown_budget() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;

        let result = generate_diet(
            State(test.into_app_state()),
            test.session.clone(),
            Json(GenerateDietDto {
                member_id: member.id,
                calories: 2000,
                preference: DietaryPreference::Veg,
                budget: Some("luxury".to_string()),
            }),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        Ok(())
    }
}

mod ai_usage {
    use super::*;

    /// Expect zero usage and an unlimited allowance for a gym without a plan
    #[tokio::test]
    async fn reports_usage_without_plan() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let result = ai_usage(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let usage: AiUsageDto = read_json(result.unwrap().into_response()).await;
        assert_eq!(usage, AiUsageDto { used: 0, limit: 0 });

        Ok(())
    }
}
