use axum::extract::Query;
use entity::sea_orm_active_enums::{LeadSource, LeadStatus, UserRole};
use gymedge::{
    model::lead::{BulkConvertDto, BulkConvertResultDto, LeadDto, LeadListQuery},
    server::controller::lead::{bulk_convert_leads, convert_lead, list_leads, score_lead},
};

use super::*;

mod list_leads {
    use super::*;

    /// Expect 200 with the gym's leads
    #[tokio::test]
    async fn lists_gym_leads() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        test.lead()
            .insert_lead(gym.id, "Asha", "9876500001", LeadSource::Google, LeadStatus::New)
            .await?;
        login(&test, owner.id).await;

        let result = list_leads(
            State(test.into_app_state()),
            test.session.clone(),
            Query(LeadListQuery::default()),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let leads: Vec<LeadDto> = read_json(resp).await;
        assert_eq!(leads.len(), 1);

        Ok(())
    }

    /// Expect 403 for staff without the lead permission
    #[tokio::test]
    async fn forbidden_without_permission() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let trainer = test
            .user()
            .insert_user(Some(gym.id), "9876543211", UserRole::Trainer)
            .await?;
        login(&test, trainer.id).await;

        let result = list_leads(
            State(test.into_app_state()),
            test.session.clone(),
            Query(LeadListQuery::default()),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }
}

mod convert_lead {
    use super::*;

    /// Expect 201 on the first conversion and 409 on the second
    #[tokio::test]
    async fn converts_once() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let lead = test
            .lead()
            .insert_lead(gym.id, "Asha", "9876500001", LeadSource::Walkin, LeadStatus::TrialDone)
            .await?;
        login(&test, owner.id).await;
        let state = test.into_app_state();

        let result = convert_lead(State(state.clone()), test.session.clone(), Path(lead.id)).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().into_response().status(), StatusCode::CREATED);

        let result = convert_lead(State(state), test.session.clone(), Path(lead.id)).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        Ok(())
    }
}

mod bulk_convert_leads {
    use super::*;

    /// Expect converted and failed leads reported separately
    #[tokio::test]
    async fn reports_failures() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let open = test
            .lead()
            .insert_lead(gym.id, "Asha", "9876500001", LeadSource::Google, LeadStatus::New)
            .await?;
        let done = test
            .lead()
            .insert_lead(gym.id, "Ravi", "9876500002", LeadSource::Google, LeadStatus::Converted)
            .await?;
        login(&test, owner.id).await;

        let result = bulk_convert_leads(
            State(test.into_app_state()),
            test.session.clone(),
            Json(BulkConvertDto {
                ids: vec![open.id, done.id],
            }),
        )
        .await;

        assert!(result.is_ok());
        let report: BulkConvertResultDto = read_json(result.unwrap().into_response()).await;
        assert_eq!(report.converted.len(), 1);
        assert_eq!(report.converted[0].id, open.id);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].id, done.id);

        Ok(())
    }
}

mod score_lead {
    use super::*;

    /// Expect the lead to come back with a score and recommendation
    #[tokio::test]
    async fn scores_lead() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let lead = test
            .lead()
            .insert_lead(gym.id, "Asha", "9876500001", LeadSource::Referral, LeadStatus::Interested)
            .await?;
        login(&test, owner.id).await;

        let result = score_lead(State(test.into_app_state()), test.session.clone(), Path(lead.id)).await;

        assert!(result.is_ok());
        let scored: LeadDto = read_json(result.unwrap().into_response()).await;
        assert!(scored.ai_score.is_some());
        assert!(scored.ai_recommended_action.is_some());

        Ok(())
    }
}
