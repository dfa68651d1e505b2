use gymedge::{
    model::fitness::{AttendanceDto, CreateProgressLogDto, ProgressLogDto},
    server::controller::fitness::{
        attendance_history, check_in, check_out, list_progress, log_progress,
    },
};

use super::*;

mod check_in {
    use super::*;

    /// Expect 201 for the first check-in and 409 for a second open one on the same day
    #[tokio::test]
    async fn rejects_second_open_check_in() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;
        let state = test.into_app_state();

        let result = check_in(State(state.clone()), test.session.clone(), Path(member.id)).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let attendance: AttendanceDto = read_json(resp).await;
        assert_eq!(attendance.member_id, member.id);
        assert!(attendance.check_out.is_none());

        let result = check_in(State(state), test.session.clone(), Path(member.id)).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        Ok(())
    }

    /// Expect 404 for a member of another gym
    #[tokio::test]
    async fn not_found_across_gyms() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let other = test.tenancy().insert_gym("Muscle Factory").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(other.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;

        let result = check_in(State(test.into_app_state()), test.session.clone(), Path(member.id)).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }

    /// Expect 401 without a session user
    #[tokio::test]
    async fn unauthorized_without_login() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let member = test.member().insert_member(gym.id, "Asha", "9876500001").await?;

        let result = check_in(State(test.into_app_state()), test.session.clone(), Path(member.id)).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}

mod check_out {
    use super::*;

    /// Expect the attendance closed once, then 409
    #[tokio::test]
    async fn closes_attendance_once() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;
        let state = test.into_app_state();

        let resp = check_in(State(state.clone()), test.session.clone(), Path(member.id))
            .await
            .unwrap()
            .into_response();
        let opened: AttendanceDto = read_json(resp).await;

        let result = check_out(State(state.clone()), test.session.clone(), Path(opened.id)).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let closed: AttendanceDto = read_json(resp).await;
        assert!(closed.check_out.is_some());
        assert!(closed.duration_minutes.is_some());

        let result = check_out(State(state), test.session.clone(), Path(opened.id)).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        Ok(())
    }
}

mod attendance_history {
    use super::*;

    /// Expect the member's single check-in in the history
    #[tokio::test]
    async fn lists_check_ins() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;
        let state = test.into_app_state();

        check_in(State(state.clone()), test.session.clone(), Path(member.id))
            .await
            .unwrap();

        let result = attendance_history(State(state), test.session.clone(), Path(member.id)).await;

        assert!(result.is_ok());
        let history: Vec<AttendanceDto> = read_json(result.unwrap().into_response()).await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0].member_id, member.id);

        Ok(())
    }
}

mod progress {
    use super::*;

    /// Expect a logged measurement to show up in the member's progress
    #[tokio::test]
    async fn logs_and_lists_progress() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;
        let state = test.into_app_state();

        let result = log_progress(
            State(state.clone()),
            test.session.clone(),
            Path(member.id),
            Json(CreateProgressLogDto {
                weight_kg: Some(72.5),
                waist_cm: Some(84.0),
                ..Default::default()
            }),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let result = list_progress(State(state), test.session.clone(), Path(member.id)).await;

        assert!(result.is_ok());
        let logs: Vec<ProgressLogDto> = read_json(result.unwrap().into_response()).await;
        assert_eq!(logs.len(), 1);
        assert_eq!(logs[0].weight_kg, Some(72.5));

        Ok(())
    }
}
