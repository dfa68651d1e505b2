use entity::sea_orm_active_enums::UserRole;
use gymedge::{
    model::auth::{UpdateProfileDto, UserDto},
    server::{
        controller::auth::{get_profile, logout, update_profile},
        model::session::user::SessionUserId,
    },
};

use super::*;

mod get_profile {
    use super::*;

    /// Expect 200 with the logged in user
    #[tokio::test]
    async fn returns_logged_in_user() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_tenant_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let result = get_profile(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let user: UserDto = read_json(resp).await;
        assert_eq!(user.id, owner.id);
        assert_eq!(user.role, UserRole::Owner);
        assert_eq!(user.gym_id, Some(gym.id));

        Ok(())
    }

    /// Expect 401 when nobody is logged in
    #[tokio::test]
    async fn returns_unauthorized_without_login() -> Result<(), TestError> {
        let test = TestBuilder::new().with_tenant_tables().build().await?;

        let result = get_profile(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }

    /// Expect 500 when required database tables don't exist
    #[tokio::test]
    async fn error_when_required_tables_dont_exist() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;
        login(&test, 1).await;

        let result = get_profile(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        Ok(())
    }
}

mod update_profile {
    use super::*;

    /// Expect the name to be trimmed and saved
    #[tokio::test]
    async fn updates_name() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_tenant_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let result = update_profile(
            State(test.into_app_state()),
            test.session.clone(),
            Json(UpdateProfileDto {
                name: Some("  Rahul Sharma ".to_string()),
                email: None,
            }),
        )
        .await;

        assert!(result.is_ok());
        let user: UserDto = read_json(result.unwrap().into_response()).await;
        assert_eq!(user.name, "Rahul Sharma");

        Ok(())
    }
}

mod logout {
    use super::*;

    /// Expect 200 and an empty session after logout
    #[tokio::test]
    async fn clears_session() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;
        login(&test, 1).await;

        let result = logout(test.session.clone()).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let user_id = SessionUserId::get(&test.session).await.unwrap();
        assert!(user_id.is_none());

        Ok(())
    }

    /// Expect 200 even when the session holds nothing
    #[tokio::test]
    async fn succeeds_without_session() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        let result = logout(test.session.clone()).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        Ok(())
    }
}
