use entity::sea_orm_active_enums::UserRole;
use gymedge::{
    model::gym::{GymDto, UpdateGymDto},
    server::controller::gym::{get_gym, update_gym},
};

use super::*;

mod get_gym {
    use super::*;

    /// Expect 200 with the staff member's own gym
    #[tokio::test]
    async fn returns_own_gym() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let trainer = test
            .user()
            .insert_user(Some(gym.id), "9876543211", UserRole::Trainer)
            .await?;
        login(&test, trainer.id).await;

        let result = get_gym(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);
        let dto: GymDto = read_json(resp).await;
        assert_eq!(dto.id, gym.id);
        assert_eq!(dto.name, "Iron Paradise");

        Ok(())
    }

    /// Expect 401 when not logged in
    #[tokio::test]
    async fn unauthorized_without_login() -> Result<(), TestError> {
        let test = TestBuilder::new().with_all_tables().build().await?;

        let result = get_gym(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        Ok(())
    }
}

mod update_gym {
    use super::*;

    /// Expect the owner's branding change to be saved
    #[tokio::test]
    async fn owner_updates_branding() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let result = update_gym(
            State(test.into_app_state()),
            test.session.clone(),
            Json(UpdateGymDto {
                brand_color: Some("#ff0000".to_string()),
                city: Some("Pune".to_string()),
                ..Default::default()
            }),
        )
        .await;

        assert!(result.is_ok());
        let dto: GymDto = read_json(result.unwrap().into_response()).await;
        assert_eq!(dto.brand_color, "#ff0000");
        assert_eq!(dto.city.as_deref(), Some("Pune"));

        Ok(())
    }

    /// Expect 403 for staff who are not the owner
    #[tokio::test]
    async fn forbidden_for_non_owner() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let manager = test
            .user()
            .insert_user(Some(gym.id), "9876543212", UserRole::Manager)
            .await?;
        login(&test, manager.id).await;

        let result = update_gym(
            State(test.into_app_state()),
            test.session.clone(),
            Json(UpdateGymDto::default()),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }
}
