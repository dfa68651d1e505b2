use axum::extract::Query;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{ActiveValue, EntityTrait};
use gymedge::{
    model::member::{CreateMemberDto, MemberDto, MemberListQuery, MemberPageDto, MemberStatsDto},
    server::controller::member::{
        create_member, delete_member, get_member, import_members, list_members, member_stats,
    },
};

use super::*;

mod list_members {
    use super::*;

    /// Expect 200 with only the caller's gym members
    #[tokio::test]
    async fn lists_gym_members() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let other = test.tenancy().insert_gym("Muscle Factory").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        test.member().insert_member(gym.id, "Ravi", "9876500002").await?;
        test.member().insert_member(other.id, "Kiran", "9876500003").await?;
        login(&test, owner.id).await;

        let result = list_members(
            State(test.into_app_state()),
            test.session.clone(),
            Query(MemberListQuery::default()),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::OK);

        let page: MemberPageDto = read_json(resp).await;
        assert_eq!(page.count, 2);
        assert!(page.results.iter().all(|m| m.name != "Kiran"));

        Ok(())
    }

    /// Expect 403 for staff without the member permission
    #[tokio::test]
    async fn forbidden_without_permission() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let staff = test
            .user()
            .insert_user(Some(gym.id), "9876543211", UserRole::Receptionist)
            .await?;
        entity::prelude::GymUser::update(entity::gym_user::ActiveModel {
            id: ActiveValue::Unchanged(staff.id),
            can_manage_members: ActiveValue::Set(false),
            ..Default::default()
        })
        .exec(&test.db)
        .await?;
        login(&test, staff.id).await;

        let result = list_members(
            State(test.into_app_state()),
            test.session.clone(),
            Query(MemberListQuery::default()),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }

    /// Expect 403 for an enterprise admin without a gym
    #[tokio::test]
    async fn forbidden_without_gym() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let holding = test.tenancy().insert_holding_company("HC001").await?;
        let admin = test
            .user()
            .insert_enterprise_user(UserRole::HoldingAdmin, Some(holding.id), None, None)
            .await?;
        login(&test, admin.id).await;

        let result = list_members(
            State(test.into_app_state()),
            test.session.clone(),
            Query(MemberListQuery::default()),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        Ok(())
    }
}

mod create_member {
    use super::*;

    /// Expect 201 with the new member
    #[tokio::test]
    async fn creates_member() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let result = create_member(
            State(test.into_app_state()),
            test.session.clone(),
            Json(CreateMemberDto::new("Asha", "9876500001")),
        )
        .await;

        assert!(result.is_ok());
        let resp = result.unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CREATED);

        let member: MemberDto = read_json(resp).await;
        assert_eq!(member.name, "Asha");

        Ok(())
    }

    /// Expect 409 for a phone already used in the gym
    #[tokio::test]
    async fn conflicts_on_duplicate_phone() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;

        let result = create_member(
            State(test.into_app_state()),
            test.session.clone(),
            Json(CreateMemberDto::new("Asha Again", "9876500001")),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        Ok(())
    }
}

mod get_member {
    use super::*;

    /// Expect 404 for a member of another gym
    #[tokio::test]
    async fn hides_other_gym_member() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let other = test.tenancy().insert_gym("Muscle Factory").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(other.id, "Kiran", "9876500003").await?;
        login(&test, owner.id).await;

        let result = get_member(
            State(test.into_app_state()),
            test.session.clone(),
            Path(member.id),
        )
        .await;

        assert!(result.is_err());
        let resp = result.err().unwrap().into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        Ok(())
    }
}

mod delete_member {
    use super::*;

    /// Expect 204, after which the member is gone
    #[tokio::test]
    async fn soft_deletes_member() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        let member = test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;
        let state = test.into_app_state();

        let result = delete_member(State(state.clone()), test.session.clone(), Path(member.id)).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap().into_response().status(), StatusCode::NO_CONTENT);

        let result = get_member(State(state), test.session.clone(), Path(member.id)).await;
        assert_eq!(
            result.err().unwrap().into_response().status(),
            StatusCode::NOT_FOUND
        );

        Ok(())
    }
}

mod member_stats {
    use super::*;

    /// Expect counts per status
    #[tokio::test]
    async fn counts_members() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        test.member().insert_member(gym.id, "Asha", "9876500001").await?;
        login(&test, owner.id).await;

        let result = member_stats(State(test.into_app_state()), test.session.clone()).await;

        assert!(result.is_ok());
        let stats: MemberStatsDto = read_json(result.unwrap().into_response()).await;
        assert_eq!(stats.total_members, 1);
        assert_eq!(stats.active, 1);

        Ok(())
    }
}

mod import_members {
    use gymedge::model::member::ImportResultDto;

    use super::*;

    /// Expect valid rows imported and bad rows reported by line
    #[tokio::test]
    async fn imports_csv() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_all_tables().build().await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let owner = test.user().insert_owner(gym.id, "9876543210").await?;
        login(&test, owner.id).await;

        let csv = "name,phone\nAsha,9876500001\n,9876500002\n".to_string();
        let result = import_members(State(test.into_app_state()), test.session.clone(), csv).await;

        assert!(result.is_ok());
        let import: ImportResultDto = read_json(result.unwrap().into_response()).await;
        assert_eq!(import.success_count, 1);
        assert_eq!(import.errors.len(), 1);

        Ok(())
    }
}
