use chrono::Utc;
use entity::sea_orm_active_enums::UserRole;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { context: self }
    }
}

pub struct UserFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> UserFixtures<'a> {
    /// Insert an active staff account.
    ///
    /// Owners receive every permission flag, other roles get the account defaults
    /// (members and AI allowed, leads and revenue denied).
    pub async fn insert_user(
        &self,
        gym_id: Option<i32>,
        phone: &str,
        role: UserRole,
    ) -> Result<entity::gym_user::Model, TestError> {
        let owner = role == UserRole::Owner;
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::GymUser::insert(entity::gym_user::ActiveModel {
            gym_id: ActiveValue::Set(gym_id),
            holding_company_id: ActiveValue::Set(None),
            brand_id: ActiveValue::Set(None),
            organization_id: ActiveValue::Set(None),
            phone: ActiveValue::Set(phone.to_string()),
            email: ActiveValue::Set(None),
            username: ActiveValue::Set(None),
            name: ActiveValue::Set(format!("User {}", phone)),
            role: ActiveValue::Set(role),
            can_view_revenue: ActiveValue::Set(owner),
            can_manage_members: ActiveValue::Set(true),
            can_manage_leads: ActiveValue::Set(owner),
            can_use_ai: ActiveValue::Set(true),
            is_active: ActiveValue::Set(true),
            is_superuser: ActiveValue::Set(false),
            password_hash: ActiveValue::Set(None),
            last_login: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }

    /// Insert a gym owner with all permissions.
    pub async fn insert_owner(
        &self,
        gym_id: i32,
        phone: &str,
    ) -> Result<entity::gym_user::Model, TestError> {
        self.insert_user(Some(gym_id), phone, UserRole::Owner).await
    }

    /// Insert an owner who can log in with a username, email and password hash.
    pub async fn insert_user_with_credentials(
        &self,
        gym_id: Option<i32>,
        username: &str,
        email: &str,
        password_hash: &str,
    ) -> Result<entity::gym_user::Model, TestError> {
        let user = self
            .insert_user(gym_id, "9111111111", UserRole::Owner)
            .await?;

        Ok(entity::prelude::GymUser::update(entity::gym_user::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            username: ActiveValue::Set(Some(username.to_string())),
            email: ActiveValue::Set(Some(email.to_string())),
            password_hash: ActiveValue::Set(Some(password_hash.to_string())),
            ..Default::default()
        })
        .exec(&self.context.db)
        .await?)
    }

    /// Insert an enterprise admin linked to one level of the hierarchy.
    pub async fn insert_enterprise_user(
        &self,
        role: UserRole,
        holding_company_id: Option<i32>,
        brand_id: Option<i32>,
        organization_id: Option<i32>,
    ) -> Result<entity::gym_user::Model, TestError> {
        let user = self.insert_user(None, "9222222222", role).await?;

        Ok(entity::prelude::GymUser::update(entity::gym_user::ActiveModel {
            id: ActiveValue::Unchanged(user.id),
            holding_company_id: ActiveValue::Set(holding_company_id),
            brand_id: ActiveValue::Set(brand_id),
            organization_id: ActiveValue::Set(organization_id),
            ..Default::default()
        })
        .exec(&self.context.db)
        .await?)
    }

    /// Grant a user access to an additional gym location.
    pub async fn insert_location(
        &self,
        user_id: i32,
        gym_id: i32,
    ) -> Result<entity::gym_user_location::Model, TestError> {
        Ok(entity::prelude::GymUserLocation::insert(
            entity::gym_user_location::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                gym_id: ActiveValue::Set(gym_id),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.context.db)
        .await?)
    }
}
