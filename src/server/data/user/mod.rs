//! Staff accounts, their extra gym locations and OTP sessions.

pub mod location;
pub mod otp;

use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ExprTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::model::auth::LoginEntityKind;

pub struct GymUserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GymUserRepository<'a, C> {
    /// Creates a new instance of [`GymUserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a staff account, stamping the timestamp columns
    pub async fn create(
        &self,
        mut user: entity::gym_user::ActiveModel,
    ) -> Result<entity::gym_user::Model, DbErr> {
        let now = Utc::now().naive_utc();
        user.created_at = ActiveValue::Set(now);
        user.updated_at = ActiveValue::Set(now);

        entity::prelude::GymUser::insert(user)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(&self, user_id: i32) -> Result<Option<entity::gym_user::Model>, DbErr> {
        entity::prelude::GymUser::find_by_id(user_id)
            .one(self.db)
            .await
    }

    /// Active accounts sharing a phone number, oldest first
    pub async fn find_active_by_phone(
        &self,
        phone: &str,
    ) -> Result<Vec<entity::gym_user::Model>, DbErr> {
        entity::prelude::GymUser::find()
            .filter(entity::gym_user::Column::Phone.eq(phone))
            .filter(entity::gym_user::Column::IsActive.eq(true))
            .order_by_asc(entity::gym_user::Column::Id)
            .all(self.db)
            .await
    }

    /// First account with the phone regardless of status, used by signup
    pub async fn find_by_phone(
        &self,
        phone: &str,
    ) -> Result<Option<entity::gym_user::Model>, DbErr> {
        entity::prelude::GymUser::find()
            .filter(entity::gym_user::Column::Phone.eq(phone))
            .order_by_asc(entity::gym_user::Column::Id)
            .one(self.db)
            .await
    }

    /// Active account with the phone linked to the entity at the matching level
    pub async fn find_active_by_phone_in_entity(
        &self,
        phone: &str,
        kind: LoginEntityKind,
        entity_id: i32,
    ) -> Result<Option<entity::gym_user::Model>, DbErr> {
        let scope = match kind {
            LoginEntityKind::Gym => entity::gym_user::Column::GymId.eq(entity_id),
            LoginEntityKind::Holding => entity::gym_user::Column::HoldingCompanyId.eq(entity_id),
            LoginEntityKind::Brand => entity::gym_user::Column::BrandId.eq(entity_id),
            LoginEntityKind::Organization => {
                entity::gym_user::Column::OrganizationId.eq(entity_id)
            }
        };

        entity::prelude::GymUser::find()
            .filter(entity::gym_user::Column::Phone.eq(phone))
            .filter(entity::gym_user::Column::IsActive.eq(true))
            .filter(scope)
            .one(self.db)
            .await
    }

    /// Account with the exact (already lowercased) username
    pub async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<entity::gym_user::Model>, DbErr> {
        entity::prelude::GymUser::find()
            .filter(entity::gym_user::Column::Username.eq(username))
            .one(self.db)
            .await
    }

    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::GymUser::find()
            .filter(entity::gym_user::Column::Username.eq(username))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Active account of the gym whose email or username matches case-insensitively.
    ///
    /// Email matches take precedence over username matches.
    pub async fn find_active_in_gym_by_identifier(
        &self,
        gym_id: i32,
        identifier: &str,
    ) -> Result<Option<entity::gym_user::Model>, DbErr> {
        let identifier = identifier.trim().to_lowercase();

        for column in [
            entity::gym_user::Column::Email,
            entity::gym_user::Column::Username,
        ] {
            let user = entity::prelude::GymUser::find()
                .filter(entity::gym_user::Column::GymId.eq(gym_id))
                .filter(entity::gym_user::Column::IsActive.eq(true))
                .filter(Expr::expr(Func::lower(Expr::col(column))).eq(identifier.clone()))
                .one(self.db)
                .await?;

            if user.is_some() {
                return Ok(user);
            }
        }

        Ok(None)
    }

    pub async fn update(
        &self,
        mut user: entity::gym_user::ActiveModel,
    ) -> Result<entity::gym_user::Model, DbErr> {
        user.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        user.update(self.db).await
    }

    pub async fn touch_last_login(
        &self,
        user: entity::gym_user::Model,
    ) -> Result<entity::gym_user::Model, DbErr> {
        let mut am = user.into_active_model();
        am.last_login = ActiveValue::Set(Some(Utc::now().naive_utc()));

        self.update(am).await
    }
}

#[cfg(test)]
mod tests {
    mod find_active_by_phone_in_entity {
        use entity::sea_orm_active_enums::UserRole;
        use gymedge_test_utils::prelude::*;

        use crate::{model::auth::LoginEntityKind, server::data::user::GymUserRepository};

        /// Expect the user to be found only within their own gym
        #[tokio::test]
        async fn scopes_to_gym() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_tenant_tables().build().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let other = test.tenancy().insert_gym("Muscle Hub").await?;
            let user = test
                .user()
                .insert_user(Some(gym.id), "9876543210", UserRole::Owner)
                .await?;

            let repo = GymUserRepository::new(&test.db);
            let own = repo
                .find_active_by_phone_in_entity("9876543210", LoginEntityKind::Gym, gym.id)
                .await?;
            let foreign = repo
                .find_active_by_phone_in_entity("9876543210", LoginEntityKind::Gym, other.id)
                .await?;

            assert_eq!(own.map(|u| u.id), Some(user.id));
            assert!(foreign.is_none());

            Ok(())
        }

        /// Expect enterprise users to be found by their organization
        #[tokio::test]
        async fn scopes_to_organization() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_tenant_tables().build().await?;
            let org = test.tenancy().insert_organization(None, "ORG000001").await?;
            test.user()
                .insert_enterprise_user(UserRole::OrgAdmin, None, None, Some(org.id))
                .await?;

            let repo = GymUserRepository::new(&test.db);
            let found = repo
                .find_active_by_phone_in_entity(
                    "9222222222",
                    LoginEntityKind::Organization,
                    org.id,
                )
                .await?;

            assert!(found.is_some());

            Ok(())
        }
    }

    mod find_active_in_gym_by_identifier {
        use gymedge_test_utils::prelude::*;

        use crate::server::data::user::GymUserRepository;

        /// Expect case-insensitive matches on email and username
        #[tokio::test]
        async fn matches_email_or_username() -> Result<(), TestError> {
            let mut test = TestBuilder::new().with_tenant_tables().build().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let user = test
                .user()
                .insert_user_with_credentials(Some(gym.id), "ravi_fit", "Ravi@Gym.in", "hash")
                .await?;

            let repo = GymUserRepository::new(&test.db);
            let by_email = repo
                .find_active_in_gym_by_identifier(gym.id, "ravi@gym.IN")
                .await?;
            let by_username = repo
                .find_active_in_gym_by_identifier(gym.id, "RAVI_FIT")
                .await?;
            let unknown = repo
                .find_active_in_gym_by_identifier(gym.id, "someone")
                .await?;

            assert_eq!(by_email.map(|u| u.id), Some(user.id));
            assert_eq!(by_username.map(|u| u.id), Some(user.id));
            assert!(unknown.is_none());

            Ok(())
        }

        /// Expect Error when required tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let repo = GymUserRepository::new(&test.db);
            let result = repo.find_active_in_gym_by_identifier(1, "ravi").await;

            assert!(result.is_err());

            Ok(())
        }
    }
}
