//! Entity a user identified with before logging in.
//!
//! Set by the entity code step and consumed by the scoped OTP flow.

use tower_sessions::Session;

use crate::{model::auth::LoginEntityDto, server::error::Error};

pub const SESSION_LOGIN_ENTITY_KEY: &str = "gymedge:login:entity";

pub struct SessionLoginEntity;

impl SessionLoginEntity {
    pub async fn insert(session: &Session, entity: &LoginEntityDto) -> Result<(), Error> {
        session.insert(SESSION_LOGIN_ENTITY_KEY, entity).await?;

        Ok(())
    }

    pub async fn get(session: &Session) -> Result<Option<LoginEntityDto>, Error> {
        Ok(session.get(SESSION_LOGIN_ENTITY_KEY).await?)
    }

    pub async fn remove(session: &Session) -> Result<(), Error> {
        session
            .remove::<LoginEntityDto>(SESSION_LOGIN_ENTITY_KEY)
            .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;

    use super::SessionLoginEntity;
    use crate::model::auth::{LoginEntityDto, LoginEntityKind};

    /// Expect the entity to be readable until removed
    #[tokio::test]
    async fn stores_and_removes_entity() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;
        let entity = LoginEntityDto {
            kind: LoginEntityKind::Gym,
            id: 3,
            name: "Iron Paradise".to_string(),
        };

        SessionLoginEntity::insert(&test.session, &entity).await.unwrap();
        let stored = SessionLoginEntity::get(&test.session).await.unwrap();
        assert_eq!(stored, Some(entity));

        SessionLoginEntity::remove(&test.session).await.unwrap();
        let removed = SessionLoginEntity::get(&test.session).await.unwrap();
        assert!(removed.is_none());

        Ok(())
    }
}
