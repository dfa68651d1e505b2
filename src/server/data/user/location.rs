use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct GymUserLocationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GymUserLocationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        user_id: i32,
        gym_id: i32,
    ) -> Result<entity::gym_user_location::Model, DbErr> {
        entity::prelude::GymUserLocation::insert(entity::gym_user_location::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            gym_id: ActiveValue::Set(gym_id),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Whether the user was granted access to the gym as an additional location
    pub async fn has_location(&self, user_id: i32, gym_id: i32) -> Result<bool, DbErr> {
        let count = entity::prelude::GymUserLocation::find()
            .filter(entity::gym_user_location::Column::UserId.eq(user_id))
            .filter(entity::gym_user_location::Column::GymId.eq(gym_id))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::UserRole;
    use gymedge_test_utils::prelude::*;

    use super::GymUserLocationRepository;

    /// Expect a granted location to be reported for that gym only
    #[tokio::test]
    async fn reports_granted_location() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_tenant_tables().build().await?;
        let home = test.tenancy().insert_gym("Home").await?;
        let branch = test.tenancy().insert_gym("Branch").await?;
        let user = test
            .user()
            .insert_user(Some(home.id), "9876543210", UserRole::Manager)
            .await?;

        let repo = GymUserLocationRepository::new(&test.db);
        repo.create(user.id, branch.id).await?;

        assert!(repo.has_location(user.id, branch.id).await?);
        assert!(!repo.has_location(user.id, home.id).await?);

        Ok(())
    }
}
