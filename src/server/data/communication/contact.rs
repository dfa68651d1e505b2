use chrono::Utc;
use sea_orm::{ActiveValue, ConnectionTrait, DbErr, EntityTrait};

pub struct ContactQueryRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ContactQueryRepository<'a, C> {
    /// Creates a new instance of [`ContactQueryRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Stores an unresolved contact form submission
    pub async fn create(
        &self,
        mut query: entity::contact_query::ActiveModel,
    ) -> Result<entity::contact_query::Model, DbErr> {
        query.is_resolved = ActiveValue::Set(false);
        query.created_at = ActiveValue::Set(Utc::now().naive_utc());

        entity::prelude::ContactQuery::insert(query)
            .exec_with_returning(self.db)
            .await
    }
}
