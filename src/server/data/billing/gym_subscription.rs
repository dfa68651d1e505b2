use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};

pub struct GymSubscriptionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GymSubscriptionRepository<'a, C> {
    /// Creates a new instance of [`GymSubscriptionRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Latest subscription of the gym
    pub async fn find_by_gym(
        &self,
        gym_id: i32,
    ) -> Result<Option<entity::gym_subscription::Model>, DbErr> {
        entity::prelude::GymSubscription::find()
            .filter(entity::gym_subscription::Column::GymId.eq(gym_id))
            .order_by_desc(entity::gym_subscription::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn create(
        &self,
        mut subscription: entity::gym_subscription::ActiveModel,
    ) -> Result<entity::gym_subscription::Model, DbErr> {
        let now = Utc::now().naive_utc();
        subscription.created_at = ActiveValue::Set(now);
        subscription.updated_at = ActiveValue::Set(now);

        entity::prelude::GymSubscription::insert(subscription)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn update(
        &self,
        mut subscription: entity::gym_subscription::ActiveModel,
    ) -> Result<entity::gym_subscription::Model, DbErr> {
        subscription.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        subscription.update(self.db).await
    }
}
