use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct SubscriptionPlanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> SubscriptionPlanRepository<'a, C> {
    /// Creates a new instance of [`SubscriptionPlanRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(
        &self,
        plan_id: i32,
    ) -> Result<Option<entity::subscription_plan::Model>, DbErr> {
        entity::prelude::SubscriptionPlan::find_by_id(plan_id)
            .one(self.db)
            .await
    }

    pub async fn find_active_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<entity::subscription_plan::Model>, DbErr> {
        entity::prelude::SubscriptionPlan::find()
            .filter(entity::subscription_plan::Column::Slug.eq(slug))
            .filter(entity::subscription_plan::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    /// Active plans in display order, cheapest first on ties
    pub async fn find_active(&self) -> Result<Vec<entity::subscription_plan::Model>, DbErr> {
        entity::prelude::SubscriptionPlan::find()
            .filter(entity::subscription_plan::Column::IsActive.eq(true))
            .order_by_asc(entity::subscription_plan::Column::DisplayOrder)
            .order_by_asc(entity::subscription_plan::Column::PriceMonthly)
            .all(self.db)
            .await
    }
}
