use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

pub struct DietPlanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> DietPlanRepository<'a, C> {
    /// Creates a new instance of [`DietPlanRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        mut plan: entity::diet_plan::ActiveModel,
    ) -> Result<entity::diet_plan::Model, DbErr> {
        let now = Utc::now().naive_utc();
        plan.is_active = ActiveValue::Set(true);
        plan.created_at = ActiveValue::Set(now);
        plan.updated_at = ActiveValue::Set(now);

        entity::prelude::DietPlan::insert(plan)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        gym_id: i32,
        plan_id: i32,
    ) -> Result<Option<entity::diet_plan::Model>, DbErr> {
        entity::prelude::DietPlan::find_by_id(plan_id)
            .filter(entity::diet_plan::Column::GymId.eq(gym_id))
            .one(self.db)
            .await
    }

    /// Plans of a gym, newest first
    pub async fn find_by_gym(&self, gym_id: i32) -> Result<Vec<entity::diet_plan::Model>, DbErr> {
        entity::prelude::DietPlan::find()
            .filter(entity::diet_plan::Column::GymId.eq(gym_id))
            .order_by_desc(entity::diet_plan::Column::CreatedAt)
            .order_by_desc(entity::diet_plan::Column::Id)
            .all(self.db)
            .await
    }
}
