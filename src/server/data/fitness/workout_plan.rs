use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder,
};

pub struct WorkoutPlanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WorkoutPlanRepository<'a, C> {
    /// Creates a new instance of [`WorkoutPlanRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        mut plan: entity::workout_plan::ActiveModel,
    ) -> Result<entity::workout_plan::Model, DbErr> {
        let now = Utc::now().naive_utc();
        plan.is_active = ActiveValue::Set(true);
        plan.created_at = ActiveValue::Set(now);
        plan.updated_at = ActiveValue::Set(now);

        entity::prelude::WorkoutPlan::insert(plan)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        gym_id: i32,
        plan_id: i32,
    ) -> Result<Option<entity::workout_plan::Model>, DbErr> {
        entity::prelude::WorkoutPlan::find_by_id(plan_id)
            .filter(entity::workout_plan::Column::GymId.eq(gym_id))
            .one(self.db)
            .await
    }

    /// Plans of a gym, newest first
    pub async fn find_by_gym(
        &self,
        gym_id: i32,
    ) -> Result<Vec<entity::workout_plan::Model>, DbErr> {
        entity::prelude::WorkoutPlan::find()
            .filter(entity::workout_plan::Column::GymId.eq(gym_id))
            .order_by_desc(entity::workout_plan::Column::CreatedAt)
            .order_by_desc(entity::workout_plan::Column::Id)
            .all(self.db)
            .await
    }
}
