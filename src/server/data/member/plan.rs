use chrono::Utc;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ExprTrait,
    IntoActiveModel, QueryFilter, QueryOrder, Select,
};

pub struct MembershipPlanRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MembershipPlanRepository<'a, C> {
    /// Creates a new instance of [`MembershipPlanRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    fn scoped(gym_id: i32) -> Select<entity::membership_plan::Entity> {
        entity::prelude::MembershipPlan::find()
            .filter(entity::membership_plan::Column::GymId.eq(gym_id))
            .filter(entity::membership_plan::Column::IsDeleted.eq(false))
    }

    pub async fn create(
        &self,
        mut plan: entity::membership_plan::ActiveModel,
    ) -> Result<entity::membership_plan::Model, DbErr> {
        let now = Utc::now().naive_utc();
        plan.is_deleted = ActiveValue::Set(false);
        plan.deleted_at = ActiveValue::Set(None);
        plan.created_at = ActiveValue::Set(now);
        plan.updated_at = ActiveValue::Set(now);

        entity::prelude::MembershipPlan::insert(plan)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        gym_id: i32,
        plan_id: i32,
    ) -> Result<Option<entity::membership_plan::Model>, DbErr> {
        Self::scoped(gym_id)
            .filter(entity::membership_plan::Column::Id.eq(plan_id))
            .one(self.db)
            .await
    }

    /// Plans of a gym ordered by duration then price
    pub async fn list(&self, gym_id: i32) -> Result<Vec<entity::membership_plan::Model>, DbErr> {
        Self::scoped(gym_id)
            .order_by_asc(entity::membership_plan::Column::DurationMonths)
            .order_by_asc(entity::membership_plan::Column::Price)
            .order_by_asc(entity::membership_plan::Column::Id)
            .all(self.db)
            .await
    }

    /// Oldest active plan of the gym, the default for imports
    pub async fn first_active(
        &self,
        gym_id: i32,
    ) -> Result<Option<entity::membership_plan::Model>, DbErr> {
        Self::scoped(gym_id)
            .filter(entity::membership_plan::Column::IsActive.eq(true))
            .order_by_asc(entity::membership_plan::Column::Id)
            .one(self.db)
            .await
    }

    /// Plan of the gym whose name matches ignoring case
    pub async fn find_by_name(
        &self,
        gym_id: i32,
        name: &str,
    ) -> Result<Option<entity::membership_plan::Model>, DbErr> {
        Self::scoped(gym_id)
            .filter(
                Expr::expr(Func::lower(Expr::col(entity::membership_plan::Column::Name)))
                    .eq(name.trim().to_lowercase()),
            )
            .order_by_asc(entity::membership_plan::Column::Id)
            .one(self.db)
            .await
    }

    pub async fn update(
        &self,
        mut plan: entity::membership_plan::ActiveModel,
    ) -> Result<entity::membership_plan::Model, DbErr> {
        plan.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        plan.update(self.db).await
    }

    pub async fn soft_delete(
        &self,
        plan: entity::membership_plan::Model,
    ) -> Result<entity::membership_plan::Model, DbErr> {
        let mut am = plan.into_active_model();
        am.is_deleted = ActiveValue::Set(true);
        am.deleted_at = ActiveValue::Set(Some(Utc::now().naive_utc()));

        self.update(am).await
    }
}
