//! Gym members and membership plans.

pub mod plan;

use chrono::{Datelike, NaiveDate, NaiveDateTime, Utc};
use entity::sea_orm_active_enums::MemberStatus;
use sea_orm::{
    sea_query::{Alias, Expr, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    ExprTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select,
};

use crate::{model::member::MemberListQuery, server::data::like_pattern};

/// Members returned per page by [`MemberRepository::list`]
pub const MEMBER_PAGE_SIZE: u64 = 20;

/// Sort column and direction parsed from an `ordering` value such as `-churn_risk_score`.
///
/// Unknown columns fall back to newest first.
pub fn parse_ordering(ordering: Option<&str>) -> (entity::member::Column, sea_orm::Order) {
    use entity::member::Column;

    let ordering = ordering.map(str::trim).unwrap_or("-created_at");
    let (field, order) = match ordering.strip_prefix('-') {
        Some(field) => (field, sea_orm::Order::Desc),
        None => (ordering, sea_orm::Order::Asc),
    };

    match field {
        "name" => (Column::Name, order),
        "join_date" => (Column::JoinDate, order),
        "membership_expiry" => (Column::MembershipExpiry, order),
        "churn_risk_score" => (Column::ChurnRiskScore, order),
        "created_at" => (Column::CreatedAt, order),
        _ => (Column::CreatedAt, sea_orm::Order::Desc),
    }
}

pub struct MemberRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MemberRepository<'a, C> {
    /// Creates a new instance of [`MemberRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Non-deleted members of a gym, optionally limited to one trainer's members
    fn scoped(gym_id: i32, trainer_id: Option<i32>) -> Select<entity::member::Entity> {
        let mut query = entity::prelude::Member::find()
            .filter(entity::member::Column::GymId.eq(gym_id))
            .filter(entity::member::Column::IsDeleted.eq(false));

        if let Some(trainer_id) = trainer_id {
            query = query.filter(entity::member::Column::AssignedTrainerId.eq(trainer_id));
        }

        query
    }

    fn live() -> Select<entity::member::Entity> {
        entity::prelude::Member::find().filter(entity::member::Column::IsDeleted.eq(false))
    }

    /// Inserts a member, stamping the soft-delete and timestamp columns
    pub async fn create(
        &self,
        mut member: entity::member::ActiveModel,
    ) -> Result<entity::member::Model, DbErr> {
        let now = Utc::now().naive_utc();
        member.is_deleted = ActiveValue::Set(false);
        member.deleted_at = ActiveValue::Set(None);
        member.created_at = ActiveValue::Set(now);
        member.updated_at = ActiveValue::Set(now);

        entity::prelude::Member::insert(member)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        gym_id: i32,
        member_id: i32,
        trainer_id: Option<i32>,
    ) -> Result<Option<entity::member::Model>, DbErr> {
        Self::scoped(gym_id, trainer_id)
            .filter(entity::member::Column::Id.eq(member_id))
            .one(self.db)
            .await
    }

    /// Whether another non-deleted member of the gym uses the phone
    pub async fn phone_exists(
        &self,
        gym_id: i32,
        phone: &str,
        exclude_id: Option<i32>,
    ) -> Result<bool, DbErr> {
        let mut query =
            Self::scoped(gym_id, None).filter(entity::member::Column::Phone.eq(phone));

        if let Some(exclude_id) = exclude_id {
            query = query.filter(entity::member::Column::Id.ne(exclude_id));
        }

        Ok(query.count(self.db).await? > 0)
    }

    /// One page of members matching the filters, plus the total match count.
    ///
    /// `page` is 1-based; values below 1 are treated as the first page.
    pub async fn list(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        filter: &MemberListQuery,
        page: u64,
    ) -> Result<(Vec<entity::member::Model>, u64), DbErr> {
        use entity::member::Column;

        let mut condition = Condition::all();
        if let Some(status) = filter.status {
            condition = condition.add(Column::Status.eq(status));
        }
        if let Some(goal) = filter.goal {
            condition = condition.add(Column::Goal.eq(goal));
        }
        if let Some(gender) = filter.gender {
            condition = condition.add(Column::Gender.eq(gender));
        }
        if let Some(level) = filter.experience_level {
            condition = condition.add(Column::ExperienceLevel.eq(level));
        }
        if let Some(preference) = filter.dietary_preference {
            condition = condition.add(Column::DietaryPreference.eq(preference));
        }
        if let Some(trainer) = filter.assigned_trainer {
            condition = condition.add(Column::AssignedTrainerId.eq(trainer));
        }
        if let Some(plan) = filter.membership_plan {
            condition = condition.add(Column::MembershipPlanId.eq(plan));
        }
        if let Some(from) = filter.expiry_from {
            condition = condition.add(Column::MembershipExpiry.gte(from));
        }
        if let Some(to) = filter.expiry_to {
            condition = condition.add(Column::MembershipExpiry.lte(to));
        }
        if let Some(from) = filter.joined_from {
            condition = condition.add(Column::JoinDate.gte(from));
        }
        if let Some(to) = filter.joined_to {
            condition = condition.add(Column::JoinDate.lte(to));
        }
        if let Some(min) = filter.churn_min {
            condition = condition.add(Column::ChurnRiskScore.gte(min));
        }
        if let Some(max) = filter.churn_max {
            condition = condition.add(Column::ChurnRiskScore.lte(max));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(search);
            condition = condition.add(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(Column::Name))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::Phone))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::Email))).like(pattern)),
            );
        }

        let query = Self::scoped(gym_id, trainer_id).filter(condition);
        let count = query.clone().count(self.db).await?;

        let (column, order) = parse_ordering(filter.ordering.as_deref());
        let members = query
            .order_by(column, order)
            .order_by_desc(Column::Id)
            .offset((Ord::max(page, 1) - 1) * MEMBER_PAGE_SIZE)
            .limit(MEMBER_PAGE_SIZE)
            .all(self.db)
            .await?;

        Ok((members, count))
    }

    pub async fn update(
        &self,
        mut member: entity::member::ActiveModel,
    ) -> Result<entity::member::Model, DbErr> {
        member.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        member.update(self.db).await
    }

    pub async fn soft_delete(
        &self,
        member: entity::member::Model,
    ) -> Result<entity::member::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let mut am = member.into_active_model();
        am.is_deleted = ActiveValue::Set(true);
        am.deleted_at = ActiveValue::Set(Some(now));

        self.update(am).await
    }

    /// Counts non-deleted members of the gyms, optionally with one status
    pub async fn count(
        &self,
        gym_ids: &[i32],
        status: Option<MemberStatus>,
    ) -> Result<u64, DbErr> {
        if gym_ids.is_empty() {
            return Ok(0);
        }

        let mut query = Self::live().filter(entity::member::Column::GymId.is_in(gym_ids.to_vec()));
        if let Some(status) = status {
            query = query.filter(entity::member::Column::Status.eq(status));
        }

        query.count(self.db).await
    }

    pub async fn count_high_churn(&self, gym_id: i32, threshold: i32) -> Result<u64, DbErr> {
        Self::scoped(gym_id, None)
            .filter(entity::member::Column::ChurnRiskScore.gte(threshold))
            .count(self.db)
            .await
    }

    /// Σ `amount_paid` of members of the gyms who joined in `[from, to)`
    pub async fn sum_amount_paid(
        &self,
        gym_ids: &[i32],
        from: Option<NaiveDate>,
        to: Option<NaiveDate>,
    ) -> Result<i64, DbErr> {
        if gym_ids.is_empty() {
            return Ok(0);
        }

        let mut query = Self::live().filter(entity::member::Column::GymId.is_in(gym_ids.to_vec()));
        if let Some(from) = from {
            query = query.filter(entity::member::Column::JoinDate.gte(from));
        }
        if let Some(to) = to {
            query = query.filter(entity::member::Column::JoinDate.lt(to));
        }

        // Postgres widens SUM(bigint) to numeric
        let total: Option<Option<i64>> = query
            .select_only()
            .column_as(
                Expr::from(Func::cast_as(
                    Func::sum(Expr::col(entity::member::Column::AmountPaid)),
                    Alias::new("BIGINT"),
                )),
                "total",
            )
            .into_tuple()
            .one(self.db)
            .await?;

        Ok(total.flatten().unwrap_or(0))
    }

    /// Most recently created members of a gym
    pub async fn find_recent(
        &self,
        gym_id: i32,
        limit: u64,
    ) -> Result<Vec<entity::member::Model>, DbErr> {
        Self::scoped(gym_id, None)
            .order_by_desc(entity::member::Column::CreatedAt)
            .order_by_desc(entity::member::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Active members whose expiry falls in `[from, to]`, soonest first.
    ///
    /// Without a gym every gym is searched.
    pub async fn find_active_expiring_between(
        &self,
        gym_id: Option<i32>,
        from: NaiveDate,
        to: NaiveDate,
        limit: Option<u64>,
    ) -> Result<Vec<entity::member::Model>, DbErr> {
        let mut query = Self::live()
            .filter(entity::member::Column::Status.eq(MemberStatus::Active))
            .filter(entity::member::Column::MembershipExpiry.gte(from))
            .filter(entity::member::Column::MembershipExpiry.lte(to));

        if let Some(gym_id) = gym_id {
            query = query.filter(entity::member::Column::GymId.eq(gym_id));
        }

        query
            .order_by_asc(entity::member::Column::MembershipExpiry)
            .order_by_asc(entity::member::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Members with the given status whose expiry falls in `[from, to]`
    pub async fn find_by_status_expiring_between(
        &self,
        gym_id: i32,
        status: Option<MemberStatus>,
        from: NaiveDate,
        to: NaiveDate,
        limit: Option<u64>,
    ) -> Result<Vec<entity::member::Model>, DbErr> {
        let mut query = Self::scoped(gym_id, None)
            .filter(entity::member::Column::MembershipExpiry.gte(from))
            .filter(entity::member::Column::MembershipExpiry.lte(to));

        if let Some(status) = status {
            query = query.filter(entity::member::Column::Status.eq(status));
        }

        query
            .order_by_asc(entity::member::Column::MembershipExpiry)
            .order_by_asc(entity::member::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }

    /// Active members of a gym whose last check-in is before `cutoff`
    pub async fn find_active_inactive_since(
        &self,
        gym_id: i32,
        cutoff: NaiveDateTime,
        limit: Option<u64>,
    ) -> Result<Vec<entity::member::Model>, DbErr> {
        Self::scoped(gym_id, None)
            .filter(entity::member::Column::Status.eq(MemberStatus::Active))
            .filter(entity::member::Column::LastCheckIn.lt(cutoff))
            .order_by_asc(entity::member::Column::LastCheckIn)
            .limit(limit)
            .all(self.db)
            .await
    }

    pub async fn count_active_inactive_since(
        &self,
        gym_id: i32,
        cutoff: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        Self::scoped(gym_id, None)
            .filter(entity::member::Column::Status.eq(MemberStatus::Active))
            .filter(entity::member::Column::LastCheckIn.lt(cutoff))
            .count(self.db)
            .await
    }

    /// Active members of a gym whose last check-in falls in `[start, end)`
    pub async fn find_active_checked_in_between(
        &self,
        gym_id: i32,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Result<Vec<entity::member::Model>, DbErr> {
        Self::scoped(gym_id, None)
            .filter(entity::member::Column::Status.eq(MemberStatus::Active))
            .filter(entity::member::Column::LastCheckIn.gte(start))
            .filter(entity::member::Column::LastCheckIn.lt(end))
            .all(self.db)
            .await
    }

    /// Active members of a gym born on the same day and month as `date`
    pub async fn find_active_with_birthday(
        &self,
        gym_id: i32,
        date: NaiveDate,
    ) -> Result<Vec<entity::member::Model>, DbErr> {
        let members = Self::scoped(gym_id, None)
            .filter(entity::member::Column::Status.eq(MemberStatus::Active))
            .filter(entity::member::Column::DateOfBirth.is_not_null())
            .all(self.db)
            .await?;

        Ok(members
            .into_iter()
            .filter(|m| {
                m.date_of_birth
                    .is_some_and(|dob| dob.month() == date.month() && dob.day() == date.day())
            })
            .collect())
    }

    /// Active members across all gyms that have a phone number
    pub async fn find_active_with_phone(&self) -> Result<Vec<entity::member::Model>, DbErr> {
        Self::live()
            .filter(entity::member::Column::Status.eq(MemberStatus::Active))
            .filter(entity::member::Column::Phone.ne(""))
            .order_by_asc(entity::member::Column::Id)
            .all(self.db)
            .await
    }

    /// Every non-deleted member across all gyms
    pub async fn find_all_live(&self) -> Result<Vec<entity::member::Model>, DbErr> {
        Self::live()
            .order_by_asc(entity::member::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn set_churn_score(&self, member_id: i32, score: i32) -> Result<(), DbErr> {
        entity::prelude::Member::update_many()
            .col_expr(entity::member::Column::ChurnRiskScore, Expr::value(score))
            .filter(entity::member::Column::Id.eq(member_id))
            .exec(self.db)
            .await?;

        Ok(())
    }
}
