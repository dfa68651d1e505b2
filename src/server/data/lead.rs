use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::LeadStatus;
use sea_orm::{
    sea_query::{Expr, Func},
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait,
    ExprTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, Select,
};

use crate::{model::lead::LeadListQuery, server::data::like_pattern};

pub struct LeadRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> LeadRepository<'a, C> {
    /// Creates a new instance of [`LeadRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    fn scoped(gym_id: i32) -> Select<entity::lead::Entity> {
        entity::prelude::Lead::find()
            .filter(entity::lead::Column::GymId.eq(gym_id))
            .filter(entity::lead::Column::IsDeleted.eq(false))
    }

    /// Leads that are neither converted nor lost
    fn open() -> Condition {
        Condition::all()
            .add(entity::lead::Column::Status.ne(LeadStatus::Converted))
            .add(entity::lead::Column::Status.ne(LeadStatus::Lost))
    }

    /// Inserts a lead, stamping the soft-delete and timestamp columns
    pub async fn create(
        &self,
        mut lead: entity::lead::ActiveModel,
    ) -> Result<entity::lead::Model, DbErr> {
        let now = Utc::now().naive_utc();
        lead.is_deleted = ActiveValue::Set(false);
        lead.deleted_at = ActiveValue::Set(None);
        lead.created_at = ActiveValue::Set(now);
        lead.updated_at = ActiveValue::Set(now);

        entity::prelude::Lead::insert(lead)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        gym_id: i32,
        lead_id: i32,
    ) -> Result<Option<entity::lead::Model>, DbErr> {
        Self::scoped(gym_id)
            .filter(entity::lead::Column::Id.eq(lead_id))
            .one(self.db)
            .await
    }

    /// Leads of the gym among `lead_ids`, ignoring IDs of other gyms
    pub async fn find_by_ids(
        &self,
        gym_id: i32,
        lead_ids: &[i32],
    ) -> Result<Vec<entity::lead::Model>, DbErr> {
        if lead_ids.is_empty() {
            return Ok(Vec::new());
        }

        Self::scoped(gym_id)
            .filter(entity::lead::Column::Id.is_in(lead_ids.to_vec()))
            .order_by_asc(entity::lead::Column::Id)
            .all(self.db)
            .await
    }

    /// Leads of the gym matching the filters, newest first
    pub async fn list(
        &self,
        gym_id: i32,
        filter: &LeadListQuery,
    ) -> Result<Vec<entity::lead::Model>, DbErr> {
        use entity::lead::Column;

        let mut query = Self::scoped(gym_id);
        if let Some(status) = filter.status {
            query = query.filter(Column::Status.eq(status));
        }
        if let Some(source) = filter.source {
            query = query.filter(Column::Source.eq(source));
        }
        if let Some(assigned_to) = filter.assigned_to {
            query = query.filter(Column::AssignedToId.eq(assigned_to));
        }
        if let Some(search) = filter.search.as_deref().filter(|s| !s.trim().is_empty()) {
            let pattern = like_pattern(search);
            query = query.filter(
                Condition::any()
                    .add(Expr::expr(Func::lower(Expr::col(Column::Name))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::Phone))).like(pattern.clone()))
                    .add(Expr::expr(Func::lower(Expr::col(Column::Email))).like(pattern)),
            );
        }

        query
            .order_by_desc(Column::CreatedAt)
            .order_by_desc(Column::Id)
            .all(self.db)
            .await
    }

    /// Open leads of one gym, or of every gym when `gym_id` is `None`
    pub async fn find_open(
        &self,
        gym_id: Option<i32>,
    ) -> Result<Vec<entity::lead::Model>, DbErr> {
        let mut query = entity::prelude::Lead::find()
            .filter(entity::lead::Column::IsDeleted.eq(false))
            .filter(Self::open());

        if let Some(gym_id) = gym_id {
            query = query.filter(entity::lead::Column::GymId.eq(gym_id));
        }

        query
            .order_by_asc(entity::lead::Column::Id)
            .all(self.db)
            .await
    }

    /// Counts leads of a gym, optionally with one status and created since a timestamp
    pub async fn count(
        &self,
        gym_id: i32,
        status: Option<LeadStatus>,
        created_since: Option<NaiveDateTime>,
    ) -> Result<u64, DbErr> {
        let mut query = Self::scoped(gym_id);
        if let Some(status) = status {
            query = query.filter(entity::lead::Column::Status.eq(status));
        }
        if let Some(since) = created_since {
            query = query.filter(entity::lead::Column::CreatedAt.gte(since));
        }

        query.count(self.db).await
    }

    pub async fn count_converted_since(
        &self,
        gym_id: i32,
        since: NaiveDateTime,
    ) -> Result<u64, DbErr> {
        Self::scoped(gym_id)
            .filter(entity::lead::Column::Status.eq(LeadStatus::Converted))
            .filter(entity::lead::Column::ConvertedAt.gte(since))
            .count(self.db)
            .await
    }

    pub async fn update(
        &self,
        mut lead: entity::lead::ActiveModel,
    ) -> Result<entity::lead::Model, DbErr> {
        lead.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        lead.update(self.db).await
    }

    pub async fn soft_delete(
        &self,
        lead: entity::lead::Model,
    ) -> Result<entity::lead::Model, DbErr> {
        let mut am = lead.into_active_model();
        am.is_deleted = ActiveValue::Set(true);
        am.deleted_at = ActiveValue::Set(Some(Utc::now().naive_utc()));

        self.update(am).await
    }
}
