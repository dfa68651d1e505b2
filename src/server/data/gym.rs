use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, RelationTrait,
};

pub struct GymRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> GymRepository<'a, C> {
    /// Creates a new instance of [`GymRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a gym, stamping the soft-delete and timestamp columns
    pub async fn create(
        &self,
        mut gym: entity::gym::ActiveModel,
    ) -> Result<entity::gym::Model, DbErr> {
        let now = Utc::now().naive_utc();
        gym.is_deleted = ActiveValue::Set(false);
        gym.deleted_at = ActiveValue::Set(None);
        gym.created_at = ActiveValue::Set(now);
        gym.updated_at = ActiveValue::Set(now);

        entity::prelude::Gym::insert(gym)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(&self, gym_id: i32) -> Result<Option<entity::gym::Model>, DbErr> {
        entity::prelude::Gym::find_by_id(gym_id)
            .filter(entity::gym::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    /// Active gym with the given login code
    pub async fn find_active_by_code(
        &self,
        gym_code: &str,
    ) -> Result<Option<entity::gym::Model>, DbErr> {
        entity::prelude::Gym::find()
            .filter(entity::gym::Column::GymCode.eq(gym_code))
            .filter(entity::gym::Column::IsActive.eq(true))
            .filter(entity::gym::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    pub async fn code_exists(&self, gym_code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Gym::find()
            .filter(entity::gym::Column::GymCode.eq(gym_code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn slug_exists(&self, slug: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Gym::find()
            .filter(entity::gym::Column::Slug.eq(slug))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn email_exists(&self, email: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Gym::find()
            .filter(entity::gym::Column::Email.eq(email))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn update(
        &self,
        mut gym: entity::gym::ActiveModel,
    ) -> Result<entity::gym::Model, DbErr> {
        gym.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        gym.update(self.db).await
    }

    /// Active gyms whose SaaS plan includes WhatsApp integration
    pub async fn find_active_with_whatsapp(&self) -> Result<Vec<entity::gym::Model>, DbErr> {
        entity::prelude::Gym::find()
            .join(
                sea_orm::JoinType::InnerJoin,
                entity::gym::Relation::SubscriptionPlan.def(),
            )
            .filter(entity::gym::Column::IsActive.eq(true))
            .filter(entity::gym::Column::IsDeleted.eq(false))
            .filter(entity::subscription_plan::Column::HasWhatsappIntegration.eq(true))
            .order_by_asc(entity::gym::Column::Id)
            .all(self.db)
            .await
    }

    /// Every active gym, used by the nightly jobs
    pub async fn find_active(&self) -> Result<Vec<entity::gym::Model>, DbErr> {
        entity::prelude::Gym::find()
            .filter(entity::gym::Column::IsActive.eq(true))
            .filter(entity::gym::Column::IsDeleted.eq(false))
            .order_by_asc(entity::gym::Column::Id)
            .all(self.db)
            .await
    }

    /// Gyms belonging to any of the organizations
    pub async fn find_by_organization_ids(
        &self,
        organization_ids: &[i32],
    ) -> Result<Vec<entity::gym::Model>, DbErr> {
        if organization_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Gym::find()
            .filter(entity::gym::Column::OrganizationId.is_in(organization_ids.to_vec()))
            .filter(entity::gym::Column::IsDeleted.eq(false))
            .order_by_asc(entity::gym::Column::Name)
            .all(self.db)
            .await
    }
}
