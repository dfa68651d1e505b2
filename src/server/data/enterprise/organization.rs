use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, ExprTrait, PaginatorTrait,
    QueryFilter, QueryOrder,
};

pub struct OrganizationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OrganizationRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        brand_id: Option<i32>,
        name: &str,
        org_code: &str,
        entity_code: &str,
        is_franchise: bool,
    ) -> Result<entity::organization::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::Organization::insert(entity::organization::ActiveModel {
            brand_id: ActiveValue::Set(brand_id),
            name: ActiveValue::Set(name.to_string()),
            org_code: ActiveValue::Set(org_code.to_string()),
            entity_code: ActiveValue::Set(entity_code.to_string()),
            owner_name: ActiveValue::Set(None),
            owner_email: ActiveValue::Set(None),
            owner_phone: ActiveValue::Set(None),
            is_franchise: ActiveValue::Set(is_franchise),
            franchise_start_date: ActiveValue::Set(is_franchise.then(|| now.date())),
            subscription_plan_id: ActiveValue::Set(None),
            is_active: ActiveValue::Set(true),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::organization::Model>, DbErr> {
        entity::prelude::Organization::find_by_id(id)
            .filter(entity::organization::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    pub async fn find_active_by_code(
        &self,
        org_code: &str,
    ) -> Result<Option<entity::organization::Model>, DbErr> {
        entity::prelude::Organization::find()
            .filter(entity::organization::Column::OrgCode.eq(org_code))
            .filter(entity::organization::Column::IsActive.eq(true))
            .filter(entity::organization::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    /// True when either the org code or the entity code is already taken
    pub async fn code_exists(&self, code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::Organization::find()
            .filter(
                entity::organization::Column::OrgCode
                    .eq(code)
                    .or(entity::organization::Column::EntityCode.eq(code)),
            )
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Active, non-deleted franchise organizations, the ones royalties are charged to
    pub async fn find_active_franchises(&self) -> Result<Vec<entity::organization::Model>, DbErr> {
        entity::prelude::Organization::find()
            .filter(entity::organization::Column::IsFranchise.eq(true))
            .filter(entity::organization::Column::IsActive.eq(true))
            .filter(entity::organization::Column::IsDeleted.eq(false))
            .order_by_asc(entity::organization::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_by_brand_ids(
        &self,
        brand_ids: &[i32],
    ) -> Result<Vec<entity::organization::Model>, DbErr> {
        if brand_ids.is_empty() {
            return Ok(Vec::new());
        }

        entity::prelude::Organization::find()
            .filter(entity::organization::Column::BrandId.is_in(brand_ids.to_vec()))
            .filter(entity::organization::Column::IsDeleted.eq(false))
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;
    use sea_orm::{ActiveModelTrait, ActiveValue, IntoActiveModel};

    use super::OrganizationRepository;

    /// Expect inactive organizations to be excluded from franchises
    #[tokio::test]
    async fn finds_active_franchises() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_tenant_tables().build().await?;
        let active = test.tenancy().insert_organization(None, "ORG000001").await?;
        let inactive = test.tenancy().insert_organization(None, "ORG000002").await?;
        let mut am = inactive.into_active_model();
        am.is_active = ActiveValue::Set(false);
        am.update(&test.db).await?;

        let repo = OrganizationRepository::new(&test.db);
        let orgs = repo.find_active_franchises().await?;

        assert_eq!(orgs.len(), 1);
        assert_eq!(orgs[0].id, active.id);

        Ok(())
    }

    /// Expect both org codes and entity codes to count as taken
    #[tokio::test]
    async fn checks_both_codes() -> Result<(), TestError> {
        let mut test = TestBuilder::new().with_tenant_tables().build().await?;
        test.tenancy().insert_organization(None, "ORG000001").await?;

        let repo = OrganizationRepository::new(&test.db);

        assert!(repo.code_exists("ORG000001").await?);
        assert!(repo.code_exists("EORG000001").await?);
        assert!(!repo.code_exists("ORG000009").await?);

        Ok(())
    }

    /// Expect Error when required tables are not present
    #[tokio::test]
    async fn fails_when_tables_missing() -> Result<(), TestError> {
        let test = TestBuilder::new().build().await?;

        let repo = OrganizationRepository::new(&test.db);
        let result = repo.find_active_franchises().await;

        assert!(result.is_err());

        Ok(())
    }
}
