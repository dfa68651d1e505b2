use chrono::Utc;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct HoldingCompanyRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> HoldingCompanyRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        name: &str,
        holding_code: &str,
        owner_name: &str,
    ) -> Result<entity::holding_company::Model, DbErr> {
        let now = Utc::now().naive_utc();

        entity::prelude::HoldingCompany::insert(entity::holding_company::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            holding_code: ActiveValue::Set(holding_code.to_string()),
            owner_name: ActiveValue::Set(owner_name.to_string()),
            owner_email: ActiveValue::Set(None),
            owner_phone: ActiveValue::Set(None),
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

    pub async fn get_by_id(
        &self,
        id: i32,
    ) -> Result<Option<entity::holding_company::Model>, DbErr> {
        entity::prelude::HoldingCompany::find_by_id(id)
            .filter(entity::holding_company::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    pub async fn find_active_by_code(
        &self,
        holding_code: &str,
    ) -> Result<Option<entity::holding_company::Model>, DbErr> {
        entity::prelude::HoldingCompany::find()
            .filter(entity::holding_company::Column::HoldingCode.eq(holding_code))
            .filter(entity::holding_company::Column::IsActive.eq(true))
            .filter(entity::holding_company::Column::IsDeleted.eq(false))
            .one(self.db)
            .await
    }

    pub async fn code_exists(&self, holding_code: &str) -> Result<bool, DbErr> {
        let count = entity::prelude::HoldingCompany::find()
            .filter(entity::holding_company::Column::HoldingCode.eq(holding_code))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
