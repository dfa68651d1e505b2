use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct BrandRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BrandRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_by_id(&self, id: i32) -> Result<Option<entity::brand::Model>, DbErr> {
        entity::prelude::Brand::find_by_id(id).one(self.db).await
    }

    pub async fn find_active_by_code(
        &self,
        brand_code: &str,
    ) -> Result<Option<entity::brand::Model>, DbErr> {
        entity::prelude::Brand::find()
            .filter(entity::brand::Column::BrandCode.eq(brand_code))
            .filter(entity::brand::Column::IsActive.eq(true))
            .one(self.db)
            .await
    }

    pub async fn find_by_holding_company(
        &self,
        holding_company_id: i32,
    ) -> Result<Vec<entity::brand::Model>, DbErr> {
        entity::prelude::Brand::find()
            .filter(entity::brand::Column::HoldingCompanyId.eq(holding_company_id))
            .order_by_asc(entity::brand::Column::Name)
            .all(self.db)
            .await
    }
}
