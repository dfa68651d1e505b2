use chrono::NaiveDate;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, QueryFilter, QueryOrder,
};

pub struct QuoteRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> QuoteRepository<'a, C> {
    /// Creates a new instance of [`QuoteRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn find_active(&self) -> Result<Vec<entity::quote::Model>, DbErr> {
        entity::prelude::Quote::find()
            .filter(entity::quote::Column::IsActive.eq(true))
            .order_by_asc(entity::quote::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn mark_sent(
        &self,
        quote: entity::quote::Model,
        date: NaiveDate,
    ) -> Result<entity::quote::Model, DbErr> {
        let mut am = quote.into_active_model();
        am.last_sent = ActiveValue::Set(Some(date));

        am.update(self.db).await
    }
}
