use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::DeliveryStatus;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

use crate::server::data::day_bounds;

pub struct WhatsappMessageLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WhatsappMessageLogRepository<'a, C> {
    /// Creates a new instance of [`WhatsappMessageLogRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        gym_id: i32,
        member_id: Option<i32>,
        phone: &str,
        message: &str,
        status: DeliveryStatus,
        response: Option<String>,
    ) -> Result<entity::whatsapp_message_log::Model, DbErr> {
        let log = entity::whatsapp_message_log::ActiveModel {
            gym_id: ActiveValue::Set(gym_id),
            member_id: ActiveValue::Set(member_id),
            phone: ActiveValue::Set(phone.to_string()),
            message: ActiveValue::Set(message.to_string()),
            status: ActiveValue::Set(status),
            response: ActiveValue::Set(response),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        entity::prelude::WhatsappMessageLog::insert(log)
            .exec_with_returning(self.db)
            .await
    }

    /// Whether the member of the gym already received a raw message on `date`
    pub async fn exists_for_member_on(
        &self,
        gym_id: i32,
        member_id: i32,
        date: NaiveDate,
    ) -> Result<bool, DbErr> {
        let (start, end) = day_bounds(date);

        let count = entity::prelude::WhatsappMessageLog::find()
            .filter(entity::whatsapp_message_log::Column::GymId.eq(gym_id))
            .filter(entity::whatsapp_message_log::Column::MemberId.eq(member_id))
            .filter(entity::whatsapp_message_log::Column::CreatedAt.gte(start))
            .filter(entity::whatsapp_message_log::Column::CreatedAt.lt(end))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }
}
