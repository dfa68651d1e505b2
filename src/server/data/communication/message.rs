use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::MessageType;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::server::data::day_bounds;

pub struct WhatsappMessageRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WhatsappMessageRepository<'a, C> {
    /// Creates a new instance of [`WhatsappMessageRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        mut message: entity::whatsapp_message::ActiveModel,
    ) -> Result<entity::whatsapp_message::Model, DbErr> {
        message.created_at = ActiveValue::Set(Utc::now().naive_utc());

        entity::prelude::WhatsappMessage::insert(message)
            .exec_with_returning(self.db)
            .await
    }

    /// Whether a message of the given type was logged for the member on `date`
    pub async fn exists_for_member_on(
        &self,
        member_id: i32,
        message_type: MessageType,
        date: NaiveDate,
    ) -> Result<bool, DbErr> {
        let (start, end) = day_bounds(date);

        let count = entity::prelude::WhatsappMessage::find()
            .filter(entity::whatsapp_message::Column::MemberId.eq(member_id))
            .filter(entity::whatsapp_message::Column::MessageType.eq(message_type))
            .filter(entity::whatsapp_message::Column::CreatedAt.gte(start))
            .filter(entity::whatsapp_message::Column::CreatedAt.lt(end))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    /// Latest messages of a gym, newest first
    pub async fn find_recent(
        &self,
        gym_id: i32,
        limit: u64,
    ) -> Result<Vec<entity::whatsapp_message::Model>, DbErr> {
        entity::prelude::WhatsappMessage::find()
            .filter(entity::whatsapp_message::Column::GymId.eq(gym_id))
            .order_by_desc(entity::whatsapp_message::Column::CreatedAt)
            .order_by_desc(entity::whatsapp_message::Column::Id)
            .limit(limit)
            .all(self.db)
            .await
    }
}
