use chrono::{NaiveDateTime, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, Condition, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};

pub struct OtpSessionRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> OtpSessionRepository<'a, C> {
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        phone: &str,
        otp_code: &str,
        expires_at: NaiveDateTime,
    ) -> Result<entity::otp_session::Model, DbErr> {
        entity::prelude::OtpSession::insert(entity::otp_session::ActiveModel {
            phone: ActiveValue::Set(phone.to_string()),
            otp_code: ActiveValue::Set(otp_code.to_string()),
            is_verified: ActiveValue::Set(false),
            attempts: ActiveValue::Set(0),
            expires_at: ActiveValue::Set(expires_at),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        })
        .exec_with_returning(self.db)
        .await
    }

    /// Most recent unverified OTP for the phone
    pub async fn latest_unverified(
        &self,
        phone: &str,
    ) -> Result<Option<entity::otp_session::Model>, DbErr> {
        entity::prelude::OtpSession::find()
            .filter(entity::otp_session::Column::Phone.eq(phone))
            .filter(entity::otp_session::Column::IsVerified.eq(false))
            .order_by_desc(entity::otp_session::Column::CreatedAt)
            .order_by_desc(entity::otp_session::Column::Id)
            .one(self.db)
            .await
    }

    /// Whether an unverified OTP was issued for the phone after `since`
    pub async fn unverified_created_since(
        &self,
        phone: &str,
        since: NaiveDateTime,
    ) -> Result<bool, DbErr> {
        let count = entity::prelude::OtpSession::find()
            .filter(entity::otp_session::Column::Phone.eq(phone))
            .filter(entity::otp_session::Column::IsVerified.eq(false))
            .filter(entity::otp_session::Column::CreatedAt.gte(since))
            .count(self.db)
            .await?;

        Ok(count > 0)
    }

    pub async fn delete_unverified(&self, phone: &str) -> Result<DeleteResult, DbErr> {
        entity::prelude::OtpSession::delete_many()
            .filter(entity::otp_session::Column::Phone.eq(phone))
            .filter(entity::otp_session::Column::IsVerified.eq(false))
            .exec(self.db)
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<DeleteResult, DbErr> {
        entity::prelude::OtpSession::delete_by_id(id)
            .exec(self.db)
            .await
    }

    pub async fn increment_attempts(
        &self,
        otp: entity::otp_session::Model,
    ) -> Result<entity::otp_session::Model, DbErr> {
        let attempts = otp.attempts + 1;
        let mut am = otp.into_active_model();
        am.attempts = ActiveValue::Set(attempts);

        am.update(self.db).await
    }

    pub async fn mark_verified(
        &self,
        otp: entity::otp_session::Model,
    ) -> Result<entity::otp_session::Model, DbErr> {
        let mut am = otp.into_active_model();
        am.is_verified = ActiveValue::Set(true);

        am.update(self.db).await
    }

    /// Deletes expired or verified OTPs created before `created_before`
    pub async fn delete_stale(
        &self,
        now: NaiveDateTime,
        created_before: NaiveDateTime,
    ) -> Result<DeleteResult, DbErr> {
        entity::prelude::OtpSession::delete_many()
            .filter(entity::otp_session::Column::CreatedAt.lt(created_before))
            .filter(
                Condition::any()
                    .add(entity::otp_session::Column::ExpiresAt.lt(now))
                    .add(entity::otp_session::Column::IsVerified.eq(true)),
            )
            .exec(self.db)
            .await
    }
}
