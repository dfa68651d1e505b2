use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::AiFeature;
use sea_orm::{
    ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, PaginatorTrait, QueryFilter,
};

pub struct AiUsageLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> AiUsageLogRepository<'a, C> {
    /// Creates a new instance of [`AiUsageLogRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts a usage log, deriving `total_tokens` from the prompt and completion counts
    pub async fn create(
        &self,
        mut log: entity::ai_usage_log::ActiveModel,
    ) -> Result<entity::ai_usage_log::Model, DbErr> {
        let prompt = match &log.prompt_tokens {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => *v,
            ActiveValue::NotSet => 0,
        };
        let completion = match &log.completion_tokens {
            ActiveValue::Set(v) | ActiveValue::Unchanged(v) => *v,
            ActiveValue::NotSet => 0,
        };

        log.prompt_tokens = ActiveValue::Set(prompt);
        log.completion_tokens = ActiveValue::Set(completion);
        log.total_tokens = ActiveValue::Set(prompt + completion);
        log.created_at = ActiveValue::Set(Utc::now().naive_utc());

        entity::prelude::AiUsageLog::insert(log)
            .exec_with_returning(self.db)
            .await
    }

    /// Counts the gym's provider calls logged since `since`
    ///
    /// Heuristic lead scoring is logged for reporting but never reaches a provider, so it
    /// is left out of the count the monthly quota is checked against.
    pub async fn count_since(&self, gym_id: i32, since: NaiveDateTime) -> Result<u64, DbErr> {
        entity::prelude::AiUsageLog::find()
            .filter(entity::ai_usage_log::Column::GymId.eq(gym_id))
            .filter(entity::ai_usage_log::Column::CreatedAt.gte(since))
            .filter(entity::ai_usage_log::Column::Feature.ne(AiFeature::LeadScoring))
            .count(self.db)
            .await
    }
}
