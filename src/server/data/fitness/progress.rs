use chrono::Utc;
use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};

pub struct ProgressLogRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> ProgressLogRepository<'a, C> {
    /// Creates a new instance of [`ProgressLogRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        mut log: entity::progress_log::ActiveModel,
    ) -> Result<entity::progress_log::Model, DbErr> {
        log.created_at = sea_orm::ActiveValue::Set(Utc::now().naive_utc());

        entity::prelude::ProgressLog::insert(log)
            .exec_with_returning(self.db)
            .await
    }

    /// Progress entries of a member, newest date first
    pub async fn find_by_member(
        &self,
        member_id: i32,
    ) -> Result<Vec<entity::progress_log::Model>, DbErr> {
        entity::prelude::ProgressLog::find()
            .filter(entity::progress_log::Column::MemberId.eq(member_id))
            .order_by_desc(entity::progress_log::Column::Date)
            .order_by_desc(entity::progress_log::Column::Id)
            .all(self.db)
            .await
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;
    use gymedge_test_utils::prelude::*;
    use sea_orm::ActiveValue;

    use crate::server::{data::fitness::progress::ProgressLogRepository, util::time::today};

    /// Expect entries to be listed newest date first
    #[tokio::test]
    async fn lists_newest_first() -> Result<(), TestError> {
        let mut test = TestBuilder::new()
            .with_member_tables()
            .with_table(entity::prelude::ProgressLog)
            .build()
            .await?;
        let gym = test.tenancy().insert_gym("Iron Paradise").await?;
        let member = test.member().insert_member(gym.id, "Ravi", "9876543210").await?;

        let repo = ProgressLogRepository::new(&test.db);
        for (days_ago, weight) in [(14, 82.0), (0, 80.5), (7, 81.2)] {
            repo.create(entity::progress_log::ActiveModel {
                gym_id: ActiveValue::Set(gym.id),
                member_id: ActiveValue::Set(member.id),
                date: ActiveValue::Set(today() - Duration::days(days_ago)),
                weight_kg: ActiveValue::Set(Some(weight)),
                ..Default::default()
            })
            .await?;
        }

        let logs = repo.find_by_member(member.id).await?;
        let weights: Vec<_> = logs.iter().filter_map(|l| l.weight_kg).collect();

        assert_eq!(weights, vec![80.5, 81.2, 82.0]);

        Ok(())
    }
}
