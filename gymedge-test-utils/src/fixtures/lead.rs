use chrono::Utc;
use entity::sea_orm_active_enums::{LeadSource, LeadStatus};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn lead<'a>(&'a mut self) -> LeadFixtures<'a> {
        LeadFixtures { context: self }
    }
}

pub struct LeadFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> LeadFixtures<'a> {
    pub async fn insert_lead(
        &self,
        gym_id: i32,
        name: &str,
        phone: &str,
        source: LeadSource,
        status: LeadStatus,
    ) -> Result<entity::lead::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::Lead::insert(entity::lead::ActiveModel {
            gym_id: ActiveValue::Set(gym_id),
            name: ActiveValue::Set(name.to_string()),
            phone: ActiveValue::Set(phone.to_string()),
            email: ActiveValue::Set(None),
            source: ActiveValue::Set(source),
            goal: ActiveValue::Set(None),
            budget_range: ActiveValue::Set(None),
            preferred_time: ActiveValue::Set(None),
            status: ActiveValue::Set(status),
            lost_reason: ActiveValue::Set(None),
            ai_score: ActiveValue::Set(None),
            ai_recommended_action: ActiveValue::Set(None),
            ai_follow_up_date: ActiveValue::Set(None),
            last_contacted_date: ActiveValue::Set(None),
            next_followup_date: ActiveValue::Set(None),
            trial_date: ActiveValue::Set(None),
            converted_at: ActiveValue::Set(None),
            assigned_to_id: ActiveValue::Set(None),
            notes: ActiveValue::Set(None),
            converted_member_id: ActiveValue::Set(None),
            follow_up_count: ActiveValue::Set(0),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }
}
