use chrono::Utc;
use entity::sea_orm_active_enums::AutomationType;
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn communications<'a>(&'a mut self) -> CommunicationsFixtures<'a> {
        CommunicationsFixtures { context: self }
    }
}

pub struct CommunicationsFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> CommunicationsFixtures<'a> {
    /// Insert an enabled automation for a gym.
    pub async fn insert_automation(
        &self,
        gym_id: i32,
        automation_type: AutomationType,
        days_before: Option<i32>,
        template: &str,
    ) -> Result<entity::whatsapp_automation::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::WhatsappAutomation::insert(
            entity::whatsapp_automation::ActiveModel {
                gym_id: ActiveValue::Set(gym_id),
                automation_type: ActiveValue::Set(automation_type),
                days_before: ActiveValue::Set(days_before),
                template: ActiveValue::Set(template.to_string()),
                enabled: ActiveValue::Set(true),
                last_run_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            },
        )
        .exec_with_returning(&self.context.db)
        .await?)
    }

    pub async fn insert_quote(
        &self,
        content: &str,
    ) -> Result<entity::quote::Model, TestError> {
        Ok(entity::prelude::Quote::insert(entity::quote::ActiveModel {
            content: ActiveValue::Set(content.to_string()),
            author: ActiveValue::Set(Some("Unknown".to_string())),
            is_active: ActiveValue::Set(true),
            last_sent: ActiveValue::Set(None),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }
}
