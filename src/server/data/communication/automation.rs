use chrono::{NaiveDateTime, Utc};
use entity::sea_orm_active_enums::AutomationType;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult,
    EntityTrait, IntoActiveModel, ModelTrait, QueryFilter, QueryOrder,
};

pub struct WhatsappAutomationRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> WhatsappAutomationRepository<'a, C> {
    /// Creates a new instance of [`WhatsappAutomationRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        gym_id: i32,
        automation_type: AutomationType,
        days_before: Option<i32>,
        template: String,
        enabled: bool,
    ) -> Result<entity::whatsapp_automation::Model, DbErr> {
        let now = Utc::now().naive_utc();
        let automation = entity::whatsapp_automation::ActiveModel {
            gym_id: ActiveValue::Set(gym_id),
            automation_type: ActiveValue::Set(automation_type),
            days_before: ActiveValue::Set(days_before),
            template: ActiveValue::Set(template),
            enabled: ActiveValue::Set(enabled),
            last_run_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        };

        entity::prelude::WhatsappAutomation::insert(automation)
            .exec_with_returning(self.db)
            .await
    }

    pub async fn get_by_id(
        &self,
        gym_id: i32,
        automation_id: i32,
    ) -> Result<Option<entity::whatsapp_automation::Model>, DbErr> {
        entity::prelude::WhatsappAutomation::find_by_id(automation_id)
            .filter(entity::whatsapp_automation::Column::GymId.eq(gym_id))
            .one(self.db)
            .await
    }

    pub async fn find_by_gym(
        &self,
        gym_id: i32,
    ) -> Result<Vec<entity::whatsapp_automation::Model>, DbErr> {
        entity::prelude::WhatsappAutomation::find()
            .filter(entity::whatsapp_automation::Column::GymId.eq(gym_id))
            .order_by_asc(entity::whatsapp_automation::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn find_enabled(
        &self,
        gym_id: i32,
    ) -> Result<Vec<entity::whatsapp_automation::Model>, DbErr> {
        entity::prelude::WhatsappAutomation::find()
            .filter(entity::whatsapp_automation::Column::GymId.eq(gym_id))
            .filter(entity::whatsapp_automation::Column::Enabled.eq(true))
            .order_by_asc(entity::whatsapp_automation::Column::Id)
            .all(self.db)
            .await
    }

    pub async fn update(
        &self,
        mut automation: entity::whatsapp_automation::ActiveModel,
    ) -> Result<entity::whatsapp_automation::Model, DbErr> {
        automation.updated_at = ActiveValue::Set(Utc::now().naive_utc());

        automation.update(self.db).await
    }

    pub async fn set_last_run(
        &self,
        automation: entity::whatsapp_automation::Model,
        ran_at: NaiveDateTime,
    ) -> Result<entity::whatsapp_automation::Model, DbErr> {
        let mut am = automation.into_active_model();
        am.last_run_at = ActiveValue::Set(Some(ran_at));

        self.update(am).await
    }

    pub async fn delete(
        &self,
        automation: entity::whatsapp_automation::Model,
    ) -> Result<DeleteResult, DbErr> {
        automation.delete(self.db).await
    }
}
