use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{
    AutomationType, DeliveryStatus, MessageDirection, MessageType,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AutomationDto {
    pub id: i32,
    pub automation_type: AutomationType,
    pub days_before: Option<i32>,
    pub template: String,
    pub enabled: bool,
    pub last_run_at: Option<NaiveDateTime>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateAutomationDto {
    pub automation_type: AutomationType,
    pub days_before: Option<i32>,
    /// Message text supporting `{{name}}`, `{{gym_name}}`, `{{expiry_date}}` and `{{plan_name}}`
    pub template: String,
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateAutomationDto {
    pub days_before: Option<i32>,
    pub template: Option<String>,
    pub enabled: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct WhatsappMessageDto {
    pub id: i32,
    pub member_id: Option<i32>,
    pub lead_id: Option<i32>,
    pub direction: MessageDirection,
    pub message_type: MessageType,
    pub recipient_phone: String,
    pub content: String,
    pub template_name: Option<String>,
    pub wa_message_id: Option<String>,
    pub status: DeliveryStatus,
    pub error_message: Option<String>,
    pub cost_paise: i64,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct ContactQueryDto {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub subject: String,
    pub message: String,
}
