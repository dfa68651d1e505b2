//! WhatsApp Business API client.
//!
//! Every send is recorded, successful or not: template messages in `whatsapp_message`, raw
//! text messages in `whatsapp_message_log`. Gateway failures are reported through
//! [`SendOutcome`], only database failures are errors. In simulation mode nothing leaves the
//! process.

use std::time::Duration;

use chrono::{NaiveDate, Utc};
use entity::sea_orm_active_enums::{DeliveryStatus, MessageDirection, MessageType};
use sea_orm::{ActiveValue, ConnectionTrait};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::server::{
    config::Config,
    data::communication::{message::WhatsappMessageRepository, message_log::WhatsappMessageLogRepository},
    error::Error,
    util::phone::format_whatsapp_phone,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);
/// Approximate cost of one business-initiated conversation
const MESSAGE_COST_PAISE: i64 = 80;
const RENEWAL_PAYMENT_LINK: &str = "https://pay.gym.in/renew";

/// Result of a WhatsApp send
#[derive(Clone, Debug, PartialEq)]
pub struct SendOutcome {
    pub success: bool,
    pub message_id: Option<String>,
    pub error: Option<String>,
}

impl SendOutcome {
    fn sent(message_id: Option<String>) -> Self {
        Self {
            success: true,
            message_id,
            error: None,
        }
    }

    fn failed(error: String) -> Self {
        Self {
            success: false,
            message_id: None,
            error: Some(error),
        }
    }
}

/// A template message addressed to a member of a gym
pub struct TemplateMessage<'m> {
    pub gym_id: i32,
    pub member_id: Option<i32>,
    pub phone: &'m str,
    pub message_type: MessageType,
    pub template_name: &'m str,
    pub language: &'m str,
    pub components: Value,
}

#[derive(Deserialize)]
struct SendResponse {
    #[serde(default)]
    messages: Vec<SentMessage>,
}

#[derive(Deserialize)]
struct SentMessage {
    id: String,
}

fn text_parameter(name: &str, text: &str) -> Value {
    json!({"type": "text", "parameter_name": name, "text": text})
}

fn gym_team(gym: &entity::gym::Model) -> String {
    format!("{} Team", gym.name)
}

pub struct WhatsappClient<'a, C: ConnectionTrait> {
    db: &'a C,
    http: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a, C: ConnectionTrait> WhatsappClient<'a, C> {
    /// Creates a new instance of [`WhatsappClient`]
    pub fn new(db: &'a C, http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self { db, http, config }
    }

    fn messages_url(&self) -> Option<(String, &str)> {
        let token = self.config.whatsapp_access_token.as_deref()?;
        let phone_number_id = self.config.whatsapp_phone_number_id.as_deref()?;

        Some((
            format!(
                "{}/{}/messages",
                self.config.whatsapp_api_url.trim_end_matches('/'),
                phone_number_id
            ),
            token,
        ))
    }

    /// Posts a payload to the messages endpoint, returning the response body
    async fn post(&self, payload: &Value) -> Result<String, String> {
        let Some((url, token)) = self.messages_url() else {
            return Err("WhatsApp is not configured".to_string());
        };

        let response = self
            .http
            .post(url)
            .bearer_auth(token)
            .timeout(REQUEST_TIMEOUT)
            .json(payload)
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        let body = response.text().await.map_err(|e| e.to_string())?;

        if status.is_success() {
            Ok(body)
        } else {
            Err(format!("HTTP {} | Response: {}", status, body))
        }
    }

    pub async fn send_template(&self, message: TemplateMessage<'_>) -> Result<SendOutcome, Error> {
        let to = format_whatsapp_phone(message.phone);
        let payload = json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "template",
            "template": {
                "name": message.template_name,
                "language": {"code": message.language},
                "components": message.components,
            },
        });

        let mut record = entity::whatsapp_message::ActiveModel {
            gym_id: ActiveValue::Set(message.gym_id),
            member_id: ActiveValue::Set(message.member_id),
            lead_id: ActiveValue::Set(None),
            direction: ActiveValue::Set(MessageDirection::Outbound),
            message_type: ActiveValue::Set(message.message_type),
            recipient_phone: ActiveValue::Set(to.clone()),
            content: ActiveValue::Set(format!("Template: {}", message.template_name)),
            template_name: ActiveValue::Set(Some(message.template_name.to_string())),
            wa_message_id: ActiveValue::Set(None),
            status: ActiveValue::Set(DeliveryStatus::Sent),
            error_message: ActiveValue::Set(None),
            cost_paise: ActiveValue::Set(0),
            ..Default::default()
        };

        let outcome = if self.config.whatsapp_simulation_mode {
            let message_id = format!("sim_{}", Utc::now().timestamp_millis());
            tracing::info!(
                "Simulated WhatsApp template {} to {}",
                message.template_name,
                to
            );

            record.content = ActiveValue::Set(format!(
                "Template: {} | Data: {}",
                message.template_name, payload
            ));
            record.wa_message_id = ActiveValue::Set(Some(message_id.clone()));

            SendOutcome::sent(Some(message_id))
        } else {
            match self.post(&payload).await {
                Ok(body) => {
                    let message_id = serde_json::from_str::<SendResponse>(&body)
                        .ok()
                        .and_then(|r| r.messages.into_iter().next())
                        .map(|m| m.id);

                    record.wa_message_id = ActiveValue::Set(message_id.clone());
                    record.cost_paise = ActiveValue::Set(MESSAGE_COST_PAISE);

                    SendOutcome::sent(message_id)
                }
                Err(e) => {
                    tracing::error!("WhatsApp template {} to {} failed: {}", message.template_name, to, e);

                    record.status = ActiveValue::Set(DeliveryStatus::Failed);
                    record.error_message = ActiveValue::Set(Some(e.clone()));

                    SendOutcome::failed(e)
                }
            }
        };

        WhatsappMessageRepository::new(self.db).create(record).await?;

        Ok(outcome)
    }

    /// Sends free text outside of any template
    pub async fn send_text(
        &self,
        gym_id: i32,
        member_id: Option<i32>,
        phone: &str,
        body: &str,
    ) -> Result<SendOutcome, Error> {
        let to = format_whatsapp_phone(phone);
        let log_repo = WhatsappMessageLogRepository::new(self.db);

        if self.config.whatsapp_simulation_mode {
            tracing::info!("Simulated WhatsApp text to {}", to);

            let log = log_repo
                .create(
                    gym_id,
                    member_id,
                    &to,
                    body,
                    DeliveryStatus::Sent,
                    Some(r#"{"simulation": true, "status": "success"}"#.to_string()),
                )
                .await?;

            return Ok(SendOutcome::sent(Some(format!("sim_{}", log.id))));
        }

        let payload = json!({
            "messaging_product": "whatsapp",
            "to": to,
            "type": "text",
            "text": {"body": body},
        });

        match self.post(&payload).await {
            Ok(response) => {
                let message_id = serde_json::from_str::<SendResponse>(&response)
                    .ok()
                    .and_then(|r| r.messages.into_iter().next())
                    .map(|m| m.id);
                log_repo
                    .create(gym_id, member_id, &to, body, DeliveryStatus::Sent, Some(response))
                    .await?;

                Ok(SendOutcome::sent(message_id))
            }
            Err(e) => {
                tracing::error!("WhatsApp text to {} failed: {}", to, e);
                log_repo
                    .create(
                        gym_id,
                        member_id,
                        &to,
                        body,
                        DeliveryStatus::Failed,
                        Some(e.clone()),
                    )
                    .await?;

                Ok(SendOutcome::failed(e))
            }
        }
    }

    pub async fn send_welcome_message(
        &self,
        gym: &entity::gym::Model,
        member: &entity::member::Model,
    ) -> Result<Option<SendOutcome>, Error> {
        if member.phone.is_empty() {
            return Ok(None);
        }

        let components = json!([
            {
                "type": "header",
                "parameters": [text_parameter("gym_name", &gym.name)],
            },
            {
                "type": "body",
                "parameters": [
                    text_parameter("member_name", &member.name),
                    text_parameter("gym_name", &gym.name),
                    text_parameter("gym_team", &gym_team(gym)),
                ],
            },
        ]);

        self.send_template(TemplateMessage {
            gym_id: gym.id,
            member_id: Some(member.id),
            phone: &member.phone,
            message_type: MessageType::Welcome,
            template_name: "gym_welcome_message",
            language: "en_IN",
            components,
        })
        .await
        .map(Some)
    }

    pub async fn send_renewal_reminder(
        &self,
        gym: &entity::gym::Model,
        member: &entity::member::Model,
        today: NaiveDate,
    ) -> Result<Option<SendOutcome>, Error> {
        if member.phone.is_empty() {
            return Ok(None);
        }

        let days_left = member
            .membership_expiry
            .map(|expiry| (expiry - today).num_days())
            .unwrap_or(0);

        let components = json!([{
            "type": "body",
            "parameters": [
                text_parameter("member_name", &member.name),
                text_parameter("gym_name", &gym.name),
                text_parameter("no_of_days", &days_left.to_string()),
                text_parameter("payment_link", RENEWAL_PAYMENT_LINK),
                text_parameter("gym_team", &gym_team(gym)),
            ],
        }]);

        self.send_template(TemplateMessage {
            gym_id: gym.id,
            member_id: Some(member.id),
            phone: &member.phone,
            message_type: MessageType::ExpiryReminder,
            template_name: "gym_renewal_reminder",
            language: "en",
            components,
        })
        .await
        .map(Some)
    }

    pub async fn send_daily_quote(
        &self,
        gym: &entity::gym::Model,
        member: &entity::member::Model,
        quote: &entity::quote::Model,
    ) -> Result<Option<SendOutcome>, Error> {
        if member.phone.is_empty() {
            return Ok(None);
        }

        let components = json!([{
            "type": "body",
            "parameters": [
                text_parameter("member_name", &member.name),
                text_parameter("gym_name", &gym.name),
                text_parameter("quote", &quote.content),
                text_parameter("gym_team", &gym_team(gym)),
            ],
        }]);

        self.send_template(TemplateMessage {
            gym_id: gym.id,
            member_id: Some(member.id),
            phone: &member.phone,
            message_type: MessageType::Promotion,
            template_name: "gym_daily_motivation",
            language: "en",
            components,
        })
        .await
        .map(Some)
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;
    use mockito::Matcher;
    use sea_orm::EntityTrait;

    use super::*;

    fn live_config(url: String) -> Config {
        Config {
            whatsapp_simulation_mode: false,
            whatsapp_api_url: url,
            whatsapp_access_token: Some("token".to_string()),
            whatsapp_phone_number_id: Some("1055".to_string()),
            ..Config::default()
        }
    }

    async fn whatsapp_test() -> Result<TestContext, TestError> {
        TestBuilder::new()
            .with_member_tables()
            .with_table(entity::prelude::Lead)
            .with_table(entity::prelude::WhatsappMessage)
            .with_table(entity::prelude::WhatsappMessageLog)
            .build()
            .await
    }

    mod send_welcome_message {
        use super::*;

        /// Expect a simulated send to be logged as sent at no cost
        #[tokio::test]
        async fn logs_simulated_send() -> Result<(), TestError> {
            let mut test = whatsapp_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test
                .member()
                .insert_member(gym.id, "Asha", "9876543210")
                .await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let outcome = WhatsappClient::new(&test.db, &http, &config)
                .send_welcome_message(&gym, &member)
                .await
                .unwrap()
                .unwrap();

            let messages = entity::prelude::WhatsappMessage::find().all(&test.db).await?;
            assert!(outcome.success);
            assert_eq!(messages.len(), 1);
            assert_eq!(messages[0].recipient_phone, "919876543210");
            assert_eq!(messages[0].message_type, MessageType::Welcome);
            assert_eq!(messages[0].cost_paise, 0);
            assert!(messages[0]
                .wa_message_id
                .as_deref()
                .is_some_and(|id| id.starts_with("sim_")));
            assert!(messages[0].content.starts_with("Template: gym_welcome_message | Data: "));

            Ok(())
        }

        /// Expect members without a phone to be skipped
        #[tokio::test]
        async fn skips_member_without_phone() -> Result<(), TestError> {
            let mut test = whatsapp_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test.member().insert_member(gym.id, "Asha", "").await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let outcome = WhatsappClient::new(&test.db, &http, &config)
                .send_welcome_message(&gym, &member)
                .await
                .unwrap();

            assert!(outcome.is_none());

            Ok(())
        }
    }

    mod send_template {
        use super::*;

        /// Expect the gateway message id and cost to be recorded
        #[tokio::test]
        async fn records_gateway_message_id() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_member_tables()
                .with_table(entity::prelude::Lead)
                .with_table(entity::prelude::WhatsappMessage)
                .with_mock_endpoint(|server| {
                    server
                        .mock("POST", "/1055/messages")
                        .match_header("authorization", "Bearer token")
                        .match_body(Matcher::PartialJson(json!({
                            "to": "919876543210",
                            "template": {"name": "gym_renewal_reminder"},
                        })))
                        .with_status(200)
                        .with_body(r#"{"messages": [{"id": "wamid.1"}]}"#)
                        .create()
                })
                .build()
                .await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test
                .member()
                .insert_member(gym.id, "Asha", "9876543210")
                .await?;
            let config = live_config(test.server_url());
            let http = reqwest::Client::new();

            let outcome = WhatsappClient::new(&test.db, &http, &config)
                .send_renewal_reminder(&gym, &member, crate::server::util::time::today())
                .await
                .unwrap()
                .unwrap();

            let message = entity::prelude::WhatsappMessage::find()
                .one(&test.db)
                .await?
                .unwrap();
            assert_eq!(outcome.message_id.as_deref(), Some("wamid.1"));
            assert_eq!(message.cost_paise, MESSAGE_COST_PAISE);
            assert_eq!(message.status, DeliveryStatus::Sent);
            test.assert_mocks();

            Ok(())
        }

        /// Expect a gateway error to be logged as failed without an error result
        #[tokio::test]
        async fn records_gateway_failure() -> Result<(), TestError> {
            let mut test = TestBuilder::new()
                .with_member_tables()
                .with_table(entity::prelude::Lead)
                .with_table(entity::prelude::WhatsappMessage)
                .with_mock_endpoint(|server| {
                    server
                        .mock("POST", "/1055/messages")
                        .with_status(400)
                        .with_body(r#"{"error": "bad template"}"#)
                        .create()
                })
                .build()
                .await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let member = test
                .member()
                .insert_member(gym.id, "Asha", "9876543210")
                .await?;
            let config = live_config(test.server_url());
            let http = reqwest::Client::new();

            let outcome = WhatsappClient::new(&test.db, &http, &config)
                .send_welcome_message(&gym, &member)
                .await
                .unwrap()
                .unwrap();

            let message = entity::prelude::WhatsappMessage::find()
                .one(&test.db)
                .await?
                .unwrap();
            assert!(!outcome.success);
            assert_eq!(message.status, DeliveryStatus::Failed);
            assert!(message
                .error_message
                .is_some_and(|e| e.contains("bad template")));

            Ok(())
        }

        /// Expect Error when required tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let result = WhatsappClient::new(&test.db, &http, &config)
                .send_template(TemplateMessage {
                    gym_id: 1,
                    member_id: None,
                    phone: "9876543210",
                    message_type: MessageType::Custom,
                    template_name: "custom",
                    language: "en",
                    components: json!([]),
                })
                .await;

            assert!(matches!(result, Err(Error::DbErr(_))));

            Ok(())
        }
    }

    mod send_text {
        use super::*;

        /// Expect simulated text messages to be logged with the simulation response
        #[tokio::test]
        async fn logs_simulated_text() -> Result<(), TestError> {
            let mut test = whatsapp_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let outcome = WhatsappClient::new(&test.db, &http, &config)
                .send_text(gym.id, None, "98765-43210", "Hello")
                .await
                .unwrap();

            let log = entity::prelude::WhatsappMessageLog::find()
                .one(&test.db)
                .await?
                .unwrap();
            assert!(outcome.success);
            assert_eq!(log.phone, "919876543210");
            assert_eq!(
                log.response.as_deref(),
                Some(r#"{"simulation": true, "status": "success"}"#)
            );

            Ok(())
        }
    }
}
