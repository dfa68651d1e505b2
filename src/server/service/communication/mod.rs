//! Member messaging over WhatsApp and the public contact form.

pub mod automation;
pub mod whatsapp;

use sea_orm::{ActiveValue, DatabaseConnection};

use crate::{
    model::communication::{ContactQueryDto, WhatsappMessageDto},
    server::{
        data::communication::{contact::ContactQueryRepository, message::WhatsappMessageRepository},
        error::{validation::ValidationError, Error},
    },
};

/// Messages shown in the gym's WhatsApp history
pub const MESSAGE_HISTORY_LIMIT: u64 = 50;

fn message_dto(message: entity::whatsapp_message::Model) -> WhatsappMessageDto {
    WhatsappMessageDto {
        id: message.id,
        member_id: message.member_id,
        lead_id: message.lead_id,
        direction: message.direction,
        message_type: message.message_type,
        recipient_phone: message.recipient_phone,
        content: message.content,
        template_name: message.template_name,
        wa_message_id: message.wa_message_id,
        status: message.status,
        error_message: message.error_message,
        cost_paise: message.cost_paise,
        created_at: message.created_at,
    }
}

pub struct CommunicationService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> CommunicationService<'a> {
    /// Creates a new instance of [`CommunicationService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Latest WhatsApp messages of the gym, newest first
    pub async fn message_history(&self, gym_id: i32) -> Result<Vec<WhatsappMessageDto>, Error> {
        let messages = WhatsappMessageRepository::new(self.db)
            .find_recent(gym_id, MESSAGE_HISTORY_LIMIT)
            .await?;

        Ok(messages.into_iter().map(message_dto).collect())
    }

    pub async fn submit_contact(
        &self,
        query: ContactQueryDto,
        ip_address: Option<String>,
        user_agent: Option<String>,
    ) -> Result<(), Error> {
        let required = [&query.name, &query.email, &query.subject, &query.message];
        if required.iter().any(|value| value.trim().is_empty()) {
            return Err(ValidationError::invalid("Please fill in all required fields.").into());
        }

        let optional = |value: Option<String>| {
            value
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        let contact = ContactQueryRepository::new(self.db)
            .create(entity::contact_query::ActiveModel {
                name: ActiveValue::Set(query.name.trim().to_string()),
                email: ActiveValue::Set(query.email.trim().to_string()),
                phone: ActiveValue::Set(optional(query.phone)),
                company: ActiveValue::Set(optional(query.company)),
                subject: ActiveValue::Set(query.subject.trim().to_string()),
                message: ActiveValue::Set(query.message.trim().to_string()),
                ip_address: ActiveValue::Set(ip_address),
                user_agent: ActiveValue::Set(user_agent),
                ..Default::default()
            })
            .await?;

        tracing::info!(contact_id = %contact.id, email = %contact.email, "New contact query");

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;
    use sea_orm::EntityTrait;

    use super::*;

    mod submit_contact {
        use super::*;

        fn contact_form() -> ContactQueryDto {
            ContactQueryDto {
                name: "Asha".to_string(),
                email: "asha@example.com".to_string(),
                phone: Some(" ".to_string()),
                company: Some("Iron Paradise".to_string()),
                subject: "Pricing".to_string(),
                message: "Do you offer yearly plans?".to_string(),
            }
        }

        /// Expect a complete form to be stored unresolved with the request metadata
        #[tokio::test]
        async fn stores_query() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(entity::prelude::ContactQuery)
                .build()
                .await?;

            CommunicationService::new(&test.db)
                .submit_contact(
                    contact_form(),
                    Some("203.0.113.9".to_string()),
                    Some("curl/8.0".to_string()),
                )
                .await
                .unwrap();

            let stored = entity::prelude::ContactQuery::find()
                .one(&test.db)
                .await?
                .unwrap();
            assert!(!stored.is_resolved);
            assert_eq!(stored.phone, None);
            assert_eq!(stored.ip_address.as_deref(), Some("203.0.113.9"));

            Ok(())
        }

        /// Expect missing required fields to be rejected
        #[tokio::test]
        async fn rejects_missing_fields() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(entity::prelude::ContactQuery)
                .build()
                .await?;

            let result = CommunicationService::new(&test.db)
                .submit_contact(
                    ContactQueryDto {
                        subject: String::new(),
                        ..contact_form()
                    },
                    None,
                    None,
                )
                .await;

            assert_eq!(
                result.err().map(|e| e.to_string()),
                Some("Please fill in all required fields.".to_string())
            );

            Ok(())
        }
    }

    mod message_history {
        use super::*;

        /// Expect Error when required tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;

            let result = CommunicationService::new(&test.db).message_history(1).await;

            assert!(matches!(result, Err(Error::DbErr(_))));

            Ok(())
        }
    }
}
