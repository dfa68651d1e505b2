//! Scheduled WhatsApp sends: per-gym automations, renewal reminders and daily quotes.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};
use entity::sea_orm_active_enums::{AutomationType, MessageType};
use rand::seq::IndexedRandom;
use sea_orm::{ActiveValue, DatabaseConnection, IntoActiveModel};

use crate::{
    model::communication::{AutomationDto, CreateAutomationDto, UpdateAutomationDto},
    server::{
        config::Config,
        data::{
            communication::{
                automation::WhatsappAutomationRepository, message::WhatsappMessageRepository,
                message_log::WhatsappMessageLogRepository, quote::QuoteRepository,
            },
            day_bounds,
            gym::GymRepository,
            member::{plan::MembershipPlanRepository, MemberRepository},
        },
        error::{not_found::NotFoundError, validation::ValidationError, Error},
        service::communication::whatsapp::WhatsappClient,
        util::time::now,
    },
};

/// Days before expiry at which renewal reminders go out
pub const RENEWAL_REMINDER_DAYS: i64 = 3;

/// Counts reported by one automation run
#[derive(Debug, Default, PartialEq, Eq)]
pub struct AutomationRunSummary {
    pub gyms: u64,
    pub sent: u64,
    pub skipped: u64,
    pub failed: u64,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReminderSummary {
    pub sent: u64,
    pub failed: u64,
}

/// Fills the `{{name}}`, `{{gym_name}}`, `{{expiry_date}}` and `{{plan_name}}` placeholders
pub fn render_template(
    template: &str,
    member: &entity::member::Model,
    gym: &entity::gym::Model,
    plan: Option<&entity::membership_plan::Model>,
) -> String {
    let name = Some(member.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("Member");
    let gym_name = Some(gym.name.as_str())
        .filter(|n| !n.is_empty())
        .unwrap_or("Gym");
    let expiry = member
        .membership_expiry
        .map(|date| date.format("%d %b %Y").to_string())
        .unwrap_or_else(|| "Soon".to_string());
    let plan_name = plan.map(|p| p.name.as_str()).unwrap_or("Your Plan");

    template
        .replace("{{name}}", name)
        .replace("{{gym_name}}", gym_name)
        .replace("{{expiry_date}}", &expiry)
        .replace("{{plan_name}}", plan_name)
}

fn automation_dto(automation: entity::whatsapp_automation::Model) -> AutomationDto {
    AutomationDto {
        id: automation.id,
        automation_type: automation.automation_type,
        days_before: automation.days_before,
        template: automation.template,
        enabled: automation.enabled,
        last_run_at: automation.last_run_at,
    }
}

pub struct AutomationService<'a> {
    db: &'a DatabaseConnection,
    http: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> AutomationService<'a> {
    /// Creates a new instance of [`AutomationService`]
    pub fn new(db: &'a DatabaseConnection, http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self { db, http, config }
    }

    /// Runs every enabled automation of every gym whose plan includes WhatsApp
    pub async fn run_automations(&self, today: NaiveDate) -> Result<AutomationRunSummary, Error> {
        let automation_repo = WhatsappAutomationRepository::new(self.db);
        let member_repo = MemberRepository::new(self.db);
        let plan_repo = MembershipPlanRepository::new(self.db);
        let log_repo = WhatsappMessageLogRepository::new(self.db);
        let client = WhatsappClient::new(self.db, self.http, self.config);

        let mut summary = AutomationRunSummary::default();

        for gym in GymRepository::new(self.db).find_active_with_whatsapp().await? {
            summary.gyms += 1;

            for automation in automation_repo.find_enabled(gym.id).await? {
                let days = Duration::days(i64::from(automation.days_before.unwrap_or(0)));

                let members = match automation.automation_type {
                    AutomationType::ExpiryReminder => {
                        let date = today + days;
                        member_repo
                            .find_active_expiring_between(Some(gym.id), date, date, None)
                            .await?
                    }
                    AutomationType::PaymentPending => {
                        let date = today - days;
                        member_repo
                            .find_by_status_expiring_between(gym.id, None, date, date, None)
                            .await?
                    }
                    AutomationType::InactiveReminder => {
                        let (start, end) = day_bounds(today - days);
                        member_repo
                            .find_active_checked_in_between(gym.id, start, end)
                            .await?
                    }
                    AutomationType::Birthday => {
                        member_repo.find_active_with_birthday(gym.id, today).await?
                    }
                };

                for member in members {
                    if member.phone.is_empty()
                        || log_repo
                            .exists_for_member_on(gym.id, member.id, today)
                            .await?
                    {
                        summary.skipped += 1;
                        continue;
                    }

                    let plan = match member.membership_plan_id {
                        Some(plan_id) => plan_repo.get_by_id(gym.id, plan_id).await?,
                        None => None,
                    };
                    let body = render_template(&automation.template, &member, &gym, plan.as_ref());

                    let outcome = client
                        .send_text(gym.id, Some(member.id), &member.phone, &body)
                        .await?;
                    if outcome.success {
                        summary.sent += 1;
                    } else {
                        summary.failed += 1;
                    }
                }

                automation_repo.set_last_run(automation, now()).await?;
            }
        }

        tracing::info!(
            gyms = summary.gyms,
            sent = summary.sent,
            skipped = summary.skipped,
            failed = summary.failed,
            "Ran WhatsApp automations"
        );

        Ok(summary)
    }

    /// Reminds active members whose membership expires in exactly three days
    pub async fn send_renewal_reminders(&self, today: NaiveDate) -> Result<ReminderSummary, Error> {
        let expiry = today + Duration::days(RENEWAL_REMINDER_DAYS);
        let members = MemberRepository::new(self.db)
            .find_active_expiring_between(None, expiry, expiry, None)
            .await?;

        let client = WhatsappClient::new(self.db, self.http, self.config);
        let mut gyms = GymCache::new(self.db);
        let mut summary = ReminderSummary::default();

        for member in members {
            let Some(gym) = gyms.get(member.gym_id).await? else {
                continue;
            };

            match client.send_renewal_reminder(gym, &member, today).await? {
                Some(outcome) if outcome.success => summary.sent += 1,
                Some(_) => summary.failed += 1,
                None => {}
            }
        }

        tracing::info!(
            sent = summary.sent,
            failed = summary.failed,
            "Sent renewal reminders"
        );

        Ok(summary)
    }

    /// Sends one random active quote to every active member, at most once a day each
    pub async fn send_daily_quotes(&self, today: NaiveDate) -> Result<u64, Error> {
        let quote_repo = QuoteRepository::new(self.db);
        let quotes = quote_repo.find_active().await?;

        let Some(quote) = quotes.choose(&mut rand::rng()).cloned() else {
            tracing::warn!("No active quotes available for the daily motivation");
            return Ok(0);
        };

        let message_repo = WhatsappMessageRepository::new(self.db);
        let client = WhatsappClient::new(self.db, self.http, self.config);
        let mut gyms = GymCache::new(self.db);
        let mut sent = 0;

        for member in MemberRepository::new(self.db).find_active_with_phone().await? {
            if message_repo
                .exists_for_member_on(member.id, MessageType::Promotion, today)
                .await?
            {
                continue;
            }

            let Some(gym) = gyms.get(member.gym_id).await? else {
                continue;
            };

            if let Some(outcome) = client.send_daily_quote(gym, &member, &quote).await? {
                if outcome.success {
                    sent += 1;
                }
            }
        }

        quote_repo.mark_sent(quote, today).await?;

        tracing::info!(sent = sent, "Sent daily quotes");

        Ok(sent)
    }

    pub async fn list(&self, gym_id: i32) -> Result<Vec<AutomationDto>, Error> {
        let automations = WhatsappAutomationRepository::new(self.db)
            .find_by_gym(gym_id)
            .await?;

        Ok(automations.into_iter().map(automation_dto).collect())
    }

    pub async fn create(
        &self,
        gym_id: i32,
        automation: CreateAutomationDto,
    ) -> Result<AutomationDto, Error> {
        let template = automation.template.trim().to_string();
        if template.is_empty() {
            return Err(ValidationError::invalid("Template is required.").into());
        }
        if automation.days_before.is_some_and(|days| days < 0) {
            return Err(ValidationError::invalid("Days before cannot be negative.").into());
        }

        let created = WhatsappAutomationRepository::new(self.db)
            .create(
                gym_id,
                automation.automation_type,
                automation.days_before,
                template,
                automation.enabled.unwrap_or(true),
            )
            .await?;

        Ok(automation_dto(created))
    }

    pub async fn update(
        &self,
        gym_id: i32,
        automation_id: i32,
        patch: UpdateAutomationDto,
    ) -> Result<AutomationDto, Error> {
        let repo = WhatsappAutomationRepository::new(self.db);
        let automation = repo
            .get_by_id(gym_id, automation_id)
            .await?
            .ok_or(NotFoundError::Automation)?;

        let mut am = automation.into_active_model();
        if let Some(days) = patch.days_before {
            if days < 0 {
                return Err(ValidationError::invalid("Days before cannot be negative.").into());
            }
            am.days_before = ActiveValue::Set(Some(days));
        }
        if let Some(template) = patch.template {
            let template = template.trim().to_string();
            if template.is_empty() {
                return Err(ValidationError::invalid("Template is required.").into());
            }
            am.template = ActiveValue::Set(template);
        }
        if let Some(enabled) = patch.enabled {
            am.enabled = ActiveValue::Set(enabled);
        }

        Ok(automation_dto(repo.update(am).await?))
    }

    pub async fn delete(&self, gym_id: i32, automation_id: i32) -> Result<(), Error> {
        let repo = WhatsappAutomationRepository::new(self.db);
        let automation = repo
            .get_by_id(gym_id, automation_id)
            .await?
            .ok_or(NotFoundError::Automation)?;

        repo.delete(automation).await?;

        Ok(())
    }
}

/// Gyms looked up once per batch
struct GymCache<'a> {
    db: &'a DatabaseConnection,
    gyms: HashMap<i32, Option<entity::gym::Model>>,
}

impl<'a> GymCache<'a> {
    fn new(db: &'a DatabaseConnection) -> Self {
        Self {
            db,
            gyms: HashMap::new(),
        }
    }

    async fn get(&mut self, gym_id: i32) -> Result<Option<&entity::gym::Model>, Error> {
        if !self.gyms.contains_key(&gym_id) {
            let gym = GymRepository::new(self.db).get_by_id(gym_id).await?;
            self.gyms.insert(gym_id, gym);
        }

        Ok(self.gyms.get(&gym_id).and_then(Option::as_ref))
    }
}
