//! Sales leads: CRUD, conversion into members, pipeline summary and heuristic scoring.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::{
    AiFeature, DietaryPreference, ExperienceLevel, FitnessGoal, LeadSource, LeadStatus,
    MemberStatus,
};
use sea_orm::{
    ActiveEnum, ActiveValue, DatabaseConnection, IntoActiveModel, TransactionTrait,
};

use crate::{
    model::lead::{
        BulkConvertResultDto, ConvertedLeadDto, CreateLeadDto, FailedLeadDto, LeadDto,
        LeadListQuery, LeadSummaryDto, UpdateLeadDto,
    },
    server::{
        data::{ai_usage::AiUsageLogRepository, lead::LeadRepository, member::MemberRepository},
        error::{
            conflict::ConflictError, not_found::NotFoundError, validation::ValidationError, Error,
        },
        util::time::{month_start, now, today},
    },
};

/// Model name recorded in the usage log for heuristic scores
pub const SCORING_MODEL: &str = "heuristic-v1";

/// Days a converted member is active before a plan is assigned
const CONVERSION_TRIAL_DAYS: i64 = 30;

pub fn lead_dto(lead: entity::lead::Model) -> LeadDto {
    LeadDto {
        id: lead.id,
        name: lead.name,
        phone: lead.phone,
        email: lead.email,
        source: lead.source,
        goal: lead.goal,
        budget_range: lead.budget_range,
        preferred_time: lead.preferred_time,
        status: lead.status,
        lost_reason: lead.lost_reason,
        ai_score: lead.ai_score,
        ai_recommended_action: lead.ai_recommended_action,
        ai_follow_up_date: lead.ai_follow_up_date,
        last_contacted_date: lead.last_contacted_date,
        next_followup_date: lead.next_followup_date,
        trial_date: lead.trial_date,
        converted_at: lead.converted_at,
        assigned_to_id: lead.assigned_to_id,
        notes: lead.notes,
        converted_member_id: lead.converted_member_id,
        follow_up_count: lead.follow_up_count,
        created_at: lead.created_at,
    }
}

/// Score between 0 and 100 for an open lead as of `at`
pub fn lead_score(lead: &entity::lead::Model, at: NaiveDateTime) -> i32 {
    let source = match lead.source {
        LeadSource::Referral => 30,
        LeadSource::Walkin => 25,
        LeadSource::Website | LeadSource::Whatsapp => 20,
        LeadSource::Google => 15,
        LeadSource::Instagram
        | LeadSource::Facebook
        | LeadSource::Justdial
        | LeadSource::Sulekha => 10,
        LeadSource::Other => 5,
    };

    let status = match lead.status {
        LeadStatus::Contacted => 10,
        LeadStatus::Interested => 25,
        LeadStatus::TrialBooked => 35,
        LeadStatus::TrialDone => 45,
        LeadStatus::Negotiating => 50,
        LeadStatus::New | LeadStatus::Converted | LeadStatus::Lost => 0,
    };

    let recency = match lead.last_contacted_date {
        Some(contacted) => match (at.date() - contacted.date()).num_days() {
            ..=3 => 10,
            4..=7 => 5,
            8..=14 => 0,
            _ => -10,
        },
        None if (at.date() - lead.created_at.date()).num_days() > 3 => -5,
        None => 0,
    };

    let goal = match lead.goal.as_deref().map(str::trim) {
        Some(goal) if !goal.is_empty() => 5,
        _ => 0,
    };

    let follow_ups = if lead.follow_up_count >= 5 { -10 } else { 0 };

    (source + status + recency + goal + follow_ups).clamp(0, 100)
}

/// Recommended next action and follow-up date for a score
pub fn recommendation(score: i32, today: NaiveDate) -> (&'static str, NaiveDate) {
    match score {
        70.. => ("Hot lead: call today and offer a joining discount.", today),
        40..=69 => ("Warm lead: book a free trial session.", today + Duration::days(2)),
        _ => (
            "Cold lead: send a WhatsApp follow-up with current offers.",
            today + Duration::days(7),
        ),
    }
}

/// Parses a free-text lead goal such as `"Fat loss"` into a member goal
fn parse_goal(goal: Option<&str>) -> FitnessGoal {
    goal.map(|goal| goal.trim().to_lowercase().replace([' ', '-'], "_"))
        .and_then(|goal| FitnessGoal::try_from_value(&goal).ok())
        .unwrap_or(FitnessGoal::GeneralFitness)
}

pub struct LeadService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LeadService<'a> {
    /// Creates a new instance of [`LeadService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn list_leads(
        &self,
        gym_id: i32,
        filter: &LeadListQuery,
    ) -> Result<Vec<LeadDto>, Error> {
        let leads = LeadRepository::new(self.db).list(gym_id, filter).await?;

        Ok(leads.into_iter().map(lead_dto).collect())
    }

    pub async fn create_lead(&self, gym_id: i32, lead: CreateLeadDto) -> Result<LeadDto, Error> {
        let name = lead.name.trim().to_string();
        let phone = lead.phone.trim().to_string();
        if name.is_empty() || phone.is_empty() {
            return Err(ValidationError::invalid("Name and phone are required.").into());
        }

        let status = lead.status.unwrap_or(LeadStatus::New);
        let contacted = (status == LeadStatus::Contacted).then(now);

        let created = LeadRepository::new(self.db)
            .create(entity::lead::ActiveModel {
                gym_id: ActiveValue::Set(gym_id),
                name: ActiveValue::Set(name),
                phone: ActiveValue::Set(phone),
                email: ActiveValue::Set(lead.email),
                source: ActiveValue::Set(lead.source.unwrap_or(LeadSource::Walkin)),
                goal: ActiveValue::Set(lead.goal),
                budget_range: ActiveValue::Set(lead.budget_range),
                preferred_time: ActiveValue::Set(lead.preferred_time),
                status: ActiveValue::Set(status),
                lost_reason: ActiveValue::Set(None),
                ai_score: ActiveValue::Set(None),
                ai_recommended_action: ActiveValue::Set(None),
                ai_follow_up_date: ActiveValue::Set(None),
                last_contacted_date: ActiveValue::Set(contacted),
                next_followup_date: ActiveValue::Set(lead.next_followup_date),
                trial_date: ActiveValue::Set(lead.trial_date),
                converted_at: ActiveValue::Set(None),
                assigned_to_id: ActiveValue::Set(lead.assigned_to_id),
                notes: ActiveValue::Set(lead.notes),
                converted_member_id: ActiveValue::Set(None),
                follow_up_count: ActiveValue::Set(i32::from(contacted.is_some())),
                ..Default::default()
            })
            .await?;

        tracing::info!(gym_id = %gym_id, lead_id = %created.id, "Created lead");

        Ok(lead_dto(created))
    }

    pub async fn get_lead(&self, gym_id: i32, lead_id: i32) -> Result<LeadDto, Error> {
        let lead = self.find(gym_id, lead_id).await?;

        Ok(lead_dto(lead))
    }

    /// Applies the given fields; moving to `contacted` records the contact attempt
    pub async fn update_lead(
        &self,
        gym_id: i32,
        lead_id: i32,
        update: UpdateLeadDto,
    ) -> Result<LeadDto, Error> {
        let lead = self.find(gym_id, lead_id).await?;
        let follow_up_count = lead.follow_up_count;
        let mut am = lead.into_active_model();

        if let Some(name) = update.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ValidationError::invalid("Name cannot be empty.").into());
            }
            am.name = ActiveValue::Set(name);
        }
        if let Some(phone) = update.phone {
            am.phone = ActiveValue::Set(phone.trim().to_string());
        }
        if let Some(email) = update.email {
            am.email = ActiveValue::Set(Some(email));
        }
        if let Some(source) = update.source {
            am.source = ActiveValue::Set(source);
        }
        if let Some(goal) = update.goal {
            am.goal = ActiveValue::Set(Some(goal));
        }
        if let Some(budget_range) = update.budget_range {
            am.budget_range = ActiveValue::Set(Some(budget_range));
        }
        if let Some(preferred_time) = update.preferred_time {
            am.preferred_time = ActiveValue::Set(Some(preferred_time));
        }
        if let Some(lost_reason) = update.lost_reason {
            am.lost_reason = ActiveValue::Set(Some(lost_reason));
        }
        if let Some(date) = update.next_followup_date {
            am.next_followup_date = ActiveValue::Set(Some(date));
        }
        if let Some(date) = update.trial_date {
            am.trial_date = ActiveValue::Set(Some(date));
        }
        if let Some(assigned_to_id) = update.assigned_to_id {
            am.assigned_to_id = ActiveValue::Set(Some(assigned_to_id));
        }
        if let Some(notes) = update.notes {
            am.notes = ActiveValue::Set(Some(notes));
        }
        if let Some(status) = update.status {
            am.status = ActiveValue::Set(status);
            if status == LeadStatus::Contacted {
                am.last_contacted_date = ActiveValue::Set(Some(now()));
                am.follow_up_count = ActiveValue::Set(follow_up_count + 1);
            }
        }

        let updated = LeadRepository::new(self.db).update(am).await?;

        Ok(lead_dto(updated))
    }

    pub async fn delete_lead(&self, gym_id: i32, lead_id: i32) -> Result<(), Error> {
        let lead = self.find(gym_id, lead_id).await?;
        LeadRepository::new(self.db).soft_delete(lead).await?;

        Ok(())
    }

    /// Turns the lead into an active member with a 30 day membership.
    ///
    /// The member insert and the lead update happen in one transaction.
    pub async fn convert_lead(
        &self,
        gym_id: i32,
        lead_id: i32,
    ) -> Result<ConvertedLeadDto, Error> {
        let lead = self.find(gym_id, lead_id).await?;

        self.convert(lead).await
    }

    /// Converts every listed lead of the gym, collecting per-lead failures
    pub async fn bulk_convert(
        &self,
        gym_id: i32,
        lead_ids: &[i32],
    ) -> Result<BulkConvertResultDto, Error> {
        let leads = LeadRepository::new(self.db)
            .find_by_ids(gym_id, lead_ids)
            .await?;

        let mut result = BulkConvertResultDto::default();
        for lead in leads {
            let (id, name) = (lead.id, lead.name.clone());
            match self.convert(lead).await {
                Ok(converted) => result.converted.push(converted),
                Err(e) => result.failed.push(FailedLeadDto {
                    id,
                    name,
                    error: e.to_string(),
                }),
            }
        }

        Ok(result)
    }

    async fn convert(&self, lead: entity::lead::Model) -> Result<ConvertedLeadDto, Error> {
        if lead.status == LeadStatus::Converted {
            return Err(ConflictError::LeadAlreadyConverted.into());
        }

        let txn = self.db.begin().await?;

        let member_repo = MemberRepository::new(&txn);
        if member_repo
            .phone_exists(lead.gym_id, &lead.phone, None)
            .await?
        {
            return Err(ConflictError::DuplicateMemberPhone.into());
        }

        let start = today();
        let member = member_repo
            .create(entity::member::ActiveModel {
                gym_id: ActiveValue::Set(lead.gym_id),
                name: ActiveValue::Set(lead.name.clone()),
                phone: ActiveValue::Set(lead.phone.clone()),
                email: ActiveValue::Set(lead.email.clone()),
                gender: ActiveValue::Set(None),
                date_of_birth: ActiveValue::Set(None),
                goal: ActiveValue::Set(parse_goal(lead.goal.as_deref())),
                experience_level: ActiveValue::Set(ExperienceLevel::Beginner),
                medical_conditions: ActiveValue::Set(None),
                dietary_preference: ActiveValue::Set(DietaryPreference::Veg),
                height_cm: ActiveValue::Set(None),
                weight_kg: ActiveValue::Set(None),
                body_fat_pct: ActiveValue::Set(None),
                bmi: ActiveValue::Set(None),
                membership_plan_id: ActiveValue::Set(None),
                join_date: ActiveValue::Set(start),
                membership_start: ActiveValue::Set(Some(start)),
                membership_expiry: ActiveValue::Set(Some(
                    start + Duration::days(CONVERSION_TRIAL_DAYS),
                )),
                amount_paid: ActiveValue::Set(0),
                assigned_trainer_id: ActiveValue::Set(lead.assigned_to_id),
                attendance_streak: ActiveValue::Set(0),
                last_check_in: ActiveValue::Set(None),
                churn_risk_score: ActiveValue::Set(0),
                status: ActiveValue::Set(MemberStatus::Active),
                emergency_contact: ActiveValue::Set(None),
                ..Default::default()
            })
            .await?;

        let (lead_id, name) = (lead.id, lead.name.clone());
        let mut am = lead.into_active_model();
        am.status = ActiveValue::Set(LeadStatus::Converted);
        am.converted_at = ActiveValue::Set(Some(now()));
        am.converted_member_id = ActiveValue::Set(Some(member.id));
        LeadRepository::new(&txn).update(am).await?;

        txn.commit().await?;

        tracing::info!(lead_id = %lead_id, member_id = %member.id, "Converted lead to member");

        Ok(ConvertedLeadDto {
            id: lead_id,
            name,
            member_id: member.id,
        })
    }

    pub async fn lead_summary(&self, gym_id: i32) -> Result<LeadSummaryDto, Error> {
        let lead_repo = LeadRepository::new(self.db);
        let since = month_start(today()).and_time(Default::default());

        let total = lead_repo.count(gym_id, None, None).await?;
        let new_this_month = lead_repo.count(gym_id, None, Some(since)).await?;
        let converted_total = lead_repo
            .count(gym_id, Some(LeadStatus::Converted), None)
            .await?;
        let converted_this_month = lead_repo.count_converted_since(gym_id, since).await?;
        let lost = lead_repo.count(gym_id, Some(LeadStatus::Lost), None).await?;
        let trials = lead_repo
            .count(gym_id, Some(LeadStatus::TrialBooked), None)
            .await?
            + lead_repo
                .count(gym_id, Some(LeadStatus::TrialDone), None)
                .await?;

        let closed = converted_total + lost;
        let conversion_rate = if closed == 0 {
            0.0
        } else {
            (converted_total as f64 / closed as f64 * 10_000.0).round() / 100.0
        };

        Ok(LeadSummaryDto {
            total,
            new_this_month,
            converted_total,
            converted_this_month,
            lost,
            trials,
            conversion_rate,
        })
    }

    pub async fn score_lead(&self, gym_id: i32, lead_id: i32) -> Result<LeadDto, Error> {
        let lead = self.find(gym_id, lead_id).await?;
        let scored = self.score(lead, now()).await?;

        Ok(lead_dto(scored))
    }

    /// Scores every open lead of the gym, returning how many were scored
    pub async fn rescore_gym_leads(&self, gym_id: i32) -> Result<usize, Error> {
        let leads = LeadRepository::new(self.db).find_open(Some(gym_id)).await?;
        let at = now();

        let count = leads.len();
        for lead in leads {
            self.score(lead, at).await?;
        }

        Ok(count)
    }

    async fn score(
        &self,
        lead: entity::lead::Model,
        at: NaiveDateTime,
    ) -> Result<entity::lead::Model, Error> {
        let score = lead_score(&lead, at);
        let (action, follow_up) = recommendation(score, at.date());
        let (gym_id, lead_id) = (lead.gym_id, lead.id);

        let mut am = lead.into_active_model();
        am.ai_score = ActiveValue::Set(Some(score));
        am.ai_recommended_action = ActiveValue::Set(Some(action.to_string()));
        am.ai_follow_up_date = ActiveValue::Set(Some(follow_up));
        let scored = LeadRepository::new(self.db).update(am).await?;

        AiUsageLogRepository::new(self.db)
            .create(entity::ai_usage_log::ActiveModel {
                gym_id: ActiveValue::Set(Some(gym_id)),
                user_id: ActiveValue::Set(None),
                feature: ActiveValue::Set(AiFeature::LeadScoring),
                model_used: ActiveValue::Set(SCORING_MODEL.to_string()),
                prompt_tokens: ActiveValue::Set(0),
                completion_tokens: ActiveValue::Set(0),
                cost_usd_micros: ActiveValue::Set(0),
                response_time_ms: ActiveValue::Set(0),
                was_cached: ActiveValue::Set(false),
                was_successful: ActiveValue::Set(true),
                error_message: ActiveValue::Set(None),
                prompt_summary: ActiveValue::Set(Some(format!("Lead #{}", lead_id))),
                ..Default::default()
            })
            .await?;

        Ok(scored)
    }

    async fn find(&self, gym_id: i32, lead_id: i32) -> Result<entity::lead::Model, Error> {
        LeadRepository::new(self.db)
            .get_by_id(gym_id, lead_id)
            .await?
            .ok_or_else(|| NotFoundError::Lead.into())
    }
}
