//! Gym members: listing, CRUD, statistics and CSV import.
//!
//! Every operation is scoped to the caller's gym, and trainers only reach the members
//! assigned to them.

pub mod import;
pub mod plan;

use entity::sea_orm_active_enums::{
    DietaryPreference, ExperienceLevel, FitnessGoal, MemberStatus,
};
use sea_orm::{ActiveValue, DatabaseConnection, IntoActiveModel};

use crate::{
    model::member::{
        CreateMemberDto, MemberDto, MemberListQuery, MemberPageDto, MemberStatsDto,
        UpdateMemberDto,
    },
    server::{
        config::Config,
        data::{
            gym::GymRepository,
            member::{plan::MembershipPlanRepository, MemberRepository},
        },
        error::{
            conflict::ConflictError, not_found::NotFoundError, validation::ValidationError, Error,
        },
        service::communication::whatsapp::{SendOutcome, WhatsappClient},
        util::time::{add_months, today},
    },
};

/// Churn risk score at which a member counts as high risk
pub const HIGH_CHURN_THRESHOLD: i32 = 70;

/// Body mass index rounded to one decimal, when both measurements are known
pub fn compute_bmi(height_cm: Option<f64>, weight_kg: Option<f64>) -> Option<f64> {
    let (height_cm, weight_kg) = (height_cm?, weight_kg?);
    if height_cm <= 0.0 || weight_kg <= 0.0 {
        return None;
    }

    let height_m = height_cm / 100.0;

    Some((weight_kg / (height_m * height_m) * 10.0).round() / 10.0)
}

pub fn member_dto(member: entity::member::Model) -> MemberDto {
    MemberDto {
        id: member.id,
        name: member.name,
        phone: member.phone,
        email: member.email,
        gender: member.gender,
        date_of_birth: member.date_of_birth,
        goal: member.goal,
        experience_level: member.experience_level,
        medical_conditions: member.medical_conditions,
        dietary_preference: member.dietary_preference,
        height_cm: member.height_cm,
        weight_kg: member.weight_kg,
        body_fat_pct: member.body_fat_pct,
        bmi: member.bmi,
        membership_plan_id: member.membership_plan_id,
        join_date: member.join_date,
        membership_start: member.membership_start,
        membership_expiry: member.membership_expiry,
        amount_paid: member.amount_paid,
        assigned_trainer_id: member.assigned_trainer_id,
        attendance_streak: member.attendance_streak,
        last_check_in: member.last_check_in,
        churn_risk_score: member.churn_risk_score,
        status: member.status,
        emergency_contact: member.emergency_contact,
        created_at: member.created_at,
    }
}

pub struct MemberService<'a> {
    db: &'a DatabaseConnection,
    http: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> MemberService<'a> {
    /// Creates a new instance of [`MemberService`]
    pub fn new(db: &'a DatabaseConnection, http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self { db, http, config }
    }

    pub async fn list_members(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        filter: &MemberListQuery,
    ) -> Result<MemberPageDto, Error> {
        let page = filter.page.unwrap_or(1).max(1);
        let (members, count) = MemberRepository::new(self.db)
            .list(gym_id, trainer_id, filter, page)
            .await?;

        Ok(MemberPageDto {
            count,
            page,
            results: members.into_iter().map(member_dto).collect(),
        })
    }

    /// Adds a member and sends the WhatsApp welcome message.
    ///
    /// The membership expiry is derived from the plan when not given. A failed welcome
    /// message is logged and does not fail the request.
    pub async fn create_member(
        &self,
        gym_id: i32,
        member: CreateMemberDto,
    ) -> Result<MemberDto, Error> {
        let name = member.name.trim().to_string();
        let phone = member.phone.trim().to_string();
        if name.is_empty() || phone.is_empty() {
            return Err(ValidationError::invalid("Name and phone are required.").into());
        }

        let member_repo = MemberRepository::new(self.db);
        if member_repo.phone_exists(gym_id, &phone, None).await? {
            return Err(ConflictError::DuplicateMemberPhone.into());
        }

        let plan = match member.membership_plan_id {
            Some(plan_id) => Some(
                MembershipPlanRepository::new(self.db)
                    .get_by_id(gym_id, plan_id)
                    .await?
                    .ok_or(NotFoundError::MembershipPlan)?,
            ),
            None => None,
        };

        let join_date = member.join_date.unwrap_or_else(today);
        let membership_start = member.membership_start.unwrap_or(join_date);
        let membership_expiry = member.membership_expiry.or_else(|| {
            plan.as_ref()
                .map(|plan| add_months(membership_start, plan.duration_months))
        });

        let created = member_repo
            .create(entity::member::ActiveModel {
                gym_id: ActiveValue::Set(gym_id),
                name: ActiveValue::Set(name),
                phone: ActiveValue::Set(phone),
                email: ActiveValue::Set(member.email),
                gender: ActiveValue::Set(member.gender),
                date_of_birth: ActiveValue::Set(member.date_of_birth),
                goal: ActiveValue::Set(member.goal.unwrap_or(FitnessGoal::GeneralFitness)),
                experience_level: ActiveValue::Set(
                    member.experience_level.unwrap_or(ExperienceLevel::Beginner),
                ),
                medical_conditions: ActiveValue::Set(member.medical_conditions),
                dietary_preference: ActiveValue::Set(
                    member.dietary_preference.unwrap_or(DietaryPreference::Veg),
                ),
                height_cm: ActiveValue::Set(member.height_cm),
                weight_kg: ActiveValue::Set(member.weight_kg),
                body_fat_pct: ActiveValue::Set(member.body_fat_pct),
                bmi: ActiveValue::Set(compute_bmi(member.height_cm, member.weight_kg)),
                membership_plan_id: ActiveValue::Set(plan.as_ref().map(|plan| plan.id)),
                join_date: ActiveValue::Set(join_date),
                membership_start: ActiveValue::Set(Some(membership_start)),
                membership_expiry: ActiveValue::Set(membership_expiry),
                amount_paid: ActiveValue::Set(member.amount_paid.unwrap_or(0)),
                assigned_trainer_id: ActiveValue::Set(member.assigned_trainer_id),
                attendance_streak: ActiveValue::Set(0),
                last_check_in: ActiveValue::Set(None),
                churn_risk_score: ActiveValue::Set(0),
                status: ActiveValue::Set(member.status.unwrap_or(MemberStatus::Active)),
                emergency_contact: ActiveValue::Set(member.emergency_contact),
                ..Default::default()
            })
            .await?;

        tracing::info!(gym_id = %gym_id, member_id = %created.id, "Created member");

        self.send_welcome(&created).await;

        Ok(member_dto(created))
    }

    async fn send_welcome(&self, member: &entity::member::Model) {
        match self.try_send_welcome(member).await {
            Ok(Some(outcome)) if !outcome.success => tracing::warn!(
                member_id = %member.id,
                "Welcome message was not delivered: {}",
                outcome.error.unwrap_or_default()
            ),
            Err(e) => tracing::warn!(member_id = %member.id, "Failed to send welcome message: {}", e),
            _ => {}
        }
    }

    async fn try_send_welcome(
        &self,
        member: &entity::member::Model,
    ) -> Result<Option<SendOutcome>, Error> {
        let Some(gym) = GymRepository::new(self.db).get_by_id(member.gym_id).await? else {
            return Ok(None);
        };

        WhatsappClient::new(self.db, self.http, self.config)
            .send_welcome_message(&gym, member)
            .await
    }

    pub async fn get_member(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        member_id: i32,
    ) -> Result<MemberDto, Error> {
        let member = MemberRepository::new(self.db)
            .get_by_id(gym_id, member_id, trainer_id)
            .await?
            .ok_or(NotFoundError::Member)?;

        Ok(member_dto(member))
    }

    pub async fn update_member(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        member_id: i32,
        patch: UpdateMemberDto,
    ) -> Result<MemberDto, Error> {
        let member_repo = MemberRepository::new(self.db);
        let member = member_repo
            .get_by_id(gym_id, member_id, trainer_id)
            .await?
            .ok_or(NotFoundError::Member)?;

        if let Some(phone) = patch.phone.as_deref().map(str::trim) {
            if phone.is_empty() {
                return Err(ValidationError::invalid("Phone is required.").into());
            }
            if member_repo
                .phone_exists(gym_id, phone, Some(member.id))
                .await?
            {
                return Err(ConflictError::DuplicateMemberPhone.into());
            }
        }
        if let Some(plan_id) = patch.membership_plan_id {
            MembershipPlanRepository::new(self.db)
                .get_by_id(gym_id, plan_id)
                .await?
                .ok_or(NotFoundError::MembershipPlan)?;
        }

        let height_cm = patch.height_cm.or(member.height_cm);
        let weight_kg = patch.weight_kg.or(member.weight_kg);
        let mut am = member.into_active_model();

        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ValidationError::invalid("Name is required.").into());
            }
            am.name = ActiveValue::Set(name);
        }
        if let Some(phone) = patch.phone {
            am.phone = ActiveValue::Set(phone.trim().to_string());
        }
        if let Some(email) = patch.email {
            am.email = ActiveValue::Set(Some(email));
        }
        if let Some(gender) = patch.gender {
            am.gender = ActiveValue::Set(Some(gender));
        }
        if let Some(date_of_birth) = patch.date_of_birth {
            am.date_of_birth = ActiveValue::Set(Some(date_of_birth));
        }
        if let Some(goal) = patch.goal {
            am.goal = ActiveValue::Set(goal);
        }
        if let Some(experience_level) = patch.experience_level {
            am.experience_level = ActiveValue::Set(experience_level);
        }
        if let Some(medical_conditions) = patch.medical_conditions {
            am.medical_conditions = ActiveValue::Set(Some(medical_conditions));
        }
        if let Some(dietary_preference) = patch.dietary_preference {
            am.dietary_preference = ActiveValue::Set(dietary_preference);
        }
        if patch.height_cm.is_some() || patch.weight_kg.is_some() {
            am.height_cm = ActiveValue::Set(height_cm);
            am.weight_kg = ActiveValue::Set(weight_kg);
            am.bmi = ActiveValue::Set(compute_bmi(height_cm, weight_kg));
        }
        if let Some(body_fat_pct) = patch.body_fat_pct {
            am.body_fat_pct = ActiveValue::Set(Some(body_fat_pct));
        }
        if let Some(plan_id) = patch.membership_plan_id {
            am.membership_plan_id = ActiveValue::Set(Some(plan_id));
        }
        if let Some(membership_start) = patch.membership_start {
            am.membership_start = ActiveValue::Set(Some(membership_start));
        }
        if let Some(membership_expiry) = patch.membership_expiry {
            am.membership_expiry = ActiveValue::Set(Some(membership_expiry));
        }
        if let Some(amount_paid) = patch.amount_paid {
            am.amount_paid = ActiveValue::Set(amount_paid);
        }
        if let Some(trainer) = patch.assigned_trainer_id {
            am.assigned_trainer_id = ActiveValue::Set(Some(trainer));
        }
        if let Some(status) = patch.status {
            am.status = ActiveValue::Set(status);
        }
        if let Some(emergency_contact) = patch.emergency_contact {
            am.emergency_contact = ActiveValue::Set(Some(emergency_contact));
        }

        Ok(member_dto(member_repo.update(am).await?))
    }

    pub async fn delete_member(
        &self,
        gym_id: i32,
        trainer_id: Option<i32>,
        member_id: i32,
    ) -> Result<(), Error> {
        let member_repo = MemberRepository::new(self.db);
        let member = member_repo
            .get_by_id(gym_id, member_id, trainer_id)
            .await?
            .ok_or(NotFoundError::Member)?;

        member_repo.soft_delete(member).await?;

        tracing::info!(gym_id = %gym_id, member_id = %member_id, "Deleted member");

        Ok(())
    }

    pub async fn member_stats(&self, gym_id: i32) -> Result<MemberStatsDto, Error> {
        let member_repo = MemberRepository::new(self.db);
        let gym_ids = [gym_id];

        Ok(MemberStatsDto {
            total_members: member_repo.count(&gym_ids, None).await?,
            active: member_repo
                .count(&gym_ids, Some(MemberStatus::Active))
                .await?,
            expired: member_repo
                .count(&gym_ids, Some(MemberStatus::Expired))
                .await?,
            frozen: member_repo
                .count(&gym_ids, Some(MemberStatus::Frozen))
                .await?,
            cancelled: member_repo
                .count(&gym_ids, Some(MemberStatus::Cancelled))
                .await?,
            high_churn_risk: member_repo
                .count_high_churn(gym_id, HIGH_CHURN_THRESHOLD)
                .await?,
        })
    }
}
