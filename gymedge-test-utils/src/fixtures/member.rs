use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{
    DietaryPreference, ExperienceLevel, FitnessGoal, MemberStatus,
};
use sea_orm::{ActiveValue, EntityTrait};

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn member<'a>(&'a mut self) -> MemberFixtures<'a> {
        MemberFixtures { context: self }
    }
}

pub struct MemberFixtures<'a> {
    context: &'a mut TestContext,
}

impl<'a> MemberFixtures<'a> {
    pub async fn insert_membership_plan(
        &self,
        gym_id: i32,
        name: &str,
        duration_months: i32,
        price: i64,
    ) -> Result<entity::membership_plan::Model, TestError> {
        let now = Utc::now().naive_utc();

        Ok(
            entity::prelude::MembershipPlan::insert(entity::membership_plan::ActiveModel {
                gym_id: ActiveValue::Set(gym_id),
                name: ActiveValue::Set(name.to_string()),
                duration_months: ActiveValue::Set(duration_months),
                price: ActiveValue::Set(price),
                includes_trainer: ActiveValue::Set(false),
                includes_diet_plan: ActiveValue::Set(false),
                includes_supplements: ActiveValue::Set(false),
                description: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                is_deleted: ActiveValue::Set(false),
                deleted_at: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            })
            .exec_with_returning(&self.context.db)
            .await?,
        )
    }

    /// Insert an active member who joined today with a 30 day membership.
    pub async fn insert_member(
        &self,
        gym_id: i32,
        name: &str,
        phone: &str,
    ) -> Result<entity::member::Model, TestError> {
        let now = Utc::now().naive_utc();
        let today = now.date();

        Ok(entity::prelude::Member::insert(entity::member::ActiveModel {
            gym_id: ActiveValue::Set(gym_id),
            name: ActiveValue::Set(name.to_string()),
            phone: ActiveValue::Set(phone.to_string()),
            email: ActiveValue::Set(None),
            gender: ActiveValue::Set(None),
            date_of_birth: ActiveValue::Set(None),
            goal: ActiveValue::Set(FitnessGoal::GeneralFitness),
            experience_level: ActiveValue::Set(ExperienceLevel::Beginner),
            medical_conditions: ActiveValue::Set(None),
            dietary_preference: ActiveValue::Set(DietaryPreference::Veg),
            height_cm: ActiveValue::Set(None),
            weight_kg: ActiveValue::Set(None),
            body_fat_pct: ActiveValue::Set(None),
            bmi: ActiveValue::Set(None),
            membership_plan_id: ActiveValue::Set(None),
            join_date: ActiveValue::Set(today),
            membership_start: ActiveValue::Set(Some(today)),
            membership_expiry: ActiveValue::Set(Some(today + Duration::days(30))),
            amount_paid: ActiveValue::Set(0),
            assigned_trainer_id: ActiveValue::Set(None),
            attendance_streak: ActiveValue::Set(0),
            last_check_in: ActiveValue::Set(None),
            churn_risk_score: ActiveValue::Set(0),
            status: ActiveValue::Set(MemberStatus::Active),
            emergency_contact: ActiveValue::Set(None),
            is_deleted: ActiveValue::Set(false),
            deleted_at: ActiveValue::Set(None),
            created_at: ActiveValue::Set(now),
            updated_at: ActiveValue::Set(now),
            ..Default::default()
        })
        .exec_with_returning(&self.context.db)
        .await?)
    }

    /// Apply changes to an existing member and return the updated row.
    pub async fn update_member(
        &self,
        member: entity::member::ActiveModel,
    ) -> Result<entity::member::Model, TestError> {
        Ok(entity::prelude::Member::update(member)
            .exec(&self.context.db)
            .await?)
    }
}
