use chrono::{NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::{DietaryPreference, ExperienceLevel, FitnessGoal};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct AttendanceDto {
    pub id: i32,
    pub member_id: i32,
    pub check_in: NaiveDateTime,
    pub check_out: Option<NaiveDateTime>,
    pub duration_minutes: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ProgressLogDto {
    pub id: i32,
    pub member_id: i32,
    pub date: NaiveDate,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub chest_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hips_cm: Option<f64>,
    pub biceps_cm: Option<f64>,
    pub thighs_cm: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct CreateProgressLogDto {
    /// Defaults to today
    pub date: Option<NaiveDate>,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub muscle_mass_kg: Option<f64>,
    pub bmi: Option<f64>,
    pub chest_cm: Option<f64>,
    pub waist_cm: Option<f64>,
    pub hips_cm: Option<f64>,
    pub biceps_cm: Option<f64>,
    pub thighs_cm: Option<f64>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct WorkoutPlanDto {
    pub id: i32,
    pub member_id: i32,
    pub title: String,
    pub goal: FitnessGoal,
    pub duration_weeks: i32,
    pub difficulty: ExperienceLevel,
    #[schema(value_type = Object)]
    pub plan_data: serde_json::Value,
    pub ai_model_used: String,
    pub ai_prompt_tokens: i32,
    pub ai_completion_tokens: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct DietPlanDto {
    pub id: i32,
    pub member_id: i32,
    pub title: String,
    pub goal: FitnessGoal,
    pub dietary_preference: DietaryPreference,
    pub daily_calories: i32,
    pub daily_protein_g: Option<i32>,
    pub daily_carbs_g: Option<i32>,
    pub daily_fat_g: Option<i32>,
    #[schema(value_type = Object)]
    pub plan_data: serde_json::Value,
    pub ai_model_used: String,
    pub ai_prompt_tokens: i32,
    pub ai_completion_tokens: i32,
    pub is_active: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct GenerateWorkoutDto {
    pub member_id: i32,
    pub goal: FitnessGoal,
    pub level: ExperienceLevel,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct GenerateDietDto {
    pub member_id: i32,
    pub calories: i32,
    pub preference: DietaryPreference,
    /// One of `low`, `medium` or `high`
    pub budget: Option<String>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AiUsageDto {
    /// AI calls made by the gym this month
    pub used: u64,
    /// Monthly allowance of the gym's plan, 0 means unlimited
    pub limit: i32,
}
