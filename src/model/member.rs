use chrono::{NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::{
    DietaryPreference, ExperienceLevel, FitnessGoal, Gender, MemberStatus,
};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MembershipPlanDto {
    pub id: i32,
    pub name: String,
    pub duration_months: i32,
    /// Price in paise
    pub price: i64,
    pub includes_trainer: bool,
    pub includes_diet_plan: bool,
    pub includes_supplements: bool,
    pub description: Option<String>,
    pub is_active: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMembershipPlanDto {
    pub name: String,
    pub duration_months: i32,
    pub price: i64,
    #[serde(default)]
    pub includes_trainer: bool,
    #[serde(default)]
    pub includes_diet_plan: bool,
    #[serde(default)]
    pub includes_supplements: bool,
    pub description: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMembershipPlanDto {
    pub name: Option<String>,
    pub duration_months: Option<i32>,
    pub price: Option<i64>,
    pub includes_trainer: Option<bool>,
    pub includes_diet_plan: Option<bool>,
    pub includes_supplements: Option<bool>,
    pub description: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub goal: FitnessGoal,
    pub experience_level: ExperienceLevel,
    pub medical_conditions: Option<String>,
    pub dietary_preference: DietaryPreference,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub bmi: Option<f64>,
    pub membership_plan_id: Option<i32>,
    pub join_date: NaiveDate,
    pub membership_start: Option<NaiveDate>,
    pub membership_expiry: Option<NaiveDate>,
    /// Amount paid in paise
    pub amount_paid: i64,
    pub assigned_trainer_id: Option<i32>,
    pub attendance_streak: i32,
    pub last_check_in: Option<NaiveDateTime>,
    pub churn_risk_score: i32,
    pub status: MemberStatus,
    pub emergency_contact: Option<String>,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateMemberDto {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub goal: Option<FitnessGoal>,
    pub experience_level: Option<ExperienceLevel>,
    pub medical_conditions: Option<String>,
    pub dietary_preference: Option<DietaryPreference>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub membership_plan_id: Option<i32>,
    pub join_date: Option<NaiveDate>,
    pub membership_start: Option<NaiveDate>,
    pub membership_expiry: Option<NaiveDate>,
    pub amount_paid: Option<i64>,
    pub assigned_trainer_id: Option<i32>,
    pub status: Option<MemberStatus>,
    pub emergency_contact: Option<String>,
}

impl CreateMemberDto {
    /// A minimal member with only the required fields set.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            email: None,
            gender: None,
            date_of_birth: None,
            goal: None,
            experience_level: None,
            medical_conditions: None,
            dietary_preference: None,
            height_cm: None,
            weight_kg: None,
            body_fat_pct: None,
            membership_plan_id: None,
            join_date: None,
            membership_start: None,
            membership_expiry: None,
            amount_paid: None,
            assigned_trainer_id: None,
            status: None,
            emergency_contact: None,
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateMemberDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub date_of_birth: Option<NaiveDate>,
    pub goal: Option<FitnessGoal>,
    pub experience_level: Option<ExperienceLevel>,
    pub medical_conditions: Option<String>,
    pub dietary_preference: Option<DietaryPreference>,
    pub height_cm: Option<f64>,
    pub weight_kg: Option<f64>,
    pub body_fat_pct: Option<f64>,
    pub membership_plan_id: Option<i32>,
    pub membership_start: Option<NaiveDate>,
    pub membership_expiry: Option<NaiveDate>,
    pub amount_paid: Option<i64>,
    pub assigned_trainer_id: Option<i32>,
    pub status: Option<MemberStatus>,
    pub emergency_contact: Option<String>,
}

/// Filters, search and ordering for the member list
#[derive(Clone, Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct MemberListQuery {
    pub status: Option<MemberStatus>,
    pub goal: Option<FitnessGoal>,
    pub gender: Option<Gender>,
    pub experience_level: Option<ExperienceLevel>,
    pub dietary_preference: Option<DietaryPreference>,
    pub assigned_trainer: Option<i32>,
    pub membership_plan: Option<i32>,
    pub expiry_from: Option<NaiveDate>,
    pub expiry_to: Option<NaiveDate>,
    pub joined_from: Option<NaiveDate>,
    pub joined_to: Option<NaiveDate>,
    pub churn_min: Option<i32>,
    pub churn_max: Option<i32>,
    /// Case-insensitive match on name, phone or email
    pub search: Option<String>,
    /// Field to order by, prefix with `-` for descending
    pub ordering: Option<String>,
    /// 1-based page number
    pub page: Option<u64>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MemberPageDto {
    /// Total number of matching members
    pub count: u64,
    pub page: u64,
    pub results: Vec<MemberDto>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MemberStatsDto {
    pub total_members: u64,
    pub active: u64,
    pub expired: u64,
    pub frozen: u64,
    pub cancelled: u64,
    pub high_churn_risk: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ImportResultDto {
    pub success_count: u64,
    pub errors: Vec<String>,
}
