use chrono::{NaiveDate, NaiveDateTime};
use entity::sea_orm_active_enums::{LeadSource, LeadStatus};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct LeadDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub source: LeadSource,
    pub goal: Option<String>,
    pub budget_range: Option<String>,
    pub preferred_time: Option<String>,
    pub status: LeadStatus,
    pub lost_reason: Option<String>,
    pub ai_score: Option<i32>,
    pub ai_recommended_action: Option<String>,
    pub ai_follow_up_date: Option<NaiveDate>,
    pub last_contacted_date: Option<NaiveDateTime>,
    pub next_followup_date: Option<NaiveDate>,
    pub trial_date: Option<NaiveDate>,
    pub converted_at: Option<NaiveDateTime>,
    pub assigned_to_id: Option<i32>,
    pub notes: Option<String>,
    pub converted_member_id: Option<i32>,
    pub follow_up_count: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateLeadDto {
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub source: Option<LeadSource>,
    pub goal: Option<String>,
    pub budget_range: Option<String>,
    pub preferred_time: Option<String>,
    pub status: Option<LeadStatus>,
    pub next_followup_date: Option<NaiveDate>,
    pub trial_date: Option<NaiveDate>,
    pub assigned_to_id: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateLeadDto {
    pub name: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub source: Option<LeadSource>,
    pub goal: Option<String>,
    pub budget_range: Option<String>,
    pub preferred_time: Option<String>,
    pub status: Option<LeadStatus>,
    pub lost_reason: Option<String>,
    pub next_followup_date: Option<NaiveDate>,
    pub trial_date: Option<NaiveDate>,
    pub assigned_to_id: Option<i32>,
    pub notes: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LeadListQuery {
    pub status: Option<LeadStatus>,
    pub source: Option<LeadSource>,
    pub assigned_to: Option<i32>,
    /// Case-insensitive match on name, phone or email
    pub search: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct BulkConvertDto {
    pub ids: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ConvertedLeadDto {
    pub id: i32,
    pub name: String,
    pub member_id: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FailedLeadDto {
    pub id: i32,
    pub name: String,
    pub error: String,
}

#[derive(Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct BulkConvertResultDto {
    pub converted: Vec<ConvertedLeadDto>,
    pub failed: Vec<FailedLeadDto>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LeadSummaryDto {
    pub total: u64,
    pub new_this_month: u64,
    pub converted_total: u64,
    pub converted_this_month: u64,
    pub lost: u64,
    pub trials: u64,
    /// Percentage of closed leads that converted, two decimals
    pub conversion_rate: f64,
}
