use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Short member view used by dashboard lists
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct MemberBriefDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub membership_expiry: Option<NaiveDate>,
    pub churn_risk_score: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct GymDashboardDto {
    pub total_members: u64,
    pub active_members: u64,
    pub expired_members: u64,
    pub frozen_members: u64,
    pub high_churn_risk: u64,
    /// Revenue fields are zero without the revenue permission
    pub revenue_mtd: i64,
    pub revenue_last_month: i64,
    pub revenue_growth: i64,
    pub pending_renewals_count: u64,
    pub pending_renewals_amount: i64,
    pub risk_inactive_count: u64,
    pub insights: Vec<String>,
    pub recent_members: Vec<MemberBriefDto>,
    pub expiring_soon: Vec<MemberBriefDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct EnterpriseFlagDto {
    pub enterprise: bool,
}

/// Dashboard payload, enterprise accounts only get a flag pointing them elsewhere
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum DashboardDto {
    Enterprise(EnterpriseFlagDto),
    Gym(Box<GymDashboardDto>),
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RevenueDto {
    pub mtd: i64,
    pub last_month: i64,
    pub growth: i64,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RetentionDto {
    pub active_pct: i64,
    pub expired_pct: i64,
    pub at_risk_pct: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthActionsDto {
    pub inactive: Vec<MemberBriefDto>,
    pub expiring: Vec<MemberBriefDto>,
    pub pending: Vec<MemberBriefDto>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BusinessHealthDto {
    pub revenue: RevenueDto,
    pub retention: RetentionDto,
    pub actions: HealthActionsDto,
}
