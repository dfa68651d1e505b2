use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct HoldingStatsDto {
    pub total_brands: u64,
    pub total_gyms: u64,
    pub active_gyms: u64,
    pub total_members: u64,
    pub active_members: u64,
    /// Sum of member payments in paise
    pub total_revenue: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct BrandSummaryDto {
    pub id: i32,
    pub name: String,
    pub brand_code: String,
    pub royalty_basis_points: i32,
    pub royalty_flat_fee: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HoldingDashboardDto {
    pub holding_name: String,
    pub stats: HoldingStatsDto,
    pub brands: Vec<BrandSummaryDto>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrganizationStatsDto {
    pub total_locations: u64,
    pub total_members: u64,
    pub active_members: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LocationDto {
    pub id: i32,
    pub name: String,
    pub city: Option<String>,
    pub member_count: u64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct OrganizationDashboardDto {
    pub organization_name: String,
    pub brand_name: Option<String>,
    pub stats: OrganizationStatsDto,
    pub locations: Vec<LocationDto>,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RoyaltyTermsDto {
    pub royalty_basis_points: i32,
    pub royalty_flat_fee: i64,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoyaltyEntryDto {
    pub id: i32,
    /// Month label such as `January 2026`
    pub month: String,
    pub gross_revenue: i64,
    pub royalty_due: i64,
    pub is_paid: bool,
    pub paid_date: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RoyaltyReportDto {
    pub organization_name: String,
    pub terms: RoyaltyTermsDto,
    pub history: Vec<RoyaltyEntryDto>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct MarkRoyaltyPaidDto {
    pub transaction_ref: Option<String>,
}
