use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::{GymType, SubscriptionStatus};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct GymDto {
    pub id: i32,
    pub name: String,
    pub slug: String,
    pub gym_code: String,
    pub brand_color: String,
    pub font_family: String,
    /// Logo as a data URI ready for an `<img src>`
    pub logo_data_uri: Option<String>,
    pub owner_name: String,
    pub owner_phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    pub gym_type: GymType,
    pub member_capacity: i32,
    pub subscription_plan_id: Option<i32>,
    pub subscription_status: SubscriptionStatus,
    pub trial_ends_at: Option<NaiveDateTime>,
    pub organization_id: Option<i32>,
}

/// Branding and address changes, absent fields are left untouched
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateGymDto {
    pub name: Option<String>,
    pub brand_color: Option<String>,
    pub font_family: Option<String>,
    /// Base64 image or data URI
    pub logo: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}
