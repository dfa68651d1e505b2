use chrono::NaiveDateTime;
use entity::sea_orm_active_enums::UserRole;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Kind of entity a login code resolved to
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum LoginEntityKind {
    Gym,
    Holding,
    Brand,
    Organization,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoginEntityDto {
    pub kind: LoginEntityKind,
    pub id: i32,
    pub name: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct EntityCodeDto {
    pub code: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SendOtpDto {
    pub phone: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SendOtpResponseDto {
    pub message: String,
    /// Minutes until the code expires
    pub expires_in_minutes: i64,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpDto {
    pub phone: String,
    pub otp: String,
}

/// An account offered for selection when one phone belongs to several staff accounts
#[derive(Clone, Serialize, Deserialize, ToSchema)]
pub struct AccountDto {
    pub id: i32,
    pub name: String,
    pub role: UserRole,
    pub gym_id: Option<i32>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct VerifyOtpResponseDto {
    pub is_multi_account: bool,
    /// Accounts to choose from, empty once logged in
    pub accounts: Vec<AccountDto>,
    /// The logged in user, absent while an account must be selected
    pub user: Option<UserDto>,
    pub is_new_user: bool,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SelectAccountDto {
    pub account_id: i32,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct PasswordLoginDto {
    pub entity_code: String,
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct GymLoginDto {
    pub gym_code: String,
    /// Email address or username
    pub identifier: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct SignupDto {
    pub gym_name: String,
    pub owner_name: String,
    pub email: String,
    pub phone: String,
    pub username: String,
    pub password: String,
    pub city: Option<String>,
    /// Subscription plan slug, `starter` when absent or unknown
    pub plan_slug: Option<String>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct SignupVerifyDto {
    pub otp: String,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct CheckUsernameDto {
    pub username: String,
}

#[derive(Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UsernameAvailabilityDto {
    pub available: bool,
    /// One of `min_length`, `max_length`, `invalid_chars` or `taken`
    pub reason: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct UserDto {
    pub id: i32,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub username: Option<String>,
    pub role: UserRole,
    pub gym_id: Option<i32>,
    pub holding_company_id: Option<i32>,
    pub brand_id: Option<i32>,
    pub organization_id: Option<i32>,
    pub can_view_revenue: bool,
    pub can_manage_members: bool,
    pub can_manage_leads: bool,
    pub can_use_ai: bool,
    pub is_superuser: bool,
    pub last_login: Option<NaiveDateTime>,
}

#[derive(Serialize, Deserialize, ToSchema)]
pub struct UpdateProfileDto {
    pub name: Option<String>,
    pub email: Option<String>,
}
