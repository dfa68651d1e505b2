//! Staff authentication: OTP and password logins, owner signup and profile updates.
//!
//! Services here decide who is logging in and return the outcome. Writing the result to the
//! session is left to the controllers.

pub mod login;
pub mod otp;
pub mod password;
pub mod signup;
pub mod sms;

use crate::model::auth::{AccountDto, UserDto};

pub fn user_dto(user: &entity::gym_user::Model) -> UserDto {
    UserDto {
        id: user.id,
        name: user.name.clone(),
        phone: user.phone.clone(),
        email: user.email.clone(),
        username: user.username.clone(),
        role: user.role,
        gym_id: user.gym_id,
        holding_company_id: user.holding_company_id,
        brand_id: user.brand_id,
        organization_id: user.organization_id,
        can_view_revenue: user.can_view_revenue,
        can_manage_members: user.can_manage_members,
        can_manage_leads: user.can_manage_leads,
        can_use_ai: user.can_use_ai,
        is_superuser: user.is_superuser,
        last_login: user.last_login,
    }
}

pub fn account_dto(user: &entity::gym_user::Model) -> AccountDto {
    AccountDto {
        id: user.id,
        name: user.name.clone(),
        role: user.role,
        gym_id: user.gym_id,
    }
}
