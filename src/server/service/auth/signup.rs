//! Self-service owner signup: validate, verify the phone, then create a trial gym.

use std::collections::BTreeMap;

use chrono::{Duration, Utc};
use entity::sea_orm_active_enums::{SubscriptionStatus, UserRole};
use sea_orm::{ActiveValue, DatabaseConnection, IntoActiveModel, TransactionTrait};

use crate::{
    model::auth::{SignupDto, UsernameAvailabilityDto},
    server::{
        config::Config,
        data::{
            billing::subscription_plan::SubscriptionPlanRepository, gym::GymRepository,
            user::GymUserRepository,
        },
        error::{validation::ValidationError, Error},
        model::session::signup::PendingSignup,
        service::{
            auth::{otp::OtpService, password::hash_password},
            gym::{GymService, NewGym},
        },
        util::phone::{is_valid_phone, normalize_phone},
    },
};

const USERNAME_MIN_LENGTH: usize = 4;
const USERNAME_MAX_LENGTH: usize = 30;
const PASSWORD_MIN_LENGTH: usize = 6;
const TRIAL_DAYS: i64 = 30;
const DEFAULT_PLAN_SLUG: &str = "starter";

/// Why a username cannot be used, as reported by the availability check
fn username_problem(username: &str) -> Option<&'static str> {
    if username.chars().count() < USERNAME_MIN_LENGTH {
        Some("min_length")
    } else if !username
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
    {
        Some("invalid_chars")
    } else if username.chars().count() > USERNAME_MAX_LENGTH {
        Some("max_length")
    } else {
        None
    }
}

pub struct SignupService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    http: &'a reqwest::Client,
}

impl<'a> SignupService<'a> {
    /// Creates a new instance of [`SignupService`]
    pub fn new(db: &'a DatabaseConnection, config: &'a Config, http: &'a reqwest::Client) -> Self {
        Self { db, config, http }
    }

    pub async fn check_username(&self, username: &str) -> Result<UsernameAvailabilityDto, Error> {
        let username = username.trim().to_lowercase();

        let reason = match username_problem(&username) {
            Some(reason) => Some(reason),
            None if GymUserRepository::new(self.db)
                .username_exists(&username)
                .await? =>
            {
                Some("taken")
            }
            None => None,
        };

        Ok(UsernameAvailabilityDto {
            available: reason.is_none(),
            reason: reason.map(str::to_string),
        })
    }

    /// Validates the signup form and sends an OTP to the owner's phone.
    ///
    /// All field errors are reported together. The returned signup is kept in the session
    /// until the phone is verified.
    pub async fn start_signup(&self, signup: SignupDto) -> Result<PendingSignup, Error> {
        let mut errors = BTreeMap::new();

        let gym_name = signup.gym_name.trim().to_string();
        let owner_name = signup.owner_name.trim().to_string();
        let email = signup.email.trim().to_lowercase();
        let phone = normalize_phone(&signup.phone);
        let username = signup.username.trim().to_lowercase();

        if gym_name.is_empty() {
            errors.insert("gym_name".to_string(), "Gym name is required.".to_string());
        }
        if owner_name.is_empty() {
            errors.insert("owner_name".to_string(), "Your name is required.".to_string());
        }
        if email.is_empty() {
            errors.insert("email".to_string(), "Email is required.".to_string());
        } else if GymRepository::new(self.db).email_exists(&email).await? {
            errors.insert(
                "email".to_string(),
                "A gym with this email already exists.".to_string(),
            );
        }
        if !is_valid_phone(&phone) {
            errors.insert(
                "phone".to_string(),
                "Enter a valid 10-digit phone number.".to_string(),
            );
        }
        match username_problem(&username) {
            Some("invalid_chars") => {
                errors.insert(
                    "username".to_string(),
                    "Username can only contain lowercase letters, numbers and underscores."
                        .to_string(),
                );
            }
            Some(_) => {
                errors.insert(
                    "username".to_string(),
                    format!(
                        "Username must be between {} and {} characters.",
                        USERNAME_MIN_LENGTH, USERNAME_MAX_LENGTH
                    ),
                );
            }
            None => {
                if GymUserRepository::new(self.db)
                    .username_exists(&username)
                    .await?
                {
                    errors.insert(
                        "username".to_string(),
                        "This username is already taken.".to_string(),
                    );
                }
            }
        }
        if signup.password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.insert(
                "password".to_string(),
                format!(
                    "Password must be at least {} characters.",
                    PASSWORD_MIN_LENGTH
                ),
            );
        }

        if !errors.is_empty() {
            return Err(ValidationError::Fields(errors).into());
        }

        let pending = PendingSignup {
            gym_name,
            owner_name,
            email,
            phone,
            username,
            password_hash: hash_password(&signup.password)?,
            city: signup
                .city
                .map(|city| city.trim().to_string())
                .filter(|city| !city.is_empty()),
            plan_slug: signup.plan_slug,
        };

        OtpService::new(self.db, self.config, self.http)
            .send_otp(&pending.phone)
            .await?;

        Ok(pending)
    }

    /// Verifies the owner's phone and creates the trial gym with its owner account
    pub async fn complete_signup(
        &self,
        pending: PendingSignup,
        otp: &str,
    ) -> Result<(entity::gym::Model, entity::gym_user::Model), Error> {
        OtpService::new(self.db, self.config, self.http)
            .verify_otp(&pending.phone, otp)
            .await?;

        let plan_repo = SubscriptionPlanRepository::new(self.db);
        let slug = pending.plan_slug.as_deref().unwrap_or(DEFAULT_PLAN_SLUG);
        let plan = match plan_repo.find_active_by_slug(slug).await? {
            Some(plan) => Some(plan),
            None => plan_repo.find_active_by_slug(DEFAULT_PLAN_SLUG).await?,
        };

        let txn = self.db.begin().await?;

        let gym = GymService::new(&txn)
            .create_gym(NewGym {
                name: pending.gym_name,
                owner_name: pending.owner_name.clone(),
                owner_phone: pending.phone.clone(),
                email: Some(pending.email.clone()),
                city: pending.city,
                subscription_plan_id: plan.map(|plan| plan.id),
                subscription_status: SubscriptionStatus::Trial,
                trial_ends_at: Some(Utc::now().naive_utc() + Duration::days(TRIAL_DAYS)),
                organization_id: None,
            })
            .await?;

        let user_repo = GymUserRepository::new(&txn);
        let mut am = match user_repo.find_by_phone(&pending.phone).await? {
            Some(existing) => existing.into_active_model(),
            None => entity::gym_user::ActiveModel {
                phone: ActiveValue::Set(pending.phone.clone()),
                holding_company_id: ActiveValue::Set(None),
                brand_id: ActiveValue::Set(None),
                organization_id: ActiveValue::Set(None),
                is_active: ActiveValue::Set(true),
                is_superuser: ActiveValue::Set(false),
                last_login: ActiveValue::Set(None),
                ..Default::default()
            },
        };
        let is_new = am.id.is_not_set();

        am.gym_id = ActiveValue::Set(Some(gym.id));
        am.name = ActiveValue::Set(pending.owner_name);
        am.email = ActiveValue::Set(Some(pending.email));
        am.username = ActiveValue::Set(Some(pending.username));
        am.role = ActiveValue::Set(UserRole::Owner);
        am.can_view_revenue = ActiveValue::Set(true);
        am.can_manage_members = ActiveValue::Set(true);
        am.can_manage_leads = ActiveValue::Set(true);
        am.can_use_ai = ActiveValue::Set(true);
        am.password_hash = ActiveValue::Set(Some(pending.password_hash));

        let owner = if is_new {
            user_repo.create(am).await?
        } else {
            user_repo.update(am).await?
        };

        txn.commit().await?;

        tracing::info!(gym_id = %gym.id, user_id = %owner.id, "Completed owner signup");

        Ok((gym, owner))
    }
}
