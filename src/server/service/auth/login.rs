//! Entity codes, OTP and password logins.

use entity::sea_orm_active_enums::UserRole;
use sea_orm::{ActiveValue, DatabaseConnection, IntoActiveModel};

use crate::{
    model::auth::{GymLoginDto, LoginEntityDto, LoginEntityKind, PasswordLoginDto, UpdateProfileDto},
    server::{
        config::Config,
        data::{
            enterprise::{
                brand::BrandRepository, holding_company::HoldingCompanyRepository,
                organization::OrganizationRepository,
            },
            gym::GymRepository,
            user::{location::GymUserLocationRepository, GymUserRepository},
        },
        error::{auth::AuthError, validation::ValidationError, Error},
        service::auth::{otp::OtpService, password::verify_password},
        util::phone::{is_valid_phone, normalize_phone},
    },
};

const ENTITY_ACCESS_DENIED: &str = "Access Denied. You do not belong to this entity.";
const GYM_LOGIN_FAILED: &str = "Invalid credentials or access denied for this entity.";

/// Result of a verified OTP login
#[derive(Debug)]
pub enum OtpLoginOutcome {
    /// A single account matched and is now logged in
    LoggedIn {
        user: entity::gym_user::Model,
        is_new_user: bool,
    },
    /// The phone belongs to several accounts; one must be selected
    SelectAccount(Vec<entity::gym_user::Model>),
}

pub struct AuthService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    http: &'a reqwest::Client,
}

impl<'a> AuthService<'a> {
    /// Creates a new instance of [`AuthService`]
    pub fn new(db: &'a DatabaseConnection, config: &'a Config, http: &'a reqwest::Client) -> Self {
        Self { db, config, http }
    }

    /// Resolves a login code to a gym, holding company, brand or organization, in that order
    pub async fn resolve_entity_code(&self, code: &str) -> Result<LoginEntityDto, Error> {
        let code = code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ValidationError::invalid("Please enter a valid code.").into());
        }

        if let Some(gym) = GymRepository::new(self.db).find_active_by_code(&code).await? {
            return Ok(LoginEntityDto {
                kind: LoginEntityKind::Gym,
                id: gym.id,
                name: gym.name,
            });
        }

        if let Some(holding) = HoldingCompanyRepository::new(self.db)
            .find_active_by_code(&code)
            .await?
        {
            return Ok(LoginEntityDto {
                kind: LoginEntityKind::Holding,
                id: holding.id,
                name: holding.name,
            });
        }

        if let Some(brand) = BrandRepository::new(self.db).find_active_by_code(&code).await? {
            return Ok(LoginEntityDto {
                kind: LoginEntityKind::Brand,
                id: brand.id,
                name: brand.name,
            });
        }

        if let Some(org) = OrganizationRepository::new(self.db)
            .find_active_by_code(&code)
            .await?
        {
            return Ok(LoginEntityDto {
                kind: LoginEntityKind::Organization,
                id: org.id,
                name: org.name,
            });
        }

        Err(ValidationError::invalid("Invalid Entity Code. Please check and try again.").into())
    }

    /// Sends an OTP to a phone registered with the login entity.
    ///
    /// Without an entity any valid phone gets a code, which is how new owners sign in.
    pub async fn send_scoped_otp(
        &self,
        entity: Option<&LoginEntityDto>,
        phone: &str,
    ) -> Result<(), Error> {
        if !is_valid_phone(phone) {
            return Err(ValidationError::invalid("Enter a valid 10-digit number.").into());
        }
        let phone = normalize_phone(phone);

        if let Some(entity) = entity {
            let registered = GymUserRepository::new(self.db)
                .find_active_by_phone_in_entity(&phone, entity.kind, entity.id)
                .await?;
            if registered.is_none() {
                return Err(ValidationError::invalid(
                    "This phone number is not registered with this entity.",
                )
                .into());
            }
        }

        OtpService::new(self.db, self.config, self.http)
            .send_otp(&phone)
            .await
    }

    /// Verifies the OTP and works out which account logs in.
    ///
    /// Without a login entity, an unknown phone gets a new owner account.
    pub async fn verify_scoped_otp(
        &self,
        entity: Option<&LoginEntityDto>,
        phone: &str,
        code: &str,
    ) -> Result<OtpLoginOutcome, Error> {
        let phone = normalize_phone(phone);
        OtpService::new(self.db, self.config, self.http)
            .verify_otp(&phone, code)
            .await?;

        let user_repo = GymUserRepository::new(self.db);
        let mut users = user_repo.find_active_by_phone(&phone).await?;

        if users.len() > 1 {
            return Ok(OtpLoginOutcome::SelectAccount(users));
        }

        let Some(user) = users.pop() else {
            if entity.is_some() {
                return Err(AuthError::AccessDenied(ENTITY_ACCESS_DENIED.to_string()).into());
            }

            let user = self.create_phone_user(&phone).await?;
            let user = self.complete_login(user).await?;

            return Ok(OtpLoginOutcome::LoggedIn {
                user,
                is_new_user: true,
            });
        };

        if let Some(entity) = entity {
            if !user.is_superuser && !self.belongs_to_entity(&user, entity).await? {
                return Err(AuthError::AccessDenied(ENTITY_ACCESS_DENIED.to_string()).into());
            }
        }

        let user = self.complete_login(user).await?;

        Ok(OtpLoginOutcome::LoggedIn {
            user,
            is_new_user: false,
        })
    }

    /// Logs in one of the accounts offered for the verified phone
    pub async fn select_account(
        &self,
        phone: &str,
        account_id: i32,
    ) -> Result<entity::gym_user::Model, Error> {
        let user = GymUserRepository::new(self.db)
            .find_active_by_phone(phone)
            .await?
            .into_iter()
            .find(|user| user.id == account_id)
            .ok_or_else(|| AuthError::AccessDenied("Invalid account selection.".to_string()))?;

        self.complete_login(user).await
    }

    /// Username and password login against a gym or organization code
    pub async fn password_login(
        &self,
        login: &PasswordLoginDto,
    ) -> Result<entity::gym_user::Model, Error> {
        let code = login.entity_code.trim().to_uppercase();
        let username = login.username.trim().to_lowercase();
        if code.is_empty() || username.is_empty() || login.password.is_empty() {
            return Err(ValidationError::invalid("Please fill in all fields.").into());
        }

        let gym = GymRepository::new(self.db).find_active_by_code(&code).await?;
        let org = match gym {
            Some(_) => None,
            None => {
                OrganizationRepository::new(self.db)
                    .find_active_by_code(&code)
                    .await?
            }
        };
        if gym.is_none() && org.is_none() {
            return Err(ValidationError::invalid("Invalid Gym or Organization code.").into());
        }

        let user = GymUserRepository::new(self.db)
            .find_by_username(&username)
            .await?
            .filter(|user| {
                user.password_hash
                    .as_deref()
                    .is_some_and(|hash| verify_password(&login.password, hash))
            })
            .ok_or_else(|| {
                AuthError::InvalidCredentials("Invalid username or password.".to_string())
            })?;

        if !user.is_active {
            return Err(AuthError::AccountDeactivated.into());
        }

        let has_access = match (&gym, &org) {
            (Some(gym), _) => {
                user.gym_id == Some(gym.id)
                    || user.is_superuser
                    || (user.organization_id.is_some()
                        && user.organization_id == gym.organization_id)
                    || GymUserLocationRepository::new(self.db)
                        .has_location(user.id, gym.id)
                        .await?
            }
            (None, Some(org)) => user.organization_id == Some(org.id) || user.is_superuser,
            (None, None) => false,
        };
        if !has_access {
            return Err(AuthError::AccessDenied(
                "You do not have access to this specific Gym/Organization.".to_string(),
            )
            .into());
        }

        self.complete_login(user).await
    }

    /// Email or username and password login within a single gym
    pub async fn gym_login(&self, login: &GymLoginDto) -> Result<entity::gym_user::Model, Error> {
        let failed = || AuthError::InvalidCredentials(GYM_LOGIN_FAILED.to_string());

        let gym = GymRepository::new(self.db)
            .find_active_by_code(&login.gym_code.trim().to_uppercase())
            .await?
            .ok_or_else(failed)?;

        let user = GymUserRepository::new(self.db)
            .find_active_in_gym_by_identifier(gym.id, &login.identifier)
            .await?
            .filter(|user| {
                user.password_hash
                    .as_deref()
                    .is_some_and(|hash| verify_password(&login.password, hash))
            })
            .ok_or_else(failed)?;

        self.complete_login(user).await
    }

    /// Stamps `last_login`; the caller stores the user id in the session
    pub async fn complete_login(
        &self,
        user: entity::gym_user::Model,
    ) -> Result<entity::gym_user::Model, Error> {
        let user = GymUserRepository::new(self.db).touch_last_login(user).await?;

        tracing::info!(user_id = %user.id, "User logged in");

        Ok(user)
    }

    pub async fn update_profile(
        &self,
        user: entity::gym_user::Model,
        patch: UpdateProfileDto,
    ) -> Result<entity::gym_user::Model, Error> {
        let mut am = user.into_active_model();

        if let Some(name) = patch.name {
            let name = name.trim().to_string();
            if name.is_empty() {
                return Err(ValidationError::invalid("Name cannot be empty.").into());
            }
            am.name = ActiveValue::Set(name);
        }
        if let Some(email) = patch.email {
            let email = email.trim().to_string();
            am.email = ActiveValue::Set((!email.is_empty()).then_some(email));
        }

        Ok(GymUserRepository::new(self.db).update(am).await?)
    }

    async fn belongs_to_entity(
        &self,
        user: &entity::gym_user::Model,
        entity: &LoginEntityDto,
    ) -> Result<bool, Error> {
        let belongs = match entity.kind {
            LoginEntityKind::Gym => {
                user.gym_id == Some(entity.id)
                    || GymUserLocationRepository::new(self.db)
                        .has_location(user.id, entity.id)
                        .await?
            }
            LoginEntityKind::Holding => user.holding_company_id == Some(entity.id),
            LoginEntityKind::Brand => user.brand_id == Some(entity.id),
            LoginEntityKind::Organization => user.organization_id == Some(entity.id),
        };

        Ok(belongs)
    }

    async fn create_phone_user(&self, phone: &str) -> Result<entity::gym_user::Model, Error> {
        let last_four = &phone[phone.len().saturating_sub(4)..];

        let user = GymUserRepository::new(self.db)
            .create(entity::gym_user::ActiveModel {
                gym_id: ActiveValue::Set(None),
                holding_company_id: ActiveValue::Set(None),
                brand_id: ActiveValue::Set(None),
                organization_id: ActiveValue::Set(None),
                phone: ActiveValue::Set(phone.to_string()),
                email: ActiveValue::Set(None),
                username: ActiveValue::Set(None),
                name: ActiveValue::Set(format!("User {}", last_four)),
                role: ActiveValue::Set(UserRole::Owner),
                can_view_revenue: ActiveValue::Set(false),
                can_manage_members: ActiveValue::Set(true),
                can_manage_leads: ActiveValue::Set(false),
                can_use_ai: ActiveValue::Set(true),
                is_active: ActiveValue::Set(true),
                is_superuser: ActiveValue::Set(false),
                password_hash: ActiveValue::Set(None),
                last_login: ActiveValue::Set(None),
                ..Default::default()
            })
            .await?;

        tracing::info!(user_id = %user.id, "Created user from OTP login");

        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use entity::sea_orm_active_enums::UserRole;
    use gymedge_test_utils::prelude::*;

    use super::*;
    use crate::server::service::auth::{otp::OtpService, password::hash_password};

    async fn send_code(test: &TestContext, config: &Config, phone: &str) {
        let http = reqwest::Client::new();
        OtpService::new(&test.db, config, &http)
            .send_otp(phone)
            .await
            .unwrap();
    }

    async fn auth_test() -> Result<TestContext, TestError> {
        TestBuilder::new()
            .with_tenant_tables()
            .with_table(entity::prelude::OtpSession)
            .build()
            .await
    }

    mod resolve_entity_code {
        use super::*;

        /// Expect a lowercase gym code with whitespace to resolve to the gym
        #[tokio::test]
        async fn resolves_gym_code() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let entity = AuthService::new(&test.db, &config, &http)
                .resolve_entity_code(&format!(" {} ", gym.gym_code.to_lowercase()))
                .await
                .unwrap();

            assert_eq!(entity.kind, LoginEntityKind::Gym);
            assert_eq!(entity.id, gym.id);

            Ok(())
        }

        /// Expect organization codes to resolve when no gym matches
        #[tokio::test]
        async fn resolves_organization_code() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let org = test.tenancy().insert_organization(None, "ORG123456").await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let entity = AuthService::new(&test.db, &config, &http)
                .resolve_entity_code("org123456")
                .await
                .unwrap();

            assert_eq!(entity.kind, LoginEntityKind::Organization);
            assert_eq!(entity.id, org.id);

            Ok(())
        }

        /// Expect unknown and empty codes to be rejected
        #[tokio::test]
        async fn rejects_unknown_code() -> Result<(), TestError> {
            let test = auth_test().await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = AuthService::new(&test.db, &config, &http);

            let unknown = service.resolve_entity_code("NOPE").await;
            let empty = service.resolve_entity_code("  ").await;

            assert_eq!(
                unknown.err().map(|e| e.to_string()),
                Some("Invalid Entity Code. Please check and try again.".to_string())
            );
            assert_eq!(
                empty.err().map(|e| e.to_string()),
                Some("Please enter a valid code.".to_string())
            );

            Ok(())
        }

        /// Expect Error when required tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let result = AuthService::new(&test.db, &config, &http)
                .resolve_entity_code("GYM1234567")
                .await;

            assert!(matches!(result, Err(Error::DbErr(_))));

            Ok(())
        }
    }

    mod send_scoped_otp {
        use super::*;

        /// Expect phones not registered with the entity to be rejected
        #[tokio::test]
        async fn rejects_unregistered_phone() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let entity = LoginEntityDto {
                kind: LoginEntityKind::Gym,
                id: gym.id,
                name: gym.name,
            };
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = AuthService::new(&test.db, &config, &http);

            let short = service.send_scoped_otp(Some(&entity), "12345").await;
            let unknown = service.send_scoped_otp(Some(&entity), "9000000000").await;

            assert_eq!(
                short.err().map(|e| e.to_string()),
                Some("Enter a valid 10-digit number.".to_string())
            );
            assert_eq!(
                unknown.err().map(|e| e.to_string()),
                Some("This phone number is not registered with this entity.".to_string())
            );

            Ok(())
        }

        /// Expect an OTP to be issued for staff of the entity
        #[tokio::test]
        async fn sends_for_registered_phone() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            test.user().insert_owner(gym.id, "9876543210").await?;
            let entity = LoginEntityDto {
                kind: LoginEntityKind::Gym,
                id: gym.id,
                name: gym.name,
            };
            let config = Config::default();
            let http = reqwest::Client::new();

            let result = AuthService::new(&test.db, &config, &http)
                .send_scoped_otp(Some(&entity), "98765 43210")
                .await;

            assert!(result.is_ok());

            Ok(())
        }

        /// Expect any valid phone to get a code when no entity was chosen
        #[tokio::test]
        async fn sends_without_entity() -> Result<(), TestError> {
            let test = auth_test().await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let result = AuthService::new(&test.db, &config, &http)
                .send_scoped_otp(None, "9000000000")
                .await;

            assert!(result.is_ok());

            Ok(())
        }
    }

    mod verify_scoped_otp {
        use super::*;

        /// Expect an unknown phone without a login entity to create an owner account
        #[tokio::test]
        async fn creates_user_for_unknown_phone() -> Result<(), TestError> {
            let test = auth_test().await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            send_code(&test, &config, "9876543210").await;

            let outcome = AuthService::new(&test.db, &config, &http)
                .verify_scoped_otp(None, "9876543210", "123456")
                .await
                .unwrap();

            let OtpLoginOutcome::LoggedIn { user, is_new_user } = outcome else {
                panic!("expected a login");
            };
            assert!(is_new_user);
            assert_eq!(user.name, "User 3210");
            assert_eq!(user.role, UserRole::Owner);
            assert!(user.last_login.is_some());

            Ok(())
        }

        /// Expect an account outside the login entity to be denied
        #[tokio::test]
        async fn denies_user_of_other_entity() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let other = test.tenancy().insert_gym("Muscle Hub").await?;
            test.user().insert_owner(other.id, "9876543210").await?;
            let entity = LoginEntityDto {
                kind: LoginEntityKind::Gym,
                id: gym.id,
                name: gym.name,
            };
            let config = Config::default();
            let http = reqwest::Client::new();
            send_code(&test, &config, "9876543210").await;

            let result = AuthService::new(&test.db, &config, &http)
                .verify_scoped_otp(Some(&entity), "9876543210", "123456")
                .await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::AccessDenied(_)))
            ));

            Ok(())
        }

        /// Expect a phone shared by two accounts to require a selection
        #[tokio::test]
        async fn offers_selection_for_shared_phone() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let other = test.tenancy().insert_gym("Muscle Hub").await?;
            test.user().insert_owner(gym.id, "9876543210").await?;
            test.user().insert_owner(other.id, "9876543210").await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            send_code(&test, &config, "9876543210").await;

            let outcome = AuthService::new(&test.db, &config, &http)
                .verify_scoped_otp(None, "9876543210", "123456")
                .await
                .unwrap();

            assert!(matches!(outcome, OtpLoginOutcome::SelectAccount(ref users) if users.len() == 2));

            Ok(())
        }
    }

    mod select_account {
        use super::*;

        /// Expect only accounts with the verified phone to be selectable
        #[tokio::test]
        async fn rejects_foreign_account() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let own = test.user().insert_owner(gym.id, "9876543210").await?;
            let foreign = test.user().insert_owner(gym.id, "9000000000").await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = AuthService::new(&test.db, &config, &http);

            let selected = service.select_account("9876543210", own.id).await.unwrap();
            let result = service.select_account("9876543210", foreign.id).await;

            assert_eq!(selected.id, own.id);
            assert_eq!(
                result.err().map(|e| e.to_string()),
                Some("Invalid account selection.".to_string())
            );

            Ok(())
        }
    }

    mod password_login {
        use super::*;

        /// Expect gym staff to log in with their username and password
        #[tokio::test]
        async fn logs_in_gym_staff() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let hash = hash_password("secret1").unwrap();
            let user = test
                .user()
                .insert_user_with_credentials(Some(gym.id), "ravi_fit", "ravi@gym.in", &hash)
                .await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let logged_in = AuthService::new(&test.db, &config, &http)
                .password_login(&PasswordLoginDto {
                    entity_code: gym.gym_code.to_lowercase(),
                    username: "Ravi_Fit".to_string(),
                    password: "secret1".to_string(),
                })
                .await
                .unwrap();

            assert_eq!(logged_in.id, user.id);
            assert!(logged_in.last_login.is_some());

            Ok(())
        }

        /// Expect staff of another gym to be denied even with valid credentials
        #[tokio::test]
        async fn denies_other_gym() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let other = test.tenancy().insert_gym("Muscle Hub").await?;
            let hash = hash_password("secret1").unwrap();
            test.user()
                .insert_user_with_credentials(Some(other.id), "ravi_fit", "ravi@gym.in", &hash)
                .await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let result = AuthService::new(&test.db, &config, &http)
                .password_login(&PasswordLoginDto {
                    entity_code: gym.gym_code,
                    username: "ravi_fit".to_string(),
                    password: "secret1".to_string(),
                })
                .await;

            assert_eq!(
                result.err().map(|e| e.to_string()),
                Some("You do not have access to this specific Gym/Organization.".to_string())
            );

            Ok(())
        }

        /// Expect an additional location to grant access
        #[tokio::test]
        async fn allows_additional_location() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let other = test.tenancy().insert_gym("Muscle Hub").await?;
            let hash = hash_password("secret1").unwrap();
            let user = test
                .user()
                .insert_user_with_credentials(Some(other.id), "ravi_fit", "ravi@gym.in", &hash)
                .await?;
            test.user().insert_location(user.id, gym.id).await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let result = AuthService::new(&test.db, &config, &http)
                .password_login(&PasswordLoginDto {
                    entity_code: gym.gym_code,
                    username: "ravi_fit".to_string(),
                    password: "secret1".to_string(),
                })
                .await;

            assert!(result.is_ok());

            Ok(())
        }

        /// Expect empty fields, unknown codes and wrong passwords to be rejected
        #[tokio::test]
        async fn rejects_bad_input() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let hash = hash_password("secret1").unwrap();
            test.user()
                .insert_user_with_credentials(Some(gym.id), "ravi_fit", "ravi@gym.in", &hash)
                .await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = AuthService::new(&test.db, &config, &http);
            let login = |code: &str, password: &str| PasswordLoginDto {
                entity_code: code.to_string(),
                username: "ravi_fit".to_string(),
                password: password.to_string(),
            };

            let empty = service.password_login(&login(&gym.gym_code, "")).await;
            let unknown = service.password_login(&login("GYM0000000", "secret1")).await;
            let wrong = service.password_login(&login(&gym.gym_code, "nope")).await;

            assert_eq!(
                empty.err().map(|e| e.to_string()),
                Some("Please fill in all fields.".to_string())
            );
            assert_eq!(
                unknown.err().map(|e| e.to_string()),
                Some("Invalid Gym or Organization code.".to_string())
            );
            assert_eq!(
                wrong.err().map(|e| e.to_string()),
                Some("Invalid username or password.".to_string())
            );

            Ok(())
        }
    }

    mod gym_login {
        use super::*;

        /// Expect login by email within the gym
        #[tokio::test]
        async fn logs_in_by_email() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let hash = hash_password("secret1").unwrap();
            let user = test
                .user()
                .insert_user_with_credentials(Some(gym.id), "ravi_fit", "ravi@gym.in", &hash)
                .await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = AuthService::new(&test.db, &config, &http);

            let logged_in = service
                .gym_login(&GymLoginDto {
                    gym_code: gym.gym_code.clone(),
                    identifier: "RAVI@gym.in".to_string(),
                    password: "secret1".to_string(),
                })
                .await
                .unwrap();
            let wrong = service
                .gym_login(&GymLoginDto {
                    gym_code: gym.gym_code,
                    identifier: "ravi_fit".to_string(),
                    password: "wrong".to_string(),
                })
                .await;

            assert_eq!(logged_in.id, user.id);
            assert_eq!(
                wrong.err().map(|e| e.to_string()),
                Some(GYM_LOGIN_FAILED.to_string())
            );

            Ok(())
        }
    }

    mod update_profile {
        use super::*;

        /// Expect name and email to be updated and blank names rejected
        #[tokio::test]
        async fn updates_name_and_email() -> Result<(), TestError> {
            let mut test = auth_test().await?;
            let gym = test.tenancy().insert_gym("Iron Paradise").await?;
            let user = test.user().insert_owner(gym.id, "9876543210").await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = AuthService::new(&test.db, &config, &http);

            let updated = service
                .update_profile(
                    user,
                    UpdateProfileDto {
                        name: Some("Ravi Kumar".to_string()),
                        email: Some("ravi@gym.in".to_string()),
                    },
                )
                .await
                .unwrap();
            let blank = service
                .update_profile(
                    updated.clone(),
                    UpdateProfileDto {
                        name: Some(" ".to_string()),
                        email: None,
                    },
                )
                .await;

            assert_eq!(updated.name, "Ravi Kumar");
            assert_eq!(updated.email.as_deref(), Some("ravi@gym.in"));
            assert!(blank.is_err());

            Ok(())
        }
    }
}
