//! One-time passwords delivered by SMS.

use chrono::{Duration, Utc};
use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config,
    data::user::otp::OtpSessionRepository,
    error::{auth::AuthError, Error},
    service::auth::sms::SmsClient,
    util::code::generate_otp,
};

/// Failed verifications before an OTP is discarded
pub const MAX_ATTEMPTS: i32 = 5;
/// Minimum gap between two OTPs for the same phone
pub const RATE_LIMIT_SECONDS: i64 = 60;

pub struct OtpService<'a> {
    db: &'a DatabaseConnection,
    config: &'a Config,
    http: &'a reqwest::Client,
}

impl<'a> OtpService<'a> {
    /// Creates a new instance of [`OtpService`]
    pub fn new(db: &'a DatabaseConnection, config: &'a Config, http: &'a reqwest::Client) -> Self {
        Self { db, config, http }
    }

    /// Issues a new OTP for the phone, replacing any unverified one.
    ///
    /// In bypass mode the configured default code is used and logged instead of sent.
    pub async fn send_otp(&self, phone: &str) -> Result<(), Error> {
        let otp_repo = OtpSessionRepository::new(self.db);
        let now = Utc::now().naive_utc();

        if otp_repo
            .unverified_created_since(phone, now - Duration::seconds(RATE_LIMIT_SECONDS))
            .await?
        {
            return Err(AuthError::OtpRateLimited.into());
        }

        otp_repo.delete_unverified(phone).await?;

        let code = if self.config.otp_bypass {
            self.config.otp_default_code.clone()
        } else {
            generate_otp()
        };

        let otp = otp_repo
            .create(
                phone,
                &code,
                now + Duration::minutes(self.config.otp_expiry_minutes),
            )
            .await?;

        if self.config.otp_bypass {
            tracing::info!("[OTP BYPASS] Code for {}: {}", phone, code);
            return Ok(());
        }

        let body = format!(
            "Your GymEdge verification code is: {}. Valid for {} minutes.",
            code, self.config.otp_expiry_minutes
        );

        if let Err(e) = SmsClient::new(self.http, self.config).send(phone, &body).await {
            tracing::error!("SMS delivery failed for {}: {}", phone, e);
            otp_repo.delete(otp.id).await?;

            return Err(AuthError::OtpDeliveryFailed.into());
        }

        Ok(())
    }

    /// Checks the latest unverified OTP of the phone and marks it verified on a match
    pub async fn verify_otp(&self, phone: &str, code: &str) -> Result<(), Error> {
        let otp_repo = OtpSessionRepository::new(self.db);

        let Some(otp) = otp_repo.latest_unverified(phone).await? else {
            return Err(AuthError::OtpInvalid(
                "No OTP found for this number. Please request a new one.".to_string(),
            )
            .into());
        };

        if otp.expires_at < Utc::now().naive_utc() {
            otp_repo.delete(otp.id).await?;
            return Err(AuthError::OtpInvalid(
                "OTP has expired. Please request a new one.".to_string(),
            )
            .into());
        }

        if otp.attempts >= MAX_ATTEMPTS {
            otp_repo.delete(otp.id).await?;
            return Err(AuthError::OtpInvalid(
                "Too many failed attempts. Please request a new OTP.".to_string(),
            )
            .into());
        }

        if otp.otp_code != code.trim() {
            let otp = otp_repo.increment_attempts(otp).await?;
            return Err(AuthError::OtpInvalid(format!(
                "Invalid OTP. {} attempt(s) remaining.",
                MAX_ATTEMPTS - otp.attempts
            ))
            .into());
        }

        otp_repo.mark_verified(otp).await?;

        Ok(())
    }

    /// Deletes expired or verified OTPs older than a day, returning how many were removed
    pub async fn cleanup_expired_otps(&self) -> Result<u64, Error> {
        let now = Utc::now().naive_utc();
        let result = OtpSessionRepository::new(self.db)
            .delete_stale(now, now - Duration::days(1))
            .await?;

        Ok(result.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use gymedge_test_utils::prelude::*;
    use sea_orm::{ActiveModelTrait, ActiveValue, EntityTrait, IntoActiveModel};

    use super::*;

    async fn otp_test() -> Result<TestContext, TestError> {
        TestBuilder::new()
            .with_table(entity::prelude::OtpSession)
            .build()
            .await
    }

    mod send_otp {
        use super::*;

        /// Expect the default code to be stored in bypass mode
        #[tokio::test]
        async fn stores_default_code_in_bypass() -> Result<(), TestError> {
            let test = otp_test().await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            OtpService::new(&test.db, &config, &http)
                .send_otp("9876543210")
                .await
                .unwrap();

            let otp = OtpSessionRepository::new(&test.db)
                .latest_unverified("9876543210")
                .await?
                .unwrap();
            assert_eq!(otp.otp_code, "123456");

            Ok(())
        }

        /// Expect a second request within a minute to be rate limited
        #[tokio::test]
        async fn rate_limits_repeat_requests() -> Result<(), TestError> {
            let test = otp_test().await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = OtpService::new(&test.db, &config, &http);

            service.send_otp("9876543210").await.unwrap();
            let result = service.send_otp("9876543210").await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::OtpRateLimited))
            ));

            Ok(())
        }

        /// Expect the OTP to be discarded when the SMS cannot be delivered
        #[tokio::test]
        async fn removes_otp_when_sms_fails() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_table(entity::prelude::OtpSession)
                .with_mock_endpoint(|server| {
                    server
                        .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
                        .with_status(500)
                        .create()
                })
                .build()
                .await?;
            let config = Config {
                otp_bypass: false,
                twilio_account_sid: Some("AC123".to_string()),
                twilio_auth_token: Some("token".to_string()),
                twilio_phone_number: Some("+15550001111".to_string()),
                twilio_api_url: test.server_url(),
                ..Config::default()
            };
            let http = reqwest::Client::new();

            let result = OtpService::new(&test.db, &config, &http)
                .send_otp("9876543210")
                .await;

            assert!(matches!(
                result,
                Err(Error::AuthError(AuthError::OtpDeliveryFailed))
            ));
            assert!(OtpSessionRepository::new(&test.db)
                .latest_unverified("9876543210")
                .await?
                .is_none());
            test.assert_mocks();

            Ok(())
        }

        /// Expect Error when required tables are not present
        #[tokio::test]
        async fn fails_when_tables_missing() -> Result<(), TestError> {
            let test = TestBuilder::new().build().await?;
            let config = Config::default();
            let http = reqwest::Client::new();

            let result = OtpService::new(&test.db, &config, &http)
                .send_otp("9876543210")
                .await;

            assert!(matches!(result, Err(Error::DbErr(_))));

            Ok(())
        }
    }

    mod verify_otp {
        use super::*;

        /// Expect a wrong code to report the remaining attempts
        #[tokio::test]
        async fn counts_down_attempts() -> Result<(), TestError> {
            let test = otp_test().await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = OtpService::new(&test.db, &config, &http);

            service.send_otp("9876543210").await.unwrap();
            let result = service.verify_otp("9876543210", "000000").await;

            assert_eq!(
                result.err().map(|e| e.to_string()),
                Some("Invalid OTP. 4 attempt(s) remaining.".to_string())
            );

            Ok(())
        }

        /// Expect the matching code to verify once
        #[tokio::test]
        async fn verifies_matching_code() -> Result<(), TestError> {
            let test = otp_test().await?;
            let config = Config::default();
            let http = reqwest::Client::new();
            let service = OtpService::new(&test.db, &config, &http);

            service.send_otp("9876543210").await.unwrap();

            assert!(service.verify_otp("9876543210", "123456").await.is_ok());
            assert!(service.verify_otp("9876543210", "123456").await.is_err());

            Ok(())
        }

        /// Expect an expired OTP to be rejected and removed
        #[tokio::test]
        async fn rejects_expired_code() -> Result<(), TestError> {
            let test = otp_test().await?;
            let otp_repo = OtpSessionRepository::new(&test.db);
            otp_repo
                .create(
                    "9876543210",
                    "123456",
                    Utc::now().naive_utc() - Duration::minutes(1),
                )
                .await?;

            let config = Config::default();
            let http = reqwest::Client::new();
            let result = OtpService::new(&test.db, &config, &http)
                .verify_otp("9876543210", "123456")
                .await;

            assert_eq!(
                result.err().map(|e| e.to_string()),
                Some("OTP has expired. Please request a new one.".to_string())
            );
            assert!(otp_repo.latest_unverified("9876543210").await?.is_none());

            Ok(())
        }

        /// Expect the OTP to be discarded once attempts are exhausted
        #[tokio::test]
        async fn locks_after_max_attempts() -> Result<(), TestError> {
            let test = otp_test().await?;
            let otp_repo = OtpSessionRepository::new(&test.db);
            let otp = otp_repo
                .create(
                    "9876543210",
                    "123456",
                    Utc::now().naive_utc() + Duration::minutes(10),
                )
                .await?;
            let mut am = otp.into_active_model();
            am.attempts = ActiveValue::Set(MAX_ATTEMPTS);
            am.update(&test.db).await?;

            let config = Config::default();
            let http = reqwest::Client::new();
            let result = OtpService::new(&test.db, &config, &http)
                .verify_otp("9876543210", "123456")
                .await;

            assert_eq!(
                result.err().map(|e| e.to_string()),
                Some("Too many failed attempts. Please request a new OTP.".to_string())
            );
            assert!(entity::prelude::OtpSession::find()
                .all(&test.db)
                .await?
                .is_empty());

            Ok(())
        }
    }
}
