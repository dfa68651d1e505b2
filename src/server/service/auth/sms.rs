//! Twilio SMS delivery for OTP codes.

use serde::Deserialize;

use crate::server::{
    config::Config,
    error::{external::ExternalError, Error},
};

#[derive(Deserialize)]
struct TwilioMessage {
    sid: String,
}

/// E.164 form of an Indian phone number: 10 digits get `+91`, anything else just `+`
fn e164(phone: &str) -> String {
    let digits: String = phone.chars().filter(|c| c.is_ascii_digit()).collect();

    if digits.len() == 10 {
        format!("+91{}", digits)
    } else {
        format!("+{}", digits)
    }
}

pub struct SmsClient<'a> {
    http: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> SmsClient<'a> {
    pub fn new(http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self { http, config }
    }

    /// Sends an SMS through the Twilio Messages API
    pub async fn send(&self, phone: &str, body: &str) -> Result<(), Error> {
        let (Some(sid), Some(token), Some(from)) = (
            self.config.twilio_account_sid.as_deref(),
            self.config.twilio_auth_token.as_deref(),
            self.config.twilio_phone_number.as_deref(),
        ) else {
            return Err(ExternalError::SmsFailed("Twilio is not configured".to_string()).into());
        };

        let url = format!(
            "{}/2010-04-01/Accounts/{}/Messages.json",
            self.config.twilio_api_url.trim_end_matches('/'),
            sid
        );
        let to = e164(phone);

        let message: TwilioMessage = self
            .http
            .post(url)
            .basic_auth(sid, Some(token))
            .form(&[("To", to.as_str()), ("From", from), ("Body", body)])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        tracing::info!(sid = %message.sid, "Sent SMS to {}", to);

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;
    use mockito::Matcher;

    use super::*;

    fn twilio_config(url: String) -> Config {
        Config {
            twilio_account_sid: Some("AC123".to_string()),
            twilio_auth_token: Some("token".to_string()),
            twilio_phone_number: Some("+15550001111".to_string()),
            twilio_api_url: url,
            ..Config::default()
        }
    }

    /// Expect Indian 10 digit numbers to get the country code
    #[test]
    fn formats_e164() {
        assert_eq!(e164("98765 43210"), "+919876543210");
        assert_eq!(e164("919876543210"), "+919876543210");
    }

    /// Expect the message to be posted to the account's Messages endpoint
    #[tokio::test]
    async fn posts_message() -> Result<(), TestError> {
        let test = TestBuilder::new()
            .with_mock_endpoint(|server| {
                server
                    .mock("POST", "/2010-04-01/Accounts/AC123/Messages.json")
                    .match_body(Matcher::UrlEncoded("To".into(), "+919876543210".into()))
                    .with_status(201)
                    .with_body(r#"{"sid":"SM1"}"#)
                    .create()
            })
            .build()
            .await?;

        let http = reqwest::Client::new();
        let config = twilio_config(test.server_url());
        let result = SmsClient::new(&http, &config)
            .send("9876543210", "Your code is 123456")
            .await;

        assert!(result.is_ok());
        test.assert_mocks();

        Ok(())
    }

    /// Expect an error without Twilio credentials
    #[tokio::test]
    async fn fails_without_credentials() {
        let http = reqwest::Client::new();
        let config = Config::default();

        let result = SmsClient::new(&http, &config).send("9876543210", "hi").await;

        assert!(matches!(
            result,
            Err(Error::ExternalError(ExternalError::SmsFailed(_)))
        ));
    }
}
