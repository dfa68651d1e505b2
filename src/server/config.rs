use std::str::FromStr;

use crate::server::error::config::ConfigError;

/// LLM provider used for plan generation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AiProvider {
    Gemini,
    OpenAi,
}

impl FromStr for AiProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gemini" => Ok(Self::Gemini),
            "openai" => Ok(Self::OpenAi),
            other => Err(format!("expected `gemini` or `openai`, got `{}`", other)),
        }
    }
}

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,

    pub otp_bypass: bool,
    pub otp_default_code: String,
    pub otp_expiry_minutes: i64,

    pub twilio_account_sid: Option<String>,
    pub twilio_auth_token: Option<String>,
    pub twilio_phone_number: Option<String>,
    pub twilio_api_url: String,

    pub ai_provider: AiProvider,
    pub gemini_api_key: Option<String>,
    pub gemini_api_url: String,
    pub openai_api_key: Option<String>,
    pub openai_api_url: String,

    pub whatsapp_api_url: String,
    pub whatsapp_access_token: Option<String>,
    pub whatsapp_phone_number_id: Option<String>,
    pub whatsapp_simulation_mode: bool,

    pub razorpay_key_id: Option<String>,
    pub razorpay_key_secret: Option<String>,
    pub razorpay_api_url: String,
}

impl Config {
    /// Loads configuration from the environment, reading `.env` first when present.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let defaults = Self::default();

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_address: optional("BIND_ADDRESS").unwrap_or(defaults.bind_address),

            otp_bypass: parsed("OTP_BYPASS", defaults.otp_bypass)?,
            otp_default_code: optional("OTP_DEFAULT_CODE").unwrap_or(defaults.otp_default_code),
            otp_expiry_minutes: parsed("OTP_EXPIRY_MINUTES", defaults.otp_expiry_minutes)?,

            twilio_account_sid: optional("TWILIO_ACCOUNT_SID"),
            twilio_auth_token: optional("TWILIO_AUTH_TOKEN"),
            twilio_phone_number: optional("TWILIO_PHONE_NUMBER"),
            twilio_api_url: optional("TWILIO_API_URL").unwrap_or(defaults.twilio_api_url),

            ai_provider: parsed("AI_PROVIDER", defaults.ai_provider)?,
            gemini_api_key: optional("GEMINI_API_KEY"),
            gemini_api_url: optional("GEMINI_API_URL").unwrap_or(defaults.gemini_api_url),
            openai_api_key: optional("OPENAI_API_KEY"),
            openai_api_url: optional("OPENAI_API_URL").unwrap_or(defaults.openai_api_url),

            whatsapp_api_url: optional("META_WHATSAPP_API_URL")
                .unwrap_or(defaults.whatsapp_api_url),
            whatsapp_access_token: optional("META_WHATSAPP_ACCESS_TOKEN"),
            whatsapp_phone_number_id: optional("META_WHATSAPP_PHONE_NUMBER_ID"),
            whatsapp_simulation_mode: parsed(
                "WHATSAPP_SIMULATION_MODE",
                defaults.whatsapp_simulation_mode,
            )?,

            razorpay_key_id: optional("RAZORPAY_KEY_ID"),
            razorpay_key_secret: optional("RAZORPAY_KEY_SECRET"),
            razorpay_api_url: optional("RAZORPAY_API_URL").unwrap_or(defaults.razorpay_api_url),
        })
    }
}

/// Development configuration: OTP bypass and WhatsApp simulation on, no API keys.
impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: String::new(),
            valkey_url: String::new(),
            bind_address: "0.0.0.0:8080".to_string(),

            otp_bypass: true,
            otp_default_code: "123456".to_string(),
            otp_expiry_minutes: 10,

            twilio_account_sid: None,
            twilio_auth_token: None,
            twilio_phone_number: None,
            twilio_api_url: "https://api.twilio.com".to_string(),

            ai_provider: AiProvider::Gemini,
            gemini_api_key: None,
            gemini_api_url: "https://generativelanguage.googleapis.com".to_string(),
            openai_api_key: None,
            openai_api_url: "https://api.openai.com".to_string(),

            whatsapp_api_url: "https://graph.facebook.com/v18.0".to_string(),
            whatsapp_access_token: None,
            whatsapp_phone_number_id: None,
            whatsapp_simulation_mode: true,

            razorpay_key_id: None,
            razorpay_key_secret: None,
            razorpay_api_url: "https://api.razorpay.com".to_string(),
        }
    }
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

/// Unset and blank variables are treated the same.
fn optional(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

fn parsed<T>(var: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match optional(var) {
        Some(value) => value
            .to_lowercase()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvValue {
                var: var.to_string(),
                reason: e.to_string(),
            }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod ai_provider {
        use super::*;

        /// Expect provider names to parse case-insensitively
        #[test]
        fn parses_known_providers() {
            assert_eq!("Gemini".parse::<AiProvider>(), Ok(AiProvider::Gemini));
            assert_eq!("openai".parse::<AiProvider>(), Ok(AiProvider::OpenAi));
        }

        /// Expect an error for an unknown provider
        #[test]
        fn rejects_unknown_provider() {
            assert!("claude".parse::<AiProvider>().is_err());
        }
    }

    mod default {
        use super::*;

        /// Expect the development defaults to bypass OTP and simulate WhatsApp
        #[test]
        fn uses_development_settings() {
            let config = Config::default();

            assert!(config.otp_bypass);
            assert!(config.whatsapp_simulation_mode);
            assert_eq!(config.otp_default_code, "123456");
            assert_eq!(config.otp_expiry_minutes, 10);
            assert!(config.gemini_api_key.is_none());
        }
    }
}
