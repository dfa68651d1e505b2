//! JSON-mode chat completion against Gemini or OpenAI.

use std::time::Duration;

use serde::Deserialize;
use serde_json::{json, Value};

use crate::server::{
    config::{AiProvider, Config},
    error::{external::ExternalError, Error},
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub const GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const OPENAI_MODEL: &str = "gpt-4o-mini";

/// Parsed JSON reply of a model plus its token usage
#[derive(Debug)]
pub struct Completion {
    pub model: &'static str,
    pub content: Value,
    pub prompt_tokens: i32,
    pub completion_tokens: i32,
}

/// Estimated price of a call in millionths of a US dollar
pub fn estimate_cost_micros(model: &str, prompt_tokens: i32, completion_tokens: i32) -> i64 {
    // USD per million tokens, which is micro-USD per token
    let (input, output) = match model {
        OPENAI_MODEL => (0.15, 0.60),
        GEMINI_MODEL => (0.10, 0.40),
        _ => return 0,
    };

    (f64::from(prompt_tokens) * input + f64::from(completion_tokens) * output).round() as i64
}

#[derive(Deserialize)]
struct OpenAiResponse {
    choices: Vec<OpenAiChoice>,
    usage: Option<OpenAiUsage>,
}

#[derive(Deserialize)]
struct OpenAiChoice {
    message: OpenAiMessage,
}

#[derive(Deserialize)]
struct OpenAiMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct OpenAiUsage {
    #[serde(default)]
    prompt_tokens: i32,
    #[serde(default)]
    completion_tokens: i32,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
    usage_metadata: Option<GeminiUsage>,
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: GeminiContent,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
struct GeminiPart {
    text: Option<String>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiUsage {
    #[serde(default)]
    prompt_token_count: i32,
    #[serde(default)]
    candidates_token_count: i32,
}

pub struct LlmClient<'a> {
    http: &'a reqwest::Client,
    config: &'a Config,
}

impl<'a> LlmClient<'a> {
    /// Creates a new instance of [`LlmClient`]
    pub fn new(http: &'a reqwest::Client, config: &'a Config) -> Self {
        Self { http, config }
    }

    /// Configured provider and its key, switching to the other provider when only its key is set
    pub fn provider(&self) -> Result<(AiProvider, &'a str), Error> {
        let gemini = self.config.gemini_api_key.as_deref();
        let openai = self.config.openai_api_key.as_deref();

        let selected = match self.config.ai_provider {
            AiProvider::Gemini => gemini
                .map(|key| (AiProvider::Gemini, key))
                .or_else(|| openai.map(|key| (AiProvider::OpenAi, key))),
            AiProvider::OpenAi => openai
                .map(|key| (AiProvider::OpenAi, key))
                .or_else(|| gemini.map(|key| (AiProvider::Gemini, key))),
        };

        selected.ok_or_else(|| {
            let message = match self.config.ai_provider {
                AiProvider::Gemini => "Gemini API key not configured.",
                AiProvider::OpenAi => "OpenAI API key not configured.",
            };

            ExternalError::AiNotConfigured(message.to_string()).into()
        })
    }

    /// Model that a call made now would use
    pub fn model(&self) -> Result<&'static str, Error> {
        let (provider, _) = self.provider()?;

        Ok(model_for(provider))
    }

    /// Sends the prompt and parses the reply as a JSON document
    pub async fn complete(&self, system: &str, prompt: &str) -> Result<Completion, Error> {
        let (provider, key) = self.provider()?;

        match provider {
            AiProvider::OpenAi => self.complete_openai(key, system, prompt).await,
            AiProvider::Gemini => self.complete_gemini(key, system, prompt).await,
        }
    }

    async fn complete_openai(
        &self,
        key: &str,
        system: &str,
        prompt: &str,
    ) -> Result<Completion, Error> {
        let url = format!(
            "{}/v1/chat/completions",
            self.config.openai_api_url.trim_end_matches('/')
        );
        let payload = json!({
            "model": OPENAI_MODEL,
            "messages": [
                {"role": "system", "content": system},
                {"role": "user", "content": prompt},
            ],
            "response_format": {"type": "json_object"},
        });

        let request = self.http.post(url).bearer_auth(key).json(&payload);
        let response: OpenAiResponse = self.send(request).await?;

        let text = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| ExternalError::AiInvalidResponse("no choices in reply".to_string()))?;
        let usage = response.usage.unwrap_or(OpenAiUsage {
            prompt_tokens: 0,
            completion_tokens: 0,
        });

        Ok(Completion {
            model: OPENAI_MODEL,
            content: parse_content(&text)?,
            prompt_tokens: usage.prompt_tokens,
            completion_tokens: usage.completion_tokens,
        })
    }

    async fn complete_gemini(
        &self,
        key: &str,
        system: &str,
        prompt: &str,
    ) -> Result<Completion, Error> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.gemini_api_url.trim_end_matches('/'),
            GEMINI_MODEL
        );
        let payload = json!({
            "systemInstruction": {"parts": [{"text": system}]},
            "contents": [{"role": "user", "parts": [{"text": prompt}]}],
            "generationConfig": {"responseMimeType": "application/json"},
        });

        let request = self.http.post(url).query(&[("key", key)]).json(&payload);
        let response: GeminiResponse = self.send(request).await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .and_then(|part| part.text)
            .ok_or_else(|| {
                ExternalError::AiInvalidResponse("no candidates in reply".to_string())
            })?;
        let (prompt_tokens, completion_tokens) = response
            .usage_metadata
            .map(|usage| (usage.prompt_token_count, usage.candidates_token_count))
            .unwrap_or_default();

        Ok(Completion {
            model: GEMINI_MODEL,
            content: parse_content(&text)?,
            prompt_tokens,
            completion_tokens,
        })
    }

    async fn send<T: for<'de> Deserialize<'de>>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, Error> {
        let response = request
            .timeout(REQUEST_TIMEOUT)
            .send()
            .await
            .map_err(|e| ExternalError::AiRequestFailed(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExternalError::AiRequestFailed(e.to_string()))?;

        if !status.is_success() {
            return Err(ExternalError::AiRequestFailed(format!("HTTP {}: {}", status, body)).into());
        }

        serde_json::from_str(&body)
            .map_err(|e| ExternalError::AiInvalidResponse(e.to_string()).into())
    }
}

fn model_for(provider: AiProvider) -> &'static str {
    match provider {
        AiProvider::Gemini => GEMINI_MODEL,
        AiProvider::OpenAi => OPENAI_MODEL,
    }
}

/// Models occasionally wrap JSON in a markdown fence even in JSON mode
fn parse_content(text: &str) -> Result<Value, Error> {
    let trimmed = text.trim();
    let unfenced = trimmed
        .strip_prefix("```json")
        .or_else(|| trimmed.strip_prefix("```"))
        .and_then(|rest| rest.strip_suffix("```"))
        .unwrap_or(trimmed);

    serde_json::from_str(unfenced.trim())
        .map_err(|e| ExternalError::AiInvalidResponse(e.to_string()).into())
}

#[cfg(test)]
mod tests {
    use gymedge_test_utils::prelude::*;
    use mockito::Matcher;

    use super::*;

    fn keyed_config(url: String, provider: AiProvider) -> Config {
        Config {
            ai_provider: provider,
            gemini_api_key: Some("gemini-key".to_string()),
            gemini_api_url: url.clone(),
            openai_api_key: Some("openai-key".to_string()),
            openai_api_url: url,
            ..Config::default()
        }
    }

    mod estimate_cost_micros {
        use super::*;

        /// Expect per-model token prices
        #[test]
        fn prices_by_model() {
            assert_eq!(estimate_cost_micros(OPENAI_MODEL, 1_000, 500), 450);
            assert_eq!(estimate_cost_micros(GEMINI_MODEL, 1_000, 500), 300);
            assert_eq!(estimate_cost_micros("heuristic-v1", 1_000, 500), 0);
        }
    }

    mod provider {
        use super::*;

        /// Expect the other provider when only its key is configured
        #[test]
        fn falls_back_to_configured_key() {
            let config = Config {
                ai_provider: AiProvider::Gemini,
                openai_api_key: Some("openai-key".to_string()),
                ..Config::default()
            };
            let http = reqwest::Client::new();

            let (provider, key) = LlmClient::new(&http, &config).provider().unwrap();

            assert_eq!(provider, AiProvider::OpenAi);
            assert_eq!(key, "openai-key");
        }

        /// Expect a not configured error naming the selected provider
        #[test]
        fn errors_without_keys() {
            let config = Config {
                ai_provider: AiProvider::OpenAi,
                ..Config::default()
            };
            let http = reqwest::Client::new();

            let result = LlmClient::new(&http, &config).provider();

            assert!(matches!(
                result,
                Err(Error::ExternalError(ExternalError::AiNotConfigured(ref m)))
                    if m == "OpenAI API key not configured."
            ));
        }
    }

    mod complete {
        use super::*;

        /// Expect the OpenAI message content to be parsed as JSON with its usage
        #[tokio::test]
        async fn parses_openai_reply() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_mock_endpoint(|server| {
                    server
                        .mock("POST", "/v1/chat/completions")
                        .match_header("authorization", "Bearer openai-key")
                        .match_body(Matcher::PartialJson(json!({
                            "model": "gpt-4o-mini",
                            "response_format": {"type": "json_object"},
                        })))
                        .with_status(200)
                        .with_body(
                            json!({
                                "choices": [{"message": {"content": "{\"goal\": \"fat_loss\"}"}}],
                                "usage": {"prompt_tokens": 120, "completion_tokens": 80},
                            })
                            .to_string(),
                        )
                        .create()
                })
                .build()
                .await?;
            let config = keyed_config(test.server_url(), AiProvider::OpenAi);
            let http = reqwest::Client::new();

            let completion = LlmClient::new(&http, &config)
                .complete("system", "prompt")
                .await
                .unwrap();

            assert_eq!(completion.model, OPENAI_MODEL);
            assert_eq!(completion.content, json!({"goal": "fat_loss"}));
            assert_eq!(completion.prompt_tokens, 120);
            assert_eq!(completion.completion_tokens, 80);
            test.assert_mocks();

            Ok(())
        }

        /// Expect the Gemini candidate text to be parsed as JSON with its usage metadata
        #[tokio::test]
        async fn parses_gemini_reply() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_mock_endpoint(|server| {
                    server
                        .mock("POST", "/v1beta/models/gemini-2.0-flash:generateContent")
                        .match_query(Matcher::UrlEncoded("key".into(), "gemini-key".into()))
                        .match_body(Matcher::PartialJson(json!({
                            "generationConfig": {"responseMimeType": "application/json"},
                        })))
                        .with_status(200)
                        .with_body(
                            json!({
                                "candidates": [{"content": {"parts": [{"text": "```json\n{\"days\": []}\n```"}]}}],
                                "usageMetadata": {"promptTokenCount": 50, "candidatesTokenCount": 25},
                            })
                            .to_string(),
                        )
                        .create()
                })
                .build()
                .await?;
            let config = keyed_config(test.server_url(), AiProvider::Gemini);
            let http = reqwest::Client::new();

            let completion = LlmClient::new(&http, &config)
                .complete("system", "prompt")
                .await
                .unwrap();

            assert_eq!(completion.model, GEMINI_MODEL);
            assert_eq!(completion.content, json!({"days": []}));
            assert_eq!(completion.prompt_tokens, 50);
            assert_eq!(completion.completion_tokens, 25);
            test.assert_mocks();

            Ok(())
        }

        /// Expect prose instead of JSON to be an invalid response
        #[tokio::test]
        async fn rejects_non_json_content() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_mock_endpoint(|server| {
                    server
                        .mock("POST", "/v1/chat/completions")
                        .with_status(200)
                        .with_body(
                            json!({"choices": [{"message": {"content": "Here is your plan!"}}]})
                                .to_string(),
                        )
                        .create()
                })
                .build()
                .await?;
            let config = keyed_config(test.server_url(), AiProvider::OpenAi);
            let http = reqwest::Client::new();

            let result = LlmClient::new(&http, &config).complete("system", "prompt").await;

            assert!(matches!(
                result,
                Err(Error::ExternalError(ExternalError::AiInvalidResponse(_)))
            ));

            Ok(())
        }

        /// Expect an error status to be a failed request
        #[tokio::test]
        async fn reports_http_errors() -> Result<(), TestError> {
            let test = TestBuilder::new()
                .with_mock_endpoint(|server| {
                    server
                        .mock("POST", "/v1/chat/completions")
                        .with_status(401)
                        .with_body("invalid api key")
                        .create()
                })
                .build()
                .await?;
            let config = keyed_config(test.server_url(), AiProvider::OpenAi);
            let http = reqwest::Client::new();

            let result = LlmClient::new(&http, &config).complete("system", "prompt").await;

            assert!(matches!(
                result,
                Err(Error::ExternalError(ExternalError::AiRequestFailed(ref m)))
                    if m.contains("invalid api key")
            ));

            Ok(())
        }
    }
}
