//! OpenAI-compatible chat client for slide generation.

use std::time::Duration;

use async_trait::async_trait;
use serde::Serialize;

use crate::error::DeckError;
use crate::github::locator::ApiToken;

const DEFAULT_TIMEOUT_SECS: u64 = 120;
const SYSTEM_PROMPT: &str = "You are a Marp slide generation assistant.";
const TEMPERATURE: f64 = 0.5;

/// Generates a Markdown slide deck from an assembled prompt.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SlideGenerator: Send + Sync {
    /// Sends the prompt to the model and returns raw Markdown.
    ///
    /// An answer missing the expected completion text degrades to an empty
    /// string rather than failing.
    async fn generate(&self, prompt: &str) -> Result<String, DeckError>;
}

/// Configuration for [`OpenAiSlideGenerator`].
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// Base API URL (e.g., `https://api.openai.com`).
    pub base_url: String,
    /// Model identifier sent in chat-completions requests.
    pub model: String,
    /// API key used for bearer authentication.
    pub api_key: ApiToken,
    /// HTTP timeout.
    pub timeout: Duration,
}

impl OpenAiConfig {
    /// Constructs configuration with required API settings.
    #[must_use]
    pub fn new(base_url: impl Into<String>, model: impl Into<String>, api_key: ApiToken) -> Self {
        Self {
            base_url: base_url.into(),
            model: model.into(),
            api_key,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// OpenAI-compatible slide generator implementation.
#[derive(Debug, Clone)]
pub struct OpenAiSlideGenerator {
    config: OpenAiConfig,
    client: reqwest::Client,
}

impl OpenAiSlideGenerator {
    /// Creates a generator from explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Configuration`] when the HTTP client cannot be
    /// built.
    pub fn new(config: OpenAiConfig) -> Result<Self, DeckError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|error| DeckError::Configuration {
                message: format!("failed to configure chat HTTP client: {error}"),
            })?;

        Ok(Self { config, client })
    }
}

#[async_trait]
impl SlideGenerator for OpenAiSlideGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DeckError> {
        let endpoint = format!(
            "{}/v1/chat/completions",
            self.config.base_url.trim_end_matches('/')
        );
        let payload = ChatCompletionsRequest {
            model: self.config.model.as_str(),
            messages: vec![
                ChatCompletionsMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatCompletionsMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
        };

        let response = self
            .client
            .post(endpoint)
            .bearer_auth(self.config.api_key.as_str())
            .json(&payload)
            .send()
            .await
            .map_err(|error| DeckError::Network {
                message: format!("chat request transport failed: {error}"),
            })?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown");
            let body = response.text().await.map_or_else(
                |_| "(failed to read error response body)".to_owned(),
                |content| truncate_for_message(content.as_str(), 160),
            );
            return Err(DeckError::Api {
                message: format!(
                    "chat request failed with status {code} {reason}: {body}",
                    code = status.as_u16()
                ),
            });
        }

        let payload: ChatCompletionsResponse =
            response.json().await.map_err(|error| DeckError::Api {
                message: format!("chat response JSON decoding failed: {error}"),
            })?;

        // A response without the expected completion text degrades to an
        // empty deck rather than aborting the flow.
        Ok(payload
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default())
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionsRequest<'a> {
    model: &'a str,
    messages: Vec<ChatCompletionsMessage<'a>>,
    temperature: f64,
}

#[derive(Debug, Serialize)]
struct ChatCompletionsMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, serde::Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, serde::Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

fn truncate_for_message(message: &str, max_chars: usize) -> String {
    let mut output = String::new();
    let mut chars = message.chars();

    for _ in 0..max_chars {
        let Some(character) = chars.next() else {
            return output;
        };
        output.push(character);
    }

    if chars.next().is_some() {
        output.push_str("...");
    }

    output
}
