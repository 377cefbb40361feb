//! Client for an OpenAI-compatible chat-completions endpoint.
//!
//! Implements [`ContentGenerator`] using [`reqwest`]. Callers never use it
//! directly; they go through
//! [`contractly_core::content::generate_or_fallback`].

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use contractly_core::content::{
    build_user_prompt, ContentGenerator, ContentRequest, DisabledGenerator, GenerationError,
    SYSTEM_PROMPT,
};
use serde::{Deserialize, Serialize};

const DEFAULT_BASE_URL: &str = "https://api.groq.com/openai/v1";
const DEFAULT_MODEL: &str = "openai/gpt-oss-120b";
const DEFAULT_MAX_TOKENS: u32 = 8000;
const DEFAULT_TIMEOUT_SECS: u64 = 60;
const TEMPERATURE: f32 = 0.5;

/// Content generation service configuration.
#[derive(Debug, Clone)]
pub struct GenerationConfig {
    /// API key; generation is disabled when absent.
    pub api_key: Option<String>,
    /// Base URL up to and including the API version segment.
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout_secs: u64,
}

impl GenerationConfig {
    /// Load generation configuration from environment variables.
    ///
    /// | Env Var                          | Default                            |
    /// |----------------------------------|------------------------------------|
    /// | `LLM_API_KEY` (or `GROQ_API_KEY`)| unset: generation disabled         |
    /// | `LLM_BASE_URL`                   | `https://api.groq.com/openai/v1`   |
    /// | `LLM_MODEL`                      | `openai/gpt-oss-120b`              |
    /// | `LLM_MAX_TOKENS`                 | `8000`                             |
    /// | `LLM_TIMEOUT_SECS`               | `60`                               |
    pub fn from_env() -> Self {
        let api_key = std::env::var("LLM_API_KEY")
            .or_else(|_| std::env::var("GROQ_API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty());

        let base_url = std::env::var("LLM_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_BASE_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("LLM_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let max_tokens: u32 = std::env::var("LLM_MAX_TOKENS")
            .unwrap_or_else(|_| DEFAULT_MAX_TOKENS.to_string())
            .parse()
            .expect("LLM_MAX_TOKENS must be a valid u32");

        let timeout_secs: u64 = std::env::var("LLM_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("LLM_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            base_url,
            model,
            max_tokens,
            timeout_secs,
        }
    }

    /// Configuration with generation switched off.
    pub fn disabled() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Build the generator for `config`: a chat-completions client when an API
/// key is configured, otherwise [`DisabledGenerator`].
pub fn build_generator(config: &GenerationConfig) -> Result<Arc<dyn ContentGenerator>, reqwest::Error> {
    match &config.api_key {
        Some(key) => {
            let client = reqwest::Client::builder()
                .timeout(Duration::from_secs(config.timeout_secs))
                .build()?;
            tracing::info!(model = %config.model, base_url = %config.base_url, "Content generation enabled");
            Ok(Arc::new(ChatCompletionsGenerator::with_client(
                client,
                config.clone(),
                key.clone(),
            )))
        }
        None => {
            tracing::warn!("No LLM API key configured; contract assist will use fallback templates");
            Ok(Arc::new(DisabledGenerator))
        }
    }
}

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

// ---------------------------------------------------------------------------
// Client
// ---------------------------------------------------------------------------

/// HTTP client for a chat-completions service.
pub struct ChatCompletionsGenerator {
    client: reqwest::Client,
    config: GenerationConfig,
    api_key: String,
}

impl ChatCompletionsGenerator {
    /// Create a generator reusing an existing [`reqwest::Client`].
    pub fn with_client(client: reqwest::Client, config: GenerationConfig, api_key: String) -> Self {
        Self {
            client,
            config,
            api_key,
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.base_url)
    }
}

#[async_trait]
impl ContentGenerator for ChatCompletionsGenerator {
    async fn generate(&self, request: &ContentRequest) -> Result<String, GenerationError> {
        let user_prompt = build_user_prompt(request, chrono::Utc::now().date_naive());
        let body = ChatRequest {
            model: &self.config.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: &user_prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: self.config.max_tokens,
        };

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(GenerationError::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatResponse = response
            .json()
            .await
            .map_err(|e| GenerationError::Request(e.to_string()))?;

        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyResponse)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_builds_disabled_generator() {
        assert!(build_generator(&GenerationConfig::disabled()).is_ok());
    }

    #[test]
    fn completions_url_joins_base() {
        let generator = ChatCompletionsGenerator::with_client(
            reqwest::Client::new(),
            GenerationConfig::disabled(),
            "k".to_string(),
        );
        assert_eq!(
            generator.completions_url(),
            "https://api.groq.com/openai/v1/chat/completions"
        );
    }

    #[test]
    fn response_without_choices_parses() {
        let parsed: ChatResponse = serde_json::from_str(r#"{"id":"x"}"#).unwrap();
        assert!(parsed.choices.is_empty());
    }

    #[test]
    fn response_content_is_extracted() {
        let parsed: ChatResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"<h2>Hi</h2>"}}]}"#,
        )
        .unwrap();
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("<h2>Hi</h2>"));
    }
}
