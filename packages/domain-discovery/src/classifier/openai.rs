//! OpenAI-backed exclusion classifier.
//!
//! Talks to any OpenAI-compatible `/chat/completions` endpoint. One request
//! per classification; the answer is parsed with
//! [`parse_exclusions`](super::prompt::parse_exclusions).

use async_trait::async_trait;
use search_client::ApiKey;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use super::prompt::{build_prompt, parse_exclusions, SYSTEM_PROMPT};
use super::ExclusionClassifier;
use crate::error::{ClassifierError, ClassifierResult};

pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_TEMPERATURE: f32 = 0.1;
const DEFAULT_MAX_TOKENS: u32 = 500;
const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
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
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completion classifier.
#[derive(Clone)]
pub struct OpenAIClassifier {
    http_client: reqwest::Client,
    api_key: ApiKey,
    base_url: String,
    model: String,
    temperature: f32,
    max_tokens: u32,
}

impl OpenAIClassifier {
    pub fn new(api_key: impl Into<ApiKey>) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            http_client,
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            max_tokens: DEFAULT_MAX_TOKENS,
        }
    }

    /// Create from `OPENAI_API_KEY`; `None` when unset or blank.
    pub fn from_env() -> Option<Self> {
        let key = std::env::var("OPENAI_API_KEY").ok()?;
        let key = ApiKey::new(key);
        (!key.is_blank()).then(|| Self::new(key))
    }

    /// Set a custom base URL (Azure, OpenRouter, proxies, tests).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn complete(&self, prompt: &str) -> ClassifierResult<String> {
        let start = Instant::now();
        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let response = self
            .http_client
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(self.api_key.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "OpenAI request failed");
                ClassifierError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %message, "OpenAI API error");
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| ClassifierError::Parse(e.to_string()))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ClassifierError::EmptyResponse)?;

        debug!(
            model = %self.model,
            duration_ms = start.elapsed().as_millis(),
            "OpenAI chat completion"
        );

        Ok(content)
    }
}

#[async_trait]
impl ExclusionClassifier for OpenAIClassifier {
    fn name(&self) -> &str {
        &self.model
    }

    async fn exclusions(&self, domains: &[String], company: &str) -> ClassifierResult<HashSet<String>> {
        let prompt = build_prompt(domains, company);
        let answer = self.complete(&prompt).await?;
        debug!(answer = %answer.trim(), "classifier response");
        Ok(parse_exclusions(&answer))
    }
}
