//! OpenAI chat-completions backend.
//!
//! Implements scribe-core's `CompletionBackend` over
//! `POST /v1/chat/completions`: the two-turn exchange goes out as-is, and
//! the first choice's message content comes back as the synthesized body.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use scribe_core::{
    BackendError, BackendResult, ChatMessage, CompletionBackend, SynthesisRequest,
    SynthesisResult,
};

const DEFAULT_BASE_URL: &str = "https://api.openai.com";

/// Model used when the configuration names none.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// OpenAI client configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    /// API base URL. Override for proxies or compatible backends.
    pub base_url: String,
    /// API key.
    pub api_key: String,
    /// Model identifier; falls back to [`DEFAULT_MODEL`] when unset.
    pub model: Option<String>,
}

impl OpenAiConfig {
    /// Config for api.openai.com with the given key.
    pub fn new(api_key: &str) -> Self {
        OpenAiConfig {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.to_string(),
            model: None,
        }
    }

    /// Select a model.
    pub fn with_model(mut self, model: &str) -> Self {
        self.model = Some(model.to_string());
        self
    }

    /// Point the client at a different API root.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

#[derive(Debug, Serialize)]
struct ChatCompletionPayload<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
}

/// Completion backend speaking the OpenAI chat-completions protocol.
pub struct OpenAiCompletionBackend {
    config: OpenAiConfig,
    http: reqwest::Client,
}

impl OpenAiCompletionBackend {
    /// Create a new client.
    pub fn new(config: OpenAiConfig) -> Self {
        let http = reqwest::Client::builder()
            .user_agent(concat!("release-scribe/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        OpenAiCompletionBackend { config, http }
    }

    fn completions_url(&self) -> String {
        format!("{}/v1/chat/completions", self.config.base_url)
    }

    fn model(&self) -> &str {
        self.config.model.as_deref().unwrap_or(DEFAULT_MODEL)
    }
}

#[async_trait]
impl CompletionBackend for OpenAiCompletionBackend {
    async fn complete(&self, request: &SynthesisRequest) -> BackendResult<SynthesisResult> {
        let messages = request.messages();
        let payload = ChatCompletionPayload {
            model: self.model(),
            messages: &messages,
        };

        debug!(model = payload.model, "requesting completion");

        let response = self
            .http
            .post(self.completions_url())
            .bearer_auth(&self.config.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| BackendError::Http(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_default()
                .trim()
                .to_string();
            return Err(BackendError::Api {
                status: status.as_u16(),
                message: if message.is_empty() {
                    status.to_string()
                } else {
                    message
                },
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| BackendError::Decode(e.to_string()))?;

        let body = completion
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .ok_or(BackendError::EmptyCompletion)?;

        Ok(SynthesisResult { body })
    }
}
