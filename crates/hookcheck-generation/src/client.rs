//! Generation backends
//!
//! [`GenerationClient`] is the seam between the workflow and whatever
//! produces text. [`HttpGenerationClient`] talks to an OpenAI-compatible
//! chat-completions endpoint.

use crate::error::GenerationError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Default chat-completions endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model name
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default environment variable holding the API key
pub const DEFAULT_API_KEY_ENV: &str = "HOOKCHECK_API_KEY";

/// Error bodies longer than this are truncated in `GenerationError::Status`
const MAX_ERROR_BODY: usize = 512;

/// Produces raw completion text for a prompt
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// One completion for `prompt`
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError>;
}

/// Backend and workflow settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GenerationConfig {
    /// Chat-completions URL
    pub endpoint: String,
    /// Model name sent with each request
    pub model: String,
    /// Environment variable holding the bearer token
    pub api_key_env: String,
    /// Sampling temperature
    pub temperature: f32,
    /// Optional system prompt prepended to every request
    pub system_prompt: Option<String>,
    /// Per-request timeout; reqwest's default when unset
    pub timeout_secs: Option<u64>,
    /// Generation attempts per workflow run
    pub max_attempts: u32,
    /// Total score at which a candidate is accepted
    pub accept_score: u8,
    /// Also require no Critical issue before accepting
    pub require_valid: bool,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            model: DEFAULT_MODEL.to_string(),
            api_key_env: DEFAULT_API_KEY_ENV.to_string(),
            temperature: 0.8,
            system_prompt: None,
            timeout_secs: None,
            max_attempts: hookcheck_core::DEFAULT_CORRECTION_ROUNDS,
            accept_score: hookcheck_core::DEFAULT_ACCEPT_SCORE,
            require_valid: false,
        }
    }
}

impl GenerationConfig {
    /// Create with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With endpoint
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// With model
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With API key variable name
    #[must_use]
    pub fn with_api_key_env(mut self, var: impl Into<String>) -> Self {
        self.api_key_env = var.into();
        self
    }

    /// With request timeout
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = Some(secs);
        self
    }

    /// With attempt bound
    #[must_use]
    pub fn with_max_attempts(mut self, attempts: u32) -> Self {
        self.max_attempts = attempts;
        self
    }

    /// With acceptance score
    #[must_use]
    pub fn with_accept_score(mut self, score: u8) -> Self {
        self.accept_score = score;
        self
    }

    /// Read the API key from the configured environment variable.
    ///
    /// # Errors
    /// `MissingApiKey` if the variable is unset or blank.
    pub fn api_key(&self) -> Result<String, GenerationError> {
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| GenerationError::MissingApiKey {
                var: self.api_key_env.clone(),
            })
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatReply,
}

#[derive(Deserialize)]
struct ChatReply {
    #[serde(default)]
    content: Option<String>,
}

/// Chat-completions client over reqwest
#[derive(Debug, Clone)]
pub struct HttpGenerationClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_key: String,
    temperature: f32,
    system_prompt: Option<String>,
}

impl HttpGenerationClient {
    /// Build from config, reading the key from the environment.
    ///
    /// # Errors
    /// `MissingApiKey` if the key variable is unset, `Http` if the client
    /// cannot be constructed.
    pub fn from_config(config: &GenerationConfig) -> Result<Self, GenerationError> {
        let api_key = config.api_key()?;
        Self::with_api_key(config, api_key)
    }

    /// Build from config with an explicit key.
    ///
    /// # Errors
    /// `Http` if the client cannot be constructed.
    pub fn with_api_key(
        config: &GenerationConfig,
        api_key: impl Into<String>,
    ) -> Result<Self, GenerationError> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            http: builder.build()?,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            api_key: api_key.into(),
            temperature: config.temperature,
            system_prompt: config.system_prompt.clone(),
        })
    }

    /// Target endpoint
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl GenerationClient for HttpGenerationClient {
    async fn generate(&self, prompt: &str) -> Result<String, GenerationError> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = &self.system_prompt {
            messages.push(ChatMessage {
                role: "system",
                content: system,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&ChatRequest {
                model: &self.model,
                messages,
                temperature: self.temperature,
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let mut body = response.text().await.unwrap_or_default();
            if body.len() > MAX_ERROR_BODY {
                let cut = (0..=MAX_ERROR_BODY)
                    .rev()
                    .find(|&i| body.is_char_boundary(i))
                    .unwrap_or(0);
                body.truncate(cut);
            }
            return Err(GenerationError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let text = response.text().await?;
        let parsed: ChatResponse = serde_json::from_str(&text)?;
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(GenerationError::EmptyCompletion)?;

        debug!(model = %self.model, chars = content.len(), "received completion");
        Ok(content)
    }
}
