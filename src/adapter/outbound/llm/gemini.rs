//! Google Gemini LLM client.
//!
//! Provides an implementation of the [`Llm`] trait for the Generative
//! Language `generateContent` API. Models are tried in configured order and
//! the first non-empty answer wins.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{ConfigError, Error, Result};
use crate::infrastructure::config::llm::LlmConfig;
use crate::port::outbound::llm::Llm;

/// Generative Language API base.
const API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Sampling parameters sent with every request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
}

impl From<&LlmConfig> for GenerationConfig {
    fn from(config: &LlmConfig) -> Self {
        Self {
            temperature: config.temperature,
            top_k: config.top_k,
            top_p: config.top_p,
            max_output_tokens: config.max_output_tokens,
        }
    }
}

/// Gemini API client.
#[derive(Debug)]
pub struct Gemini {
    client: Client,
    api_key: String,
    /// Model identifiers in fallback order.
    models: Vec<String>,
    generation: GenerationConfig,
}

impl Gemini {
    /// Create a new Gemini client with explicit configuration.
    #[must_use]
    pub fn new(api_key: impl Into<String>, models: Vec<String>, generation: GenerationConfig) -> Self {
        Self {
            client: Client::new(),
            api_key: api_key.into(),
            models,
            generation,
        }
    }

    /// Replace the HTTP client's request timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());
        self
    }

    /// Create a client from the `GEMINI_API_KEY` environment variable.
    ///
    /// # Errors
    ///
    /// Returns an error if the environment variable is not set or empty.
    pub fn from_env(config: &LlmConfig) -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or(Error::Config(ConfigError::MissingField {
                field: API_KEY_ENV,
            }))?;
        Ok(Self::new(api_key, config.models.clone(), GenerationConfig::from(config))
            .with_timeout(Duration::from_secs(config.timeout_secs)))
    }

    #[must_use]
    pub fn models(&self) -> &[String] {
        &self.models
    }

    fn endpoint(model: &str) -> String {
        format!("{API_BASE}/{model}:generateContent")
    }

    async fn generate(&self, model: &str, prompt: &str) -> Result<String> {
        let request = Request {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: self.generation,
        };

        let response = self
            .client
            .post(Self::endpoint(model))
            .header("x-goog-api-key", &self.api_key)
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await?
            .error_for_status()
            .map_err(|e| Error::Connection(e.to_string()))?
            .json::<Response>()
            .await?;

        Ok(response.text())
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Request {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Serialize, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

#[derive(Deserialize)]
struct Response {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

impl Response {
    /// Text of the first candidate, parts concatenated.
    fn text(self) -> String {
        self.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap_or_default()
    }
}

#[async_trait]
impl Llm for Gemini {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        for model in &self.models {
            match self.generate(model, prompt).await {
                Ok(text) if !text.trim().is_empty() => {
                    debug!(model = %model, chars = text.len(), "gemini completion");
                    return Ok(text);
                }
                Ok(_) => warn!(model = %model, "gemini returned empty text, trying next model"),
                Err(e) => warn!(model = %model, error = %e, "gemini request failed, trying next model"),
            }
        }
        Err(Error::EmptyResponse(self.name().into()))
    }
}
