//! LLM provider configuration.
//!
//! Settings for the generative-language backend used to write insight
//! narratives. The API key is read from `GEMINI_API_KEY` at runtime and never
//! stored in the config file.

use serde::Deserialize;

use crate::error::ConfigError;

/// LLM configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LlmConfig {
    /// Whether to call the LLM at all.
    ///
    /// When disabled, or when no API key is present, insights use the local
    /// summarizer. Defaults to true.
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Model identifiers, tried in order until one returns text.
    #[serde(default = "default_models")]
    pub models: Vec<String>,

    /// Sampling temperature. Defaults to 0.8.
    #[serde(default = "default_temperature")]
    pub temperature: f64,

    /// Top-k sampling cutoff. Defaults to 40.
    #[serde(default = "default_top_k")]
    pub top_k: u32,

    /// Nucleus sampling cutoff. Defaults to 0.95.
    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Maximum tokens in the response. Defaults to 2048.
    #[serde(default = "default_max_output_tokens")]
    pub max_output_tokens: u32,

    /// Request timeout in seconds. Defaults to 30.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            models: default_models(),
            temperature: default_temperature(),
            top_k: default_top_k(),
            top_p: default_top_p(),
            max_output_tokens: default_max_output_tokens(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl LlmConfig {
    /// Validate the model list and sampling parameters.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] for an empty model list while
    /// enabled, or out-of-range sampling parameters.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.enabled && self.models.iter().all(|m| m.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "llm.models",
                reason: "at least one model is required when llm is enabled".into(),
            });
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ConfigError::InvalidValue {
                field: "llm.temperature",
                reason: "must be between 0.0 and 2.0".into(),
            });
        }
        if !(0.0..=1.0).contains(&self.top_p) {
            return Err(ConfigError::InvalidValue {
                field: "llm.top_p",
                reason: "must be between 0.0 and 1.0".into(),
            });
        }
        if self.max_output_tokens == 0 {
            return Err(ConfigError::InvalidValue {
                field: "llm.max_output_tokens",
                reason: "must be greater than 0".into(),
            });
        }
        Ok(())
    }
}

const fn default_enabled() -> bool {
    true
}

fn default_models() -> Vec<String> {
    vec!["gemini-1.5-flash".into(), "gemini-1.5-pro".into()]
}

const fn default_temperature() -> f64 {
    0.8
}

const fn default_top_k() -> u32 {
    40
}

const fn default_top_p() -> f64 {
    0.95
}

const fn default_max_output_tokens() -> u32 {
    2048
}

const fn default_timeout_secs() -> u64 {
    30
}
