//! Application configuration loading and validation.
//!
//! Provides the main [`Config`] struct that aggregates all application settings.
//! Configuration is loaded from a TOML file; every section has defaults, so an
//! empty file is a valid configuration. The Gemini API key is read only from
//! the `GEMINI_API_KEY` environment variable.
//!
//! # Example
//!
//! ```no_run
//! use storelens::infrastructure::config::settings::Config;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load("config.toml")?;
//!     config.init_logging();
//!     Ok(())
//! }
//! ```

use std::path::Path;

use serde::Deserialize;

use super::analysis::AnalysisConfig;
use super::data::DataConfig;
use super::llm::LlmConfig;
use super::logging::LoggingConfig;
use crate::domain::matcher::{AliasTable, NameMatcher};
use crate::error::{ConfigError, Result};

/// Main application configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    /// Logging and tracing configuration.
    #[serde(default)]
    pub logging: LoggingConfig,

    /// Dataset directory and file names.
    #[serde(default)]
    pub data: DataConfig,

    /// Peer comparison parameters.
    #[serde(default)]
    pub analysis: AnalysisConfig,

    /// Alternate spellings per canonical store name.
    ///
    /// Defaults to the venue spellings of the competitor rankings sheet.
    #[serde(default = "AliasTable::venue_defaults")]
    pub aliases: AliasTable,

    /// Narrative LLM configuration.
    #[serde(default)]
    pub llm: LlmConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            data: DataConfig::default(),
            analysis: AnalysisConfig::default(),
            aliases: AliasTable::venue_defaults(),
            llm: LlmConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML content.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML content is malformed or validation fails.
    #[allow(clippy::result_large_err)]
    pub fn parse_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(ConfigError::Parse)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The file cannot be read
    /// - The TOML content is malformed
    /// - Validation fails
    #[allow(clippy::result_large_err)]
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::ReadFile)?;
        Self::parse_toml(&content)
    }

    /// Load from `path` when it exists, defaults otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if an existing file fails to parse or validate.
    #[allow(clippy::result_large_err)]
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] describing the first invalid value.
    #[allow(clippy::result_large_err)]
    pub fn validate(&self) -> Result<()> {
        self.analysis.validate()?;
        self.llm.validate()?;
        if self.data.dir.as_os_str().is_empty() {
            return Err(ConfigError::MissingField { field: "data.dir" }.into());
        }
        if !matches!(self.logging.format.as_str(), "pretty" | "json") {
            return Err(ConfigError::InvalidValue {
                field: "logging.format",
                reason: "must be \"pretty\" or \"json\"".to_string(),
            }
            .into());
        }
        Ok(())
    }

    /// Store-name matcher built from the alias table and analysis settings.
    #[must_use]
    pub fn matcher(&self) -> NameMatcher {
        NameMatcher::new(self.aliases.clone())
            .with_containment_fallback(self.analysis.containment_fallback)
    }

    /// Initialize logging with the configured settings.
    pub fn init_logging(&self) {
        self.logging.init();
    }
}
