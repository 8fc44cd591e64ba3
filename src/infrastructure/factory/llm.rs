//! LLM client and insight service factory.

use std::sync::Arc;

use tracing::{info, warn};

use crate::adapter::outbound::llm::gemini::{Gemini, API_KEY_ENV};
use crate::application::insight::narrator::LlmNarrator;
use crate::application::insight::service::InsightService;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::llm::Llm;

/// Build LLM client from configuration.
///
/// Returns `None` if the LLM is disabled or the API key is missing.
pub fn build_llm_client(config: &Config) -> Option<Arc<dyn Llm>> {
    if !config.llm.enabled {
        return None;
    }

    let client = match Gemini::from_env(&config.llm) {
        Ok(client) => client,
        Err(_) => {
            warn!("{API_KEY_ENV} not set, using local summaries");
            return None;
        }
    };

    info!(provider = client.name(), models = ?client.models(), "LLM client initialized");
    Some(Arc::new(client))
}

/// Build the insight service, LLM-backed when a client is available.
pub fn build_insight_service(config: &Config, local_only: bool) -> InsightService {
    if local_only {
        return InsightService::local_only();
    }
    match build_llm_client(config) {
        Some(llm) => InsightService::new(Arc::new(LlmNarrator::new(llm))),
        None => InsightService::local_only(),
    }
}
