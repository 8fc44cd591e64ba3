//! LLM completion port for narrative adapters.
//!
//! Defines a generic interface for large language model completion requests.
//! Used by the LLM-backed insight narrator.

use async_trait::async_trait;

use crate::error::Result;

/// Client for large language model text completion.
///
/// Implementations wrap a specific provider and handle authentication,
/// model fallback, and response parsing.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`) so one client can be
/// shared across concurrent insight requests.
///
/// # Errors
///
/// The [`complete`](Self::complete) method returns an error for API failures,
/// rate limits, or responses without text.
#[async_trait]
pub trait Llm: Send + Sync {
    /// Return the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a completion request and return the generated text.
    ///
    /// # Errors
    ///
    /// Returns an error if every configured model fails or answers with
    /// empty text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
