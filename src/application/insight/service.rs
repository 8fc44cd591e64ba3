//! Insight coordinator.
//!
//! Renders through the primary renderer and falls back to the local
//! summarizer on any failure, including a panic in the render task. Requests are keyed by store and a per-store
//! generation counter: a newer request for the same store aborts the one in
//! flight, and the older caller receives [`InsightOutcome::Superseded`].

use std::sync::Arc;

use dashmap::DashMap;
use serde::Serialize;
use tokio::task::AbortHandle;
use tracing::{info, warn};

use super::local::LocalSummarizer;
use crate::domain::id::StoreId;
use crate::port::outbound::narrative::{InsightPayload, NarrativeRenderer};

/// Result of an insight request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum InsightOutcome {
    Rendered {
        text: String,
        /// Name of the renderer that produced the text.
        renderer: String,
    },
    /// A newer request for the same store replaced this one.
    Superseded { generation: u64 },
}

impl InsightOutcome {
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Rendered { text, .. } => Some(text),
            Self::Superseded { .. } => None,
        }
    }
}

#[derive(Debug, Default)]
struct Inflight {
    generation: u64,
    abort: Option<AbortHandle>,
}

/// Coordinates narrative rendering per store.
pub struct InsightService {
    primary: Option<Arc<dyn NarrativeRenderer>>,
    fallback: LocalSummarizer,
    inflight: DashMap<StoreId, Inflight>,
}

impl InsightService {
    /// Service that tries `primary` first.
    pub fn new(primary: Arc<dyn NarrativeRenderer>) -> Self {
        Self {
            primary: Some(primary),
            fallback: LocalSummarizer::new(),
            inflight: DashMap::new(),
        }
    }

    /// Service that only uses the local summarizer.
    #[must_use]
    pub fn local_only() -> Self {
        Self {
            primary: None,
            fallback: LocalSummarizer::new(),
            inflight: DashMap::new(),
        }
    }

    /// Name of the renderer tried first.
    #[must_use]
    pub fn primary_name(&self) -> &'static str {
        self.primary
            .as_ref()
            .map_or(self.fallback.name(), |p| p.name())
    }

    /// Latest generation issued for a store, 0 when none.
    #[must_use]
    pub fn generation(&self, store: &StoreId) -> u64 {
        self.inflight.get(store).map_or(0, |e| e.generation)
    }

    fn begin(&self, store: &StoreId) -> u64 {
        let mut entry = self.inflight.entry(store.clone()).or_default();
        entry.generation += 1;
        if let Some(previous) = entry.abort.take() {
            previous.abort();
        }
        entry.generation
    }

    fn is_current(&self, store: &StoreId, generation: u64) -> bool {
        self.generation(store) == generation
    }

    /// Render an insight, superseding any request in flight for the store.
    pub async fn request(&self, payload: InsightPayload) -> InsightOutcome {
        let store = payload.store_id.clone();
        let generation = self.begin(&store);

        let primary = self.primary.clone();
        let fallback = self.fallback;
        let summary = self.fallback.summarize(&payload);
        let task = tokio::spawn(async move { render(primary, fallback, payload).await });

        if let Some(mut entry) = self.inflight.get_mut(&store) {
            if entry.generation == generation {
                entry.abort = Some(task.abort_handle());
            } else {
                task.abort();
            }
        }

        let result = task.await;
        if !self.is_current(&store, generation) {
            info!(store = %store, generation, "insight request superseded");
            return InsightOutcome::Superseded { generation };
        }
        if let Some(mut entry) = self.inflight.get_mut(&store) {
            entry.abort = None;
        }

        match result {
            Ok((text, renderer)) => InsightOutcome::Rendered {
                text,
                renderer: renderer.to_string(),
            },
            Err(e) if e.is_cancelled() => InsightOutcome::Superseded { generation },
            Err(e) => {
                warn!(store = %store, error = %e, "insight task failed, using local summary");
                InsightOutcome::Rendered {
                    text: summary,
                    renderer: self.fallback.name().to_string(),
                }
            }
        }
    }
}

async fn render(
    primary: Option<Arc<dyn NarrativeRenderer>>,
    fallback: LocalSummarizer,
    payload: InsightPayload,
) -> (String, &'static str) {
    if let Some(primary) = primary {
        match primary.render(&payload).await {
            Ok(text) if !text.trim().is_empty() => {
                info!(store = %payload.store_name, renderer = primary.name(), "insight rendered");
                return (text, primary.name());
            }
            Ok(_) => warn!(renderer = primary.name(), "renderer returned empty text, using local summary"),
            Err(e) => warn!(renderer = primary.name(), error = %e, "renderer failed, using local summary"),
        }
    }
    (fallback.summarize(&payload), fallback.name())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use async_trait::async_trait;

    use super::*;
    use crate::adapter::outbound::llm::mock::MockLlm;
    use crate::application::insight::local::NO_COMPARISON_MESSAGE;
    use crate::application::insight::narrator::LlmNarrator;
    use crate::domain::metrics::ComparisonOutcome;
    use crate::domain::peer::PeerOutcome;
    use crate::domain::period::Period;
    use crate::error::Result;

    struct PanickingRenderer;

    #[async_trait]
    impl NarrativeRenderer for PanickingRenderer {
        fn name(&self) -> &'static str {
            "panicking"
        }

        async fn render(&self, _payload: &InsightPayload) -> Result<String> {
            panic!("renderer crashed")
        }
    }

    fn payload(store: &str) -> InsightPayload {
        InsightPayload::new(
            store.into(),
            "롯데본점",
            Period::parse("202512").unwrap(),
            0,
            &PeerOutcome::NoBaseline,
            ComparisonOutcome::NoComparison,
        )
    }

    #[tokio::test]
    async fn local_only_renders_summary() {
        let service = InsightService::local_only();
        let outcome = service.request(payload("ST-001")).await;
        assert_eq!(outcome.text(), Some(NO_COMPARISON_MESSAGE));
        assert_eq!(service.primary_name(), "local");
    }

    #[tokio::test]
    async fn failing_primary_falls_back() {
        let narrator = LlmNarrator::new(Arc::new(MockLlm::failing()));
        let service = InsightService::new(Arc::new(narrator));
        let outcome = service.request(payload("ST-001")).await;
        assert_eq!(
            outcome,
            InsightOutcome::Rendered {
                text: NO_COMPARISON_MESSAGE.to_string(),
                renderer: "local".into(),
            }
        );
    }

    #[tokio::test]
    async fn panicking_primary_falls_back_to_local_summary() {
        let service = InsightService::new(Arc::new(PanickingRenderer));
        let outcome = service.request(payload("ST-001")).await;
        assert_eq!(
            outcome,
            InsightOutcome::Rendered {
                text: NO_COMPARISON_MESSAGE.to_string(),
                renderer: "local".into(),
            }
        );

        let again = service.request(payload("ST-001")).await;
        assert_eq!(again.text(), Some(NO_COMPARISON_MESSAGE));
        assert_eq!(service.generation(&"ST-001".into()), 2);
    }

    #[tokio::test]
    async fn primary_text_is_used() {
        let narrator = LlmNarrator::new(Arc::new(MockLlm::replying("【분석】")));
        let service = InsightService::new(Arc::new(narrator));
        let outcome = service.request(payload("ST-001")).await;
        assert_eq!(outcome.text(), Some("【분석】"));
        assert_eq!(service.generation(&"ST-001".into()), 1);
    }

    #[tokio::test]
    async fn newer_request_supersedes_older() {
        let llm = MockLlm::replying("【분석】").with_delay(Duration::from_millis(200));
        let service = Arc::new(InsightService::new(Arc::new(LlmNarrator::new(Arc::new(llm)))));

        let first = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.request(payload("ST-001")).await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = service.request(payload("ST-001")).await;

        assert_eq!(first.await.unwrap(), InsightOutcome::Superseded { generation: 1 });
        assert_eq!(second.text(), Some("【분석】"));
    }

    #[tokio::test]
    async fn different_stores_do_not_interfere() {
        let llm = MockLlm::replying("ok").with_delay(Duration::from_millis(50));
        let service = Arc::new(InsightService::new(Arc::new(LlmNarrator::new(Arc::new(llm)))));

        let a = {
            let service = Arc::clone(&service);
            tokio::spawn(async move { service.request(payload("ST-001")).await })
        };
        let b = service.request(payload("ST-002")).await;

        assert_eq!(a.await.unwrap().text(), Some("ok"));
        assert_eq!(b.text(), Some("ok"));
    }
}
