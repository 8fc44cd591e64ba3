//! Narrative port: turns a comparison payload into prose.
//!
//! # Overview
//!
//! - [`InsightPayload`]: plain data handed across the boundary
//! - [`NarrativeRenderer`]: anything that can write the narrative
//!
//! Section markers and wording are renderer conventions. The payload carries
//! numbers only.

use async_trait::async_trait;
use serde::Serialize;

use crate::domain::competitor::CompetitorStanding;
use crate::domain::id::StoreId;
use crate::domain::metrics::ComparisonOutcome;
use crate::domain::peer::PeerOutcome;
use crate::domain::period::Period;
use crate::domain::profile::SalesProfile;
use crate::error::Result;

/// A peer as listed in the narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerLine {
    pub name: String,
    /// Period revenue in 만원.
    pub revenue: i64,
}

/// Everything a renderer may say about one store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsightPayload {
    pub store_id: StoreId,
    pub store_name: String,
    pub period: Period,
    /// Reference-period revenue in 만원.
    pub revenue: i64,
    pub peers: Vec<PeerLine>,
    pub comparison: ComparisonOutcome,
    pub profile: Option<SalesProfile>,
    pub competitors: Option<CompetitorStanding>,
}

impl InsightPayload {
    /// Assemble a payload from analysis outputs.
    #[must_use]
    pub fn new(
        store_id: StoreId,
        store_name: impl Into<String>,
        period: Period,
        revenue: i64,
        peers: &PeerOutcome,
        comparison: ComparisonOutcome,
    ) -> Self {
        let peers = peers
            .peer_set()
            .map(|set| {
                set.peers
                    .iter()
                    .map(|p| PeerLine {
                        name: p.store.name.clone(),
                        revenue: p.revenue,
                    })
                    .collect()
            })
            .unwrap_or_default();

        Self {
            store_id,
            store_name: store_name.into(),
            period,
            revenue,
            peers,
            comparison,
            profile: None,
            competitors: None,
        }
    }

    #[must_use]
    pub fn with_profile(mut self, profile: SalesProfile) -> Self {
        self.profile = Some(profile);
        self
    }

    #[must_use]
    pub fn with_competitors(mut self, standing: Option<CompetitorStanding>) -> Self {
        self.competitors = standing;
        self
    }

    /// Whether any peer was found to compare against.
    #[must_use]
    pub fn has_comparison(&self) -> bool {
        self.comparison.metrics().is_some()
    }
}

/// Writes a narrative insight from a payload.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (`Send + Sync`); one renderer serves
/// every store.
#[async_trait]
pub trait NarrativeRenderer: Send + Sync {
    /// Return the renderer name for logging and output.
    fn name(&self) -> &'static str;

    /// Render the narrative.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend fails. Callers fall back to a local
    /// renderer.
    async fn render(&self, payload: &InsightPayload) -> Result<String>;
}
