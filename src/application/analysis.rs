//! Per-store analysis use case.
//!
//! Ties the domain steps together for one target store: revenue, peer search,
//! comparison collection, derived metrics, competitor standing and the sales
//! profile.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::info;

use super::catalog::StoreCatalog;
use crate::domain::comparison::{collect, ComparisonResult};
use crate::domain::competitor::{competitor_standing, CompetitorStanding};
use crate::domain::ledger::SalesLedger;
use crate::domain::metrics::{derive, ComparisonOutcome, DEFAULT_LOW_INVENTORY_RATIO};
use crate::domain::peer::{find_peers, PeerCriteria, PeerOutcome, DEFAULT_MAX_PEERS, DEFAULT_TOLERANCE};
use crate::domain::period::Period;
use crate::domain::profile::{ProfileWindow, SalesProfile};
use crate::domain::revenue::store_revenue;
use crate::domain::store::Store;
use crate::error::{AnalysisError, Result};
use crate::port::outbound::narrative::InsightPayload;

/// Parameters shared by every analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSettings {
    pub reference_period: Period,
    pub tolerance: Decimal,
    pub max_peers: usize,
    pub low_inventory_ratio: Decimal,
    /// Brand whose competitor rank is reported.
    pub own_brand: String,
}

impl AnalysisSettings {
    /// Default parameters for a reference period.
    #[must_use]
    pub fn for_period(reference_period: Period) -> Self {
        Self {
            reference_period,
            tolerance: DEFAULT_TOLERANCE,
            max_peers: DEFAULT_MAX_PEERS,
            low_inventory_ratio: DEFAULT_LOW_INVENTORY_RATIO,
            own_brand: "MLB".into(),
        }
    }

    #[must_use]
    pub fn criteria(&self) -> PeerCriteria {
        PeerCriteria::new(self.reference_period)
            .with_tolerance(self.tolerance)
            .with_max_results(self.max_peers)
    }
}

/// A store with its reference-period revenue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreRevenue {
    pub store: Store,
    /// 만원.
    pub revenue: i64,
}

/// Full comparison for one store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreAnalysis {
    pub store: Store,
    pub period: Period,
    /// 만원.
    pub revenue: i64,
    pub peers: PeerOutcome,
    pub comparison: ComparisonResult,
    pub metrics: ComparisonOutcome,
    pub competitors: Option<CompetitorStanding>,
}

impl StoreAnalysis {
    /// Narrative payload for this analysis.
    #[must_use]
    pub fn payload(&self) -> InsightPayload {
        InsightPayload::new(
            self.store.id.clone(),
            self.store.name.clone(),
            self.period,
            self.revenue,
            &self.peers,
            self.metrics.clone(),
        )
        .with_competitors(self.competitors.clone())
    }
}

/// Runs analyses against a resolved catalog.
#[derive(Debug, Clone)]
pub struct AnalysisService {
    catalog: Arc<StoreCatalog>,
    settings: AnalysisSettings,
}

impl AnalysisService {
    #[must_use]
    pub fn new(catalog: Arc<StoreCatalog>, settings: AnalysisSettings) -> Self {
        Self { catalog, settings }
    }

    #[must_use]
    pub fn catalog(&self) -> &StoreCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn settings(&self) -> &AnalysisSettings {
        &self.settings
    }

    /// Look a store up by id or canonical name.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownStore`] when no roster store matches.
    pub fn store(&self, key: &str) -> Result<&Store> {
        self.catalog
            .find(key)
            .ok_or_else(|| AnalysisError::UnknownStore(key.trim().to_string()).into())
    }

    /// Every roster store with its reference-period revenue.
    #[must_use]
    pub fn revenues(&self) -> Vec<StoreRevenue> {
        let period = self.settings.reference_period;
        self.catalog
            .stores()
            .iter()
            .map(|store| StoreRevenue {
                store: store.clone(),
                revenue: store_revenue(self.catalog.as_ref(), store, period),
            })
            .collect()
    }

    /// Peer search for one store.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownStore`] for an unknown key.
    pub fn peers(&self, key: &str) -> Result<(Store, PeerOutcome)> {
        let store = self.store(key)?;
        let outcome = find_peers(
            store,
            self.catalog.stores(),
            self.catalog.as_ref(),
            &self.settings.criteria(),
        );
        Ok((store.clone(), outcome))
    }

    /// Full comparison for one store.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownStore`] for an unknown key.
    pub fn analyze(&self, key: &str) -> Result<StoreAnalysis> {
        let (store, peers) = self.peers(key)?;
        let period = self.settings.reference_period;
        let ledger: &dyn SalesLedger = self.catalog.as_ref();

        let comparison = collect(&store, peers.stores(), ledger, period);
        let metrics = derive(&comparison, self.settings.low_inventory_ratio);
        let competitors = competitor_standing(
            &store.name,
            self.catalog.competitors(),
            self.catalog.matcher(),
            &self.settings.own_brand,
        );

        info!(
            store = %store.name,
            period = %period,
            revenue = comparison.target.revenue,
            peers = comparison.peers.len(),
            "analysis complete"
        );

        Ok(StoreAnalysis {
            revenue: comparison.target.revenue,
            store,
            period,
            peers,
            comparison,
            metrics,
            competitors,
        })
    }

    /// Year-over-year profile, by default over the months before the
    /// reference period.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownStore`] for an unknown key, or a
    /// domain error when the reference period has no earlier month.
    pub fn profile(&self, key: &str, window: Option<ProfileWindow>) -> Result<(Store, SalesProfile)> {
        let store = self.store(key)?;
        let window = match window {
            Some(window) => window,
            None => ProfileWindow::before(self.settings.reference_period)?,
        };
        let records = self.catalog.transactions(store);
        Ok((store.clone(), SalesProfile::build(records, window)))
    }

    /// Analysis plus profile, packaged for a narrative renderer.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::UnknownStore`] for an unknown key.
    pub fn insight_payload(&self, key: &str) -> Result<InsightPayload> {
        let analysis = self.analyze(key)?;
        let (_, profile) = self.profile(key, None)?;
        Ok(analysis.payload().with_profile(profile))
    }
}
