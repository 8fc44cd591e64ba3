//! Peer search by reference-period revenue.
//!
//! A peer is any other store whose revenue falls inside the inclusive band
//! `[target × (1 - tolerance), target × (1 + tolerance)]`. The band is
//! computed in `Decimal` so the bounds are exact.

use std::collections::HashSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use tracing::debug;

use super::ledger::SalesLedger;
use super::period::Period;
use super::revenue::store_revenue;
use super::store::Store;

/// Default tolerance around the target revenue (±20%).
pub const DEFAULT_TOLERANCE: Decimal = dec!(0.2);

/// Default number of peers returned.
pub const DEFAULT_MAX_PEERS: usize = 5;

/// Parameters for a peer search.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeerCriteria {
    pub period: Period,
    /// Fraction of the target revenue, e.g. `0.2` for ±20%.
    pub tolerance: Decimal,
    pub max_results: usize,
}

impl PeerCriteria {
    /// Criteria with the default tolerance and cap.
    #[must_use]
    pub fn new(period: Period) -> Self {
        Self {
            period,
            tolerance: DEFAULT_TOLERANCE,
            max_results: DEFAULT_MAX_PEERS,
        }
    }

    #[must_use]
    pub fn with_tolerance(mut self, tolerance: Decimal) -> Self {
        self.tolerance = tolerance;
        self
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    /// Inclusive revenue band around `revenue`.
    #[must_use]
    pub fn band(&self, revenue: i64) -> (Decimal, Decimal) {
        let base = Decimal::from(revenue);
        (
            base * (Decimal::ONE - self.tolerance),
            base * (Decimal::ONE + self.tolerance),
        )
    }
}

/// A store kept by the peer search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerCandidate {
    pub store: Store,
    /// Period revenue in 만원.
    pub revenue: i64,
    /// `|revenue - target revenue|`.
    pub distance: i64,
}

/// Peers ranked closest first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeerSet {
    pub target_revenue: i64,
    pub peers: Vec<PeerCandidate>,
}

impl PeerSet {
    #[must_use]
    pub fn len(&self) -> usize {
        self.peers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peers.is_empty()
    }

    pub fn stores(&self) -> impl Iterator<Item = &Store> {
        self.peers.iter().map(|p| &p.store)
    }
}

/// Result of a peer search.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum PeerOutcome {
    /// The target had no revenue in the period; nothing to compare against.
    NoBaseline,
    Peers(PeerSet),
}

impl PeerOutcome {
    /// Peer stores, empty for [`PeerOutcome::NoBaseline`].
    #[must_use]
    pub fn stores(&self) -> Vec<&Store> {
        match self {
            Self::NoBaseline => Vec::new(),
            Self::Peers(set) => set.stores().collect(),
        }
    }

    #[must_use]
    pub fn peer_set(&self) -> Option<&PeerSet> {
        match self {
            Self::NoBaseline => None,
            Self::Peers(set) => Some(set),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.peer_set().map_or(true, PeerSet::is_empty)
    }
}

/// Find the stores whose period revenue is within tolerance of `target`.
///
/// The target itself and stores without revenue are never returned, and
/// each store id appears at most once. Ties in distance keep universe order.
pub fn find_peers<L>(target: &Store, universe: &[Store], ledger: &L, criteria: &PeerCriteria) -> PeerOutcome
where
    L: SalesLedger + ?Sized,
{
    let target_revenue = store_revenue(ledger, target, criteria.period);
    if target_revenue == 0 {
        debug!(store = %target.name, period = %criteria.period, "target has no revenue, skipping peer search");
        return PeerOutcome::NoBaseline;
    }

    let (lower, upper) = criteria.band(target_revenue);
    let mut seen = HashSet::new();
    let mut peers: Vec<PeerCandidate> = universe
        .iter()
        .filter(|store| store.id != target.id)
        .filter(|store| seen.insert(store.id.clone()))
        .filter_map(|store| {
            let revenue = store_revenue(ledger, store, criteria.period);
            let value = Decimal::from(revenue);
            // A store without revenue is never similar, even when the band reaches 0.
            (revenue > 0 && value >= lower && value <= upper).then(|| PeerCandidate {
                store: store.clone(),
                revenue,
                distance: (revenue - target_revenue).abs(),
            })
        })
        .collect();

    peers.sort_by_key(|p| p.distance);
    peers.truncate(criteria.max_results);

    debug!(
        store = %target.name,
        target_revenue,
        peers = peers.len(),
        "peer search complete"
    );

    PeerOutcome::Peers(PeerSet {
        target_revenue,
        peers,
    })
}
