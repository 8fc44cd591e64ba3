//! Raw comparison data for a target store and its peers.
//!
//! The collector only gathers per-store snapshots. Averages, deltas and
//! flags are derived from the result in [`super::metrics`].

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::aggregate::{aggregate, by_item, by_season, total};
use super::id::StoreId;
use super::ledger::SalesLedger;
use super::money::Won;
use super::period::Period;
use super::record::InventoryRecord;
use super::revenue::period_revenue;
use super::store::Store;

/// Stock on hand for a store.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct InventorySummary {
    pub total_quantity: Decimal,
    /// Total retail (tag) value in won.
    pub total_value: Won,
    /// Retail value by season label.
    pub by_season: BTreeMap<String, Won>,
}

impl InventorySummary {
    pub fn from_records<'a, I>(records: I) -> Self
    where
        I: IntoIterator<Item = &'a InventoryRecord>,
        I::IntoIter: Clone,
    {
        let records = records.into_iter();
        Self {
            total_quantity: total(records.clone(), |r: &InventoryRecord| r.quantity),
            total_value: total(records.clone(), |r: &InventoryRecord| r.retail_value),
            by_season: aggregate(records, InventoryRecord::season_key, |r| r.retail_value),
        }
    }

    /// Retail value for a season, zero when the store holds none.
    #[must_use]
    pub fn season_value(&self, season: &str) -> Won {
        self.by_season.get(season).copied().unwrap_or_default()
    }
}

/// Everything collected for one store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSnapshot {
    pub store_id: StoreId,
    pub name: String,
    /// Period revenue in 만원.
    pub revenue: i64,
    /// Period sales by item code, in won.
    pub item_sales: BTreeMap<String, Won>,
    /// Period sales by season label, in won.
    pub season_sales: BTreeMap<String, Won>,
    pub inventory: InventorySummary,
}

impl StoreSnapshot {
    /// Snapshot a store's period sales and current inventory.
    pub fn capture<L>(store: &Store, ledger: &L, period: Period) -> Self
    where
        L: SalesLedger + ?Sized,
    {
        let transactions = ledger.transactions(store);
        let inventory = ledger.inventory(store);
        Self {
            store_id: store.id.clone(),
            name: store.name.clone(),
            revenue: period_revenue(transactions.iter().copied(), period),
            item_sales: by_item(transactions.iter().copied(), period),
            season_sales: by_season(transactions.iter().copied(), period),
            inventory: InventorySummary::from_records(inventory.iter().copied()),
        }
    }

    /// Period sales for an item, zero when absent.
    #[must_use]
    pub fn item_value(&self, item: &str) -> Won {
        self.item_sales.get(item).copied().unwrap_or_default()
    }
}

/// Whether a comparison has anything to compare against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonStatus {
    NoPeers,
    Compared { peer_count: usize },
}

/// Target and peer snapshots for one period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonResult {
    pub period: Period,
    pub target: StoreSnapshot,
    pub peers: Vec<StoreSnapshot>,
}

impl ComparisonResult {
    /// `NoPeers` is distinct from a comparison against identical peers.
    #[must_use]
    pub fn status(&self) -> ComparisonStatus {
        if self.peers.is_empty() {
            ComparisonStatus::NoPeers
        } else {
            ComparisonStatus::Compared {
                peer_count: self.peers.len(),
            }
        }
    }
}

/// Collect snapshots for `target` and each of `peers`.
pub fn collect<'s, L, P>(target: &Store, peers: P, ledger: &L, period: Period) -> ComparisonResult
where
    L: SalesLedger + ?Sized,
    P: IntoIterator<Item = &'s Store>,
{
    let target_snapshot = StoreSnapshot::capture(target, ledger, period);
    let peers: Vec<StoreSnapshot> = peers
        .into_iter()
        .map(|peer| StoreSnapshot::capture(peer, ledger, period))
        .collect();

    debug!(
        store = %target.name,
        period = %period,
        peers = peers.len(),
        items = target_snapshot.item_sales.len(),
        "collected comparison"
    );

    ComparisonResult {
        period,
        target: target_snapshot,
        peers,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ledger::NameScan;
    use crate::domain::matcher::NameMatcher;
    use crate::domain::record::TransactionRecord;
    use rust_decimal_macros::dec;

    fn period() -> Period {
        Period::parse("202512").unwrap()
    }

    fn sale(store: &str, item: &str, season: &str, amount: Decimal) -> TransactionRecord {
        TransactionRecord {
            store_name: store.into(),
            item: item.into(),
            season: season.into(),
            periods: [(period(), amount)].into_iter().collect(),
            ..Default::default()
        }
    }

    fn stock(store: &str, season: &str, quantity: Decimal, value: Decimal) -> InventoryRecord {
        InventoryRecord {
            store_name: store.into(),
            season: season.into(),
            quantity,
            retail_value: value,
            ..Default::default()
        }
    }

    #[test]
    fn inventory_summary_totals_and_seasons() {
        let rows = vec![
            stock("A", "25F", dec!(3), dec!(300)),
            stock("A", "25F", dec!(2), dec!(200)),
            stock("A", "", dec!(1), dec!(50)),
        ];
        let summary = InventorySummary::from_records(&rows);
        assert_eq!(summary.total_quantity, dec!(6));
        assert_eq!(summary.total_value, dec!(550));
        assert_eq!(summary.season_value("25F"), dec!(500));
        assert_eq!(summary.season_value("기타"), dec!(50));
        assert_eq!(summary.season_value("24S"), Decimal::ZERO);
    }

    #[test]
    fn collects_target_and_peer_snapshots() {
        let sales = vec![
            sale("A", "TS", "25F", dec!(10_000_000)),
            sale("29CM(A)", "PT", "25F", dec!(2_000_000)),
            sale("B", "TS", "25S", dec!(11_000_000)),
        ];
        let inventory = vec![stock("B", "25S", dec!(4), dec!(400_000))];
        let matcher = NameMatcher::default();
        let ledger = NameScan::new(&matcher, &sales, &inventory);
        let a = Store::new("ST-001", "A");
        let b = Store::new("ST-002", "B");

        let result = collect(&a, [&b], &ledger, period());
        assert_eq!(result.target.revenue, 1200);
        assert_eq!(result.target.item_value("TS"), dec!(10_000_000));
        assert_eq!(result.target.item_value("PT"), dec!(2_000_000));
        assert_eq!(result.target.inventory, InventorySummary::default());
        assert_eq!(result.peers.len(), 1);
        assert_eq!(result.peers[0].revenue, 1100);
        assert_eq!(result.peers[0].inventory.total_value, dec!(400_000));
        assert_eq!(result.status(), ComparisonStatus::Compared { peer_count: 1 });
    }

    #[test]
    fn empty_peers_is_no_peers() {
        let matcher = NameMatcher::default();
        let ledger = NameScan::new(&matcher, &[], &[]);
        let a = Store::new("ST-001", "A");
        let result = collect(&a, std::iter::empty(), &ledger, period());
        assert_eq!(result.status(), ComparisonStatus::NoPeers);
    }
}
