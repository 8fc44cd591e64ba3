//! Metrics derived from a [`ComparisonResult`].
//!
//! Peer averages for items and seasons count only the peers that have a
//! non-zero entry; a peer without the item is not a zero data point.

use std::cmp::Reverse;

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use super::aggregate::{average, percent_of, present_mean};
use super::comparison::{ComparisonResult, ComparisonStatus, StoreSnapshot};
use super::money::{round_percent, Won};

/// Default low-inventory threshold as a fraction of the peer average.
pub const DEFAULT_LOW_INVENTORY_RATIO: Decimal = dec!(0.5);

/// Number of seasons scoped into the inventory comparison.
pub const TOP_SEASON_COUNT: usize = 3;

/// Number of items listed as strengths or weaknesses.
pub const HIGHLIGHT_COUNT: usize = 3;

/// Target sales for one item against the present-only peer average.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ItemDelta {
    pub item: String,
    pub target: Won,
    pub peer_average: Won,
    pub delta: Won,
    /// `delta / peer_average × 100` to one decimal, 0 without an average.
    pub delta_percent: Decimal,
}

/// A season ranked by target period sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonSales {
    pub season: String,
    pub sales: Won,
}

/// Inventory value for one of the target's top seasons.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeasonInventory {
    pub season: String,
    pub target_value: Won,
    pub peer_average: Won,
    /// Target stock is below the threshold share of a positive peer average.
    pub low: bool,
}

impl SeasonInventory {
    /// Target value as a whole percentage of the peer average.
    #[must_use]
    pub fn share_percent(&self) -> Decimal {
        percent_of(self.target_value, self.peer_average)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Total inventory against the mean over all peers.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InventoryDelta {
    pub target_quantity: Decimal,
    pub peer_average_quantity: Decimal,
    pub target_value: Won,
    pub peer_average_value: Won,
    pub quantity_delta: Decimal,
    /// Quantity delta percent to one decimal, 0 without an average.
    pub quantity_delta_percent: Decimal,
}

/// Everything derived from a comparison with at least one peer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonMetrics {
    pub peer_count: usize,
    /// One entry per target item, highest target sales first.
    pub item_deltas: Vec<ItemDelta>,
    pub top_seasons: Vec<SeasonSales>,
    pub season_inventory: Vec<SeasonInventory>,
    pub inventory: InventoryDelta,
    pub best_items: Vec<ItemDelta>,
    pub worst_items: Vec<ItemDelta>,
}

impl ComparisonMetrics {
    /// Top seasons whose stock is flagged low.
    pub fn low_inventory_seasons(&self) -> impl Iterator<Item = &SeasonInventory> {
        self.season_inventory.iter().filter(|s| s.low)
    }
}

/// Derived metrics, or the explicit absence of a comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ComparisonOutcome {
    /// No peers were found, so no averages exist.
    NoComparison,
    Compared(Box<ComparisonMetrics>),
}

impl ComparisonOutcome {
    #[must_use]
    pub fn metrics(&self) -> Option<&ComparisonMetrics> {
        match self {
            Self::NoComparison => None,
            Self::Compared(metrics) => Some(&**metrics),
        }
    }
}

/// Mean of a peer value over the peers that have it.
fn peer_present_mean<F>(result: &ComparisonResult, value: F) -> Won
where
    F: Fn(&StoreSnapshot) -> Won,
{
    present_mean(result.peers.iter().map(value))
}

/// Per-item deltas ordered by target sales, highest first.
#[must_use]
pub fn item_deltas(result: &ComparisonResult) -> Vec<ItemDelta> {
    let mut deltas: Vec<ItemDelta> = result
        .target
        .item_sales
        .iter()
        .map(|(item, target)| {
            let peer_average = peer_present_mean(result, |peer| peer.item_value(item));
            let delta = *target - peer_average;
            ItemDelta {
                item: item.clone(),
                target: *target,
                peer_average,
                delta,
                delta_percent: round_percent(percent_of(delta, peer_average)),
            }
        })
        .collect();
    deltas.sort_by_key(|d| Reverse(d.target));
    deltas
}

/// The target's best-selling seasons in the period.
///
/// Seasons without positive sales are skipped. Ties keep season-label order.
#[must_use]
pub fn top_seasons(result: &ComparisonResult, count: usize) -> Vec<SeasonSales> {
    let mut seasons: Vec<SeasonSales> = result
        .target
        .season_sales
        .iter()
        .filter(|(_, sales)| **sales > Decimal::ZERO)
        .map(|(season, sales)| SeasonSales {
            season: season.clone(),
            sales: *sales,
        })
        .collect();
    seasons.sort_by_key(|s| Reverse(s.sales));
    seasons.truncate(count);
    seasons
}

/// Whether `target` is strictly below `ratio` of a positive `peer_average`.
#[must_use]
pub fn is_low_inventory(target: Won, peer_average: Won, ratio: Decimal) -> bool {
    peer_average > Decimal::ZERO && target < peer_average * ratio
}

fn season_inventory(result: &ComparisonResult, seasons: &[SeasonSales], ratio: Decimal) -> Vec<SeasonInventory> {
    seasons
        .iter()
        .map(|s| {
            let target_value = result.target.inventory.season_value(&s.season);
            let peer_average =
                peer_present_mean(result, |peer| peer.inventory.season_value(&s.season));
            SeasonInventory {
                season: s.season.clone(),
                target_value,
                peer_average,
                low: is_low_inventory(target_value, peer_average, ratio),
            }
        })
        .collect()
}

fn inventory_delta(result: &ComparisonResult) -> InventoryDelta {
    let count = result.peers.len();
    let peer_average_quantity = average(
        result.peers.iter().map(|p| p.inventory.total_quantity).sum(),
        count,
    );
    let peer_average_value = average(
        result.peers.iter().map(|p| p.inventory.total_value).sum(),
        count,
    );
    let target_quantity = result.target.inventory.total_quantity;
    let quantity_delta = target_quantity - peer_average_quantity;

    InventoryDelta {
        target_quantity,
        peer_average_quantity,
        target_value: result.target.inventory.total_value,
        peer_average_value,
        quantity_delta,
        quantity_delta_percent: round_percent(percent_of(quantity_delta, peer_average_quantity)),
    }
}

/// Largest positive and negative deltas by absolute percent.
fn highlights(deltas: &[ItemDelta]) -> (Vec<ItemDelta>, Vec<ItemDelta>) {
    let mut ranked: Vec<&ItemDelta> = deltas.iter().collect();
    ranked.sort_by_key(|d| Reverse(d.delta_percent.abs()));

    let pick = |positive: bool| -> Vec<ItemDelta> {
        ranked
            .iter()
            .filter(|d| {
                if positive {
                    d.delta_percent > Decimal::ZERO
                } else {
                    d.delta_percent < Decimal::ZERO
                }
            })
            .take(HIGHLIGHT_COUNT)
            .map(|d| (*d).clone())
            .collect()
    };
    (pick(true), pick(false))
}

/// Derive comparison metrics with the given low-inventory ratio.
#[must_use]
pub fn derive(result: &ComparisonResult, low_inventory_ratio: Decimal) -> ComparisonOutcome {
    let ComparisonStatus::Compared { peer_count } = result.status() else {
        return ComparisonOutcome::NoComparison;
    };

    let item_deltas = item_deltas(result);
    let top_seasons = top_seasons(result, TOP_SEASON_COUNT);
    let season_inventory = season_inventory(result, &top_seasons, low_inventory_ratio);
    let (best_items, worst_items) = highlights(&item_deltas);

    ComparisonOutcome::Compared(Box::new(ComparisonMetrics {
        peer_count,
        inventory: inventory_delta(result),
        item_deltas,
        top_seasons,
        season_inventory,
        best_items,
        worst_items,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comparison::InventorySummary;
    use crate::domain::period::Period;
    use std::collections::BTreeMap;

    fn snapshot(name: &str, items: &[(&str, Decimal)]) -> StoreSnapshot {
        StoreSnapshot {
            store_id: name.into(),
            name: name.into(),
            revenue: 0,
            item_sales: items.iter().map(|(k, v)| ((*k).to_string(), *v)).collect(),
            season_sales: BTreeMap::new(),
            inventory: InventorySummary::default(),
        }
    }

    fn result(target: StoreSnapshot, peers: Vec<StoreSnapshot>) -> ComparisonResult {
        ComparisonResult {
            period: Period::parse("202512").unwrap(),
            target,
            peers,
        }
    }

    #[test]
    fn no_peers_is_no_comparison() {
        let r = result(snapshot("T", &[("TS", dec!(100))]), vec![]);
        assert_eq!(derive(&r, DEFAULT_LOW_INVENTORY_RATIO), ComparisonOutcome::NoComparison);
    }

    #[test]
    fn item_delta_percent_rounds_to_tenth() {
        let r = result(
            snapshot("T", &[("TS", dec!(100)), ("PT", dec!(50))]),
            vec![snapshot("P", &[("TS", dec!(300)), ("PT", dec!(40))])],
        );
        let deltas = item_deltas(&r);
        assert_eq!(deltas[0].item, "TS");
        assert_eq!(deltas[0].delta, dec!(-200));
        assert_eq!(deltas[0].delta_percent, dec!(-66.7));
        assert_eq!(deltas[1].delta_percent, dec!(25.0));
    }

    #[test]
    fn item_without_peer_data_has_zero_percent() {
        let r = result(
            snapshot("T", &[("CAP", dec!(100))]),
            vec![snapshot("P", &[("TS", dec!(300))])],
        );
        let deltas = item_deltas(&r);
        assert_eq!(deltas[0].peer_average, Decimal::ZERO);
        assert_eq!(deltas[0].delta_percent, Decimal::ZERO);
    }

    #[test]
    fn highlights_split_by_sign() {
        let r = result(
            snapshot(
                "T",
                &[
                    ("A", dec!(200)),
                    ("B", dec!(50)),
                    ("C", dec!(110)),
                    ("D", dec!(100)),
                    ("E", dec!(10)),
                ],
            ),
            vec![snapshot(
                "P",
                &[
                    ("A", dec!(100)),
                    ("B", dec!(100)),
                    ("C", dec!(100)),
                    ("D", dec!(100)),
                    ("E", dec!(100)),
                ],
            )],
        );
        let ComparisonOutcome::Compared(metrics) = derive(&r, DEFAULT_LOW_INVENTORY_RATIO) else {
            panic!("expected comparison");
        };
        let best: Vec<&str> = metrics.best_items.iter().map(|d| d.item.as_str()).collect();
        let worst: Vec<&str> = metrics.worst_items.iter().map(|d| d.item.as_str()).collect();
        assert_eq!(best, vec!["A", "C"]);
        assert_eq!(worst, vec!["E", "B"]);
    }

    #[test]
    fn inventory_delta_uses_all_peers() {
        let mut target = snapshot("T", &[]);
        target.inventory.total_quantity = dec!(150);
        let mut a = snapshot("A", &[]);
        a.inventory.total_quantity = dec!(200);
        let b = snapshot("B", &[]);

        let delta = inventory_delta(&result(target, vec![a, b]));
        assert_eq!(delta.peer_average_quantity, dec!(100));
        assert_eq!(delta.quantity_delta, dec!(50));
        assert_eq!(delta.quantity_delta_percent, dec!(50.0));
    }

    #[test]
    fn low_inventory_needs_positive_average() {
        assert!(!is_low_inventory(Decimal::ZERO, Decimal::ZERO, dec!(0.5)));
        assert!(is_low_inventory(dec!(49), dec!(100), dec!(0.5)));
        assert!(!is_low_inventory(dec!(50), dec!(100), dec!(0.5)));
    }
}
