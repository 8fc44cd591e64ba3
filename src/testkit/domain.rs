//! Builders for domain records used across tests.
//!
//! Amounts are whole won. Periods are `YYYYMM` tokens and panic when
//! malformed, which is what a test wants.

use rust_decimal::Decimal;

use crate::application::catalog::StoreCatalog;
use crate::domain::matcher::NameMatcher;
use crate::domain::period::Period;
use crate::domain::record::{CompetitorRecord, InventoryRecord, TransactionRecord};
use crate::domain::store::Store;
use crate::port::outbound::dataset::Dataset;

/// Parse a `YYYYMM` token.
pub fn period(token: &str) -> Period {
    Period::parse(token).unwrap_or_else(|e| panic!("bad test period {token}: {e}"))
}

/// Stores `ST-001`.. named after `names`, in the given order.
pub fn stores(names: &[&str]) -> Vec<Store> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| Store::new(format!("ST-{:03}", i + 1), *name))
        .collect()
}

/// A transaction row with one period amount, which also counts as the
/// cumulative sales amount.
pub fn sale(store: &str, item: &str, season: &str, token: &str, amount: Decimal) -> TransactionRecord {
    TransactionRecord {
        store_name: store.into(),
        item: item.into(),
        season: season.into(),
        sales_amount: amount,
        periods: [(period(token), amount)].into_iter().collect(),
        ..Default::default()
    }
}

/// An inventory row.
pub fn stock(store: &str, season: &str, quantity: Decimal, retail_value: Decimal) -> InventoryRecord {
    InventoryRecord {
        store_name: store.into(),
        season: season.into(),
        quantity,
        retail_value,
        ..Default::default()
    }
}

/// A competitor venue row.
pub fn venue(name: &str, brands: &[(&str, Decimal)]) -> CompetitorRecord {
    CompetitorRecord {
        venue: name.into(),
        brand_averages: brands.iter().map(|(b, v)| ((*b).to_string(), *v)).collect(),
    }
}

/// Accumulates records into a [`Dataset`].
#[derive(Debug, Clone, Default)]
pub struct DatasetBuilder {
    dataset: Dataset,
}

impl DatasetBuilder {
    pub fn new(store_names: &[&str]) -> Self {
        Self {
            dataset: Dataset {
                stores: stores(store_names),
                ..Default::default()
            },
        }
    }

    #[must_use]
    pub fn sale(mut self, store: &str, item: &str, season: &str, token: &str, amount: Decimal) -> Self {
        self.dataset.transactions.push(sale(store, item, season, token, amount));
        self
    }

    #[must_use]
    pub fn transaction(mut self, record: TransactionRecord) -> Self {
        self.dataset.transactions.push(record);
        self
    }

    #[must_use]
    pub fn stock(mut self, store: &str, season: &str, quantity: Decimal, value: Decimal) -> Self {
        self.dataset.inventory.push(stock(store, season, quantity, value));
        self
    }

    #[must_use]
    pub fn venue(mut self, name: &str, brands: &[(&str, Decimal)]) -> Self {
        self.dataset.competitors.push(venue(name, brands));
        self
    }

    pub fn build(self) -> Dataset {
        self.dataset
    }

    /// Resolve into a catalog with the default matcher.
    pub fn catalog(self) -> StoreCatalog {
        StoreCatalog::resolve(self.dataset, NameMatcher::default())
    }
}
