//! Per-store record lookup.
//!
//! The analytics ask a [`SalesLedger`] for the records that belong to a
//! store. [`NameScan`] answers by running the name matcher over every record
//! on each call. The resolved catalog answers from an index built once at
//! ingestion.

use super::matcher::NameMatcher;
use super::record::{InventoryRecord, TransactionRecord};
use super::store::Store;

/// Source of the records belonging to a canonical store.
pub trait SalesLedger {
    /// Item/season sales rows for the store.
    fn transactions(&self, store: &Store) -> Vec<&TransactionRecord>;

    /// Inventory rows for the store.
    fn inventory(&self, store: &Store) -> Vec<&InventoryRecord>;
}

/// Ledger that re-matches raw names on every lookup.
#[derive(Debug, Clone, Copy)]
pub struct NameScan<'a> {
    matcher: &'a NameMatcher,
    transactions: &'a [TransactionRecord],
    inventory: &'a [InventoryRecord],
}

impl<'a> NameScan<'a> {
    #[must_use]
    pub fn new(
        matcher: &'a NameMatcher,
        transactions: &'a [TransactionRecord],
        inventory: &'a [InventoryRecord],
    ) -> Self {
        Self {
            matcher,
            transactions,
            inventory,
        }
    }
}

impl SalesLedger for NameScan<'_> {
    fn transactions(&self, store: &Store) -> Vec<&TransactionRecord> {
        self.transactions
            .iter()
            .filter(|r| self.matcher.matches(&r.store_name, &store.name))
            .collect()
    }

    fn inventory(&self, store: &Store) -> Vec<&InventoryRecord> {
        self.inventory
            .iter()
            .filter(|r| self.matcher.matches(&r.store_name, &store.name))
            .collect()
    }
}
