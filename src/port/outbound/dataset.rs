//! Dataset port: where the raw store collections come from.

use crate::domain::record::{CompetitorRecord, InventoryRecord, TransactionRecord};
use crate::domain::store::Store;
use crate::error::Result;

/// The four source collections, not yet resolved against each other.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    /// Canonical stores, ids already assigned.
    pub stores: Vec<Store>,
    pub transactions: Vec<TransactionRecord>,
    pub inventory: Vec<InventoryRecord>,
    pub competitors: Vec<CompetitorRecord>,
}

/// Loads a [`Dataset`].
///
/// Implementations tolerate missing fields by defaulting them; only I/O and
/// malformed documents are errors.
pub trait DatasetSource: Send + Sync {
    /// Return a human-readable description for logs.
    fn describe(&self) -> String;

    /// Load every collection.
    ///
    /// # Errors
    ///
    /// Returns an error if a required collection cannot be read or parsed.
    fn load(&self) -> Result<Dataset>;
}

/// A dataset already held in memory.
impl DatasetSource for Dataset {
    fn describe(&self) -> String {
        format!("in-memory dataset ({} stores)", self.stores.len())
    }

    fn load(&self) -> Result<Dataset> {
        Ok(self.clone())
    }
}
