//! Dataset source reading JSON exports from a directory.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use tracing::{info, warn};

use super::dto::{CompetitorFile, InventoryRow, RosterRow, Table, TransactionRow};
use crate::domain::store::{build_roster, RosterEntry};
use crate::error::{DataError, Result};
use crate::port::outbound::dataset::{Dataset, DatasetSource};

/// File names inside the data directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    pub transactions: String,
    pub inventory: String,
    pub roster: String,
    pub competitors: String,
}

impl Default for DatasetFiles {
    fn default() -> Self {
        Self {
            transactions: "item_season_data.json".into(),
            inventory: "store_inventory_data.json".into(),
            roster: "store_data.json".into(),
            competitors: "competitor_data_v2.json".into(),
        }
    }
}

/// Reads the four collections from JSON files.
///
/// The roster and transaction files are required. A missing inventory or
/// competitor file loads as empty with a warning.
#[derive(Debug, Clone)]
pub struct JsonDataset {
    dir: PathBuf,
    files: DatasetFiles,
}

impl JsonDataset {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>, files: DatasetFiles) -> Self {
        Self {
            dir: dir.into(),
            files,
        }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    fn read<T: DeserializeOwned>(&self, file: &str) -> Result<T> {
        let path = self.path(file);
        let content = fs::read_to_string(&path).map_err(|source| DataError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let parsed = serde_json::from_str(&content).map_err(|source| DataError::Parse {
            path: path.display().to_string(),
            source,
        })?;
        Ok(parsed)
    }

    /// Like [`read`](Self::read), but a missing file yields `None`.
    fn read_optional<T: DeserializeOwned>(&self, file: &str) -> Result<Option<T>> {
        match fs::metadata(self.path(file)) {
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!(file, dir = %self.dir.display(), "optional dataset missing, using empty");
                Ok(None)
            }
            _ => self.read(file).map(Some),
        }
    }
}

impl DatasetSource for JsonDataset {
    fn describe(&self) -> String {
        format!("json dataset at {}", self.dir.display())
    }

    fn load(&self) -> Result<Dataset> {
        let roster: Table<RosterRow> = self.read(&self.files.roster)?;
        let stores = build_roster(roster.data.into_iter().map(RosterEntry::from).collect());

        let transactions: Table<TransactionRow> = self.read(&self.files.transactions)?;
        let transactions: Vec<_> = transactions.data.into_iter().map(Into::into).collect();

        let inventory = self
            .read_optional::<Table<InventoryRow>>(&self.files.inventory)?
            .map(|t| t.data.into_iter().map(Into::into).collect())
            .unwrap_or_default();

        let competitors = self
            .read_optional::<CompetitorFile>(&self.files.competitors)?
            .unwrap_or_default()
            .into_records();

        let dataset = Dataset {
            stores,
            transactions,
            inventory,
            competitors,
        };
        info!(
            dir = %self.dir.display(),
            stores = dataset.stores.len(),
            transactions = dataset.transactions.len(),
            inventory = dataset.inventory.len(),
            competitors = dataset.competitors.len(),
            "dataset loaded"
        );
        Ok(dataset)
    }
}
