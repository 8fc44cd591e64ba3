//! Dataset location configuration.

use std::path::PathBuf;

use serde::Deserialize;

use crate::adapter::outbound::dataset::json::DatasetFiles;

/// Where the JSON exports live.
#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    /// Directory holding the exports. Relative paths resolve against the
    /// working directory. Defaults to `data`.
    #[serde(default = "default_dir")]
    pub dir: PathBuf,

    #[serde(default = "default_transactions")]
    pub transactions_file: String,

    #[serde(default = "default_inventory")]
    pub inventory_file: String,

    #[serde(default = "default_roster")]
    pub roster_file: String,

    #[serde(default = "default_competitors")]
    pub competitors_file: String,
}

fn default_dir() -> PathBuf {
    PathBuf::from("data")
}

fn default_transactions() -> String {
    DatasetFiles::default().transactions
}

fn default_inventory() -> String {
    DatasetFiles::default().inventory
}

fn default_roster() -> String {
    DatasetFiles::default().roster
}

fn default_competitors() -> String {
    DatasetFiles::default().competitors
}

impl Default for DataConfig {
    fn default() -> Self {
        Self {
            dir: default_dir(),
            transactions_file: default_transactions(),
            inventory_file: default_inventory(),
            roster_file: default_roster(),
            competitors_file: default_competitors(),
        }
    }
}

impl DataConfig {
    #[must_use]
    pub fn files(&self) -> DatasetFiles {
        DatasetFiles {
            transactions: self.transactions_file.clone(),
            inventory: self.inventory_file.clone(),
            roster: self.roster_file.clone(),
            competitors: self.competitors_file.clone(),
        }
    }
}
