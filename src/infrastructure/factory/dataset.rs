//! Dataset and analysis service factory.

use std::path::Path;
use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::dataset::json::JsonDataset;
use crate::application::analysis::AnalysisService;
use crate::application::catalog::StoreCatalog;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::port::outbound::dataset::DatasetSource;

/// JSON dataset source for the configured directory, or `dir` when given.
#[must_use]
pub fn build_dataset_source(config: &Config, dir: Option<&Path>) -> JsonDataset {
    let dir = dir.map_or_else(|| config.data.dir.clone(), Path::to_path_buf);
    JsonDataset::new(dir, config.data.files())
}

/// Load the dataset, resolve store names and wrap the analysis service.
///
/// # Errors
///
/// Returns an error if a required dataset file cannot be read or parsed, or
/// the analysis settings are invalid.
pub fn build_analysis_service(config: &Config, dir: Option<&Path>) -> Result<AnalysisService> {
    let source = build_dataset_source(config, dir);
    info!(source = %source.describe(), "loading dataset");
    let dataset = source.load()?;
    let catalog = StoreCatalog::resolve(dataset, config.matcher());
    let settings = config.analysis.to_settings()?;
    Ok(AnalysisService::new(Arc::new(catalog), settings))
}
