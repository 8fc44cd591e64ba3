//! Storelens - similar-store matching and comparative sales analytics.
//!
//! Finds the stores whose monthly revenue is closest to a target store and
//! compares item sales, season sales and inventory against them, producing
//! structured metrics and a short narrative for field managers.
//!
//! # Architecture
//!
//! The crate follows a hexagonal layout:
//!
//! - [`domain`] - Pure, synchronous analytics: name matching, aggregation,
//!   revenue extraction, peer search, comparison and derived metrics
//! - [`port`] - Traits at the edges: dataset sources, LLMs, narrative renderers
//! - [`adapter`] - JSON dataset reader, Gemini client, CLI
//! - [`application`] - Store catalog, analysis service, insight coordination
//! - [`infrastructure`] - Configuration loading and component factories
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//!
//! use storelens::application::analysis::{AnalysisService, AnalysisSettings};
//! use storelens::application::catalog::StoreCatalog;
//! use storelens::domain::matcher::NameMatcher;
//! use storelens::domain::period::Period;
//! use storelens::port::outbound::dataset::Dataset;
//!
//! let catalog = StoreCatalog::resolve(Dataset::default(), NameMatcher::default());
//! let period = Period::parse("202512").unwrap();
//! let service = AnalysisService::new(Arc::new(catalog), AnalysisSettings::for_period(period));
//! assert!(service.revenues().is_empty());
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
