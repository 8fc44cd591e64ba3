//! Shared test utilities available to both unit and integration tests.
//!
//! Enabled via `#[cfg(test)]` (unit tests) or the `testkit` feature
//! (integration tests).
//!
//! # Modules
//!
//! - [`domain`]: Builders for stores and dataset records.
//! - [`fixture`]: JSON export files written into a directory.
//! - [`config`]: Canonical test configurations.

pub mod config;
pub mod domain;
pub mod fixture;
