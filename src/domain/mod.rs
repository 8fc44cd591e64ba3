//! Store analytics over in-memory datasets.
//!
//! Everything here is synchronous and pure: matching never fails, and
//! divisions by zero resolve to zero.

pub mod aggregate;
pub mod comparison;
pub mod competitor;
pub mod error;
pub mod id;
pub mod ledger;
pub mod matcher;
pub mod metrics;
pub mod money;
pub mod peer;
pub mod period;
pub mod profile;
pub mod record;
pub mod revenue;
pub mod store;
