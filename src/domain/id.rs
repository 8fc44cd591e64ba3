//! Domain identifier types with proper encapsulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Canonical store identifier - newtype for type safety.
///
/// Assigned once when the roster is loaded (`ST-001`, `ST-002`, ...). Raw
/// store names from other datasets are resolved to a `StoreId` at ingestion;
/// the id is internal and not stable across roster revisions.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct StoreId(String);

impl StoreId {
    /// Create a new `StoreId` from a string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Build the roster id for a 1-based position (`ST-001`).
    #[must_use]
    pub fn from_position(position: usize) -> Self {
        Self(format!("ST-{position:03}"))
    }

    /// Get the store ID as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StoreId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for StoreId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<&str> for StoreId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_position_pads_to_three_digits() {
        assert_eq!(StoreId::from_position(1).as_str(), "ST-001");
        assert_eq!(StoreId::from_position(42).as_str(), "ST-042");
        assert_eq!(StoreId::from_position(1234).as_str(), "ST-1234");
    }

    #[test]
    fn display_matches_inner() {
        let id = StoreId::from("ST-007");
        assert_eq!(id.to_string(), "ST-007");
    }
}
