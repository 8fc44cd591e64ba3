//! Domain validation errors for core domain types.
//!
//! These errors are returned by `parse`/`try_new` constructors that validate
//! inputs. The analytics themselves never fail: an unmatched store or an
//! empty peer set is an ordinary result, not an error.
//!
//! # Examples
//!
//! ```
//! use storelens::domain::error::DomainError;
//! use storelens::domain::period::Period;
//!
//! let result = Period::parse("202513");
//! assert!(matches!(result, Err(DomainError::InvalidPeriod { .. })));
//! ```

use thiserror::Error;

/// Errors that occur when domain invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A period token was not a valid `YYYYMM` string.
    #[error("invalid period token '{token}': {reason}")]
    InvalidPeriod {
        /// The rejected token.
        token: String,
        /// Why it was rejected.
        reason: &'static str,
    },

    /// A period range ended before it started.
    #[error("period range end {end} precedes start {start}")]
    InvertedRange {
        /// Range start token.
        start: String,
        /// Range end token.
        end: String,
    },
}
