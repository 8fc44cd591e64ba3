//! Calendar-month period tokens (`YYYYMM`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::error::DomainError;

/// A calendar month identified by a `YYYYMM` token.
///
/// Ordering follows the calendar, so periods can key a `BTreeMap` and be
/// compared directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Period {
    year: i32,
    month: u32,
}

impl Period {
    /// Create a period from a year and a 1-based month.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPeriod`] when the month is outside 1..=12
    /// or the year is outside 1000..=9999.
    pub fn new(year: i32, month: u32) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) {
            return Err(DomainError::InvalidPeriod {
                token: format!("{year:04}{month:02}"),
                reason: "month must be between 01 and 12",
            });
        }
        if !(1000..=9999).contains(&year) {
            return Err(DomainError::InvalidPeriod {
                token: format!("{year}{month:02}"),
                reason: "year must have four digits",
            });
        }
        Ok(Self { year, month })
    }

    /// Parse a `YYYYMM` token.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPeriod`] for anything that is not six
    /// ASCII digits naming a valid month.
    pub fn parse(token: &str) -> Result<Self, DomainError> {
        let token = token.trim();
        if token.len() != 6 || !token.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DomainError::InvalidPeriod {
                token: token.to_string(),
                reason: "expected six digits (YYYYMM)",
            });
        }
        let year: i32 = token[..4].parse().map_err(|_| DomainError::InvalidPeriod {
            token: token.to_string(),
            reason: "year is not numeric",
        })?;
        let month: u32 = token[4..].parse().map_err(|_| DomainError::InvalidPeriod {
            token: token.to_string(),
            reason: "month is not numeric",
        })?;
        Self::new(year, month)
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn month(&self) -> u32 {
        self.month
    }

    /// The `YYYYMM` token for this period.
    #[must_use]
    pub fn token(&self) -> String {
        format!("{:04}{:02}", self.year, self.month)
    }

    /// The same month one year earlier, `None` before year 1000.
    #[must_use]
    pub fn previous_year(&self) -> Option<Self> {
        Self::new(self.year - 1, self.month).ok()
    }

    /// The following calendar month, `None` after 999912.
    #[must_use]
    pub fn succ(&self) -> Option<Self> {
        if self.month == 12 {
            Self::new(self.year + 1, 1).ok()
        } else {
            Self::new(self.year, self.month + 1).ok()
        }
    }

    /// The preceding calendar month, `None` before 100001.
    #[must_use]
    pub fn pred(&self) -> Option<Self> {
        if self.month == 1 {
            Self::new(self.year - 1, 12).ok()
        } else {
            Self::new(self.year, self.month - 1).ok()
        }
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}{:02}", self.year, self.month)
    }
}

impl FromStr for Period {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Serialize for Period {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.token())
    }
}

impl<'de> Deserialize<'de> for Period {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let token = String::deserialize(deserializer)?;
        Self::parse(&token).map_err(serde::de::Error::custom)
    }
}

/// Inclusive range of calendar months.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodRange {
    start: Period,
    end: Period,
}

impl PeriodRange {
    /// Create an inclusive range.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvertedRange`] when `end` precedes `start`.
    pub fn new(start: Period, end: Period) -> Result<Self, DomainError> {
        if end < start {
            return Err(DomainError::InvertedRange {
                start: start.token(),
                end: end.token(),
            });
        }
        Ok(Self { start, end })
    }

    /// January through `through_month` of `year`.
    ///
    /// # Errors
    ///
    /// Propagates [`DomainError::InvalidPeriod`] for an invalid month.
    pub fn year_to_month(year: i32, through_month: u32) -> Result<Self, DomainError> {
        Self::new(Period::new(year, 1)?, Period::new(year, through_month)?)
    }

    #[must_use]
    pub const fn start(&self) -> Period {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Period {
        self.end
    }

    /// The same months shifted back one year, `None` when that leaves the
    /// four-digit years.
    #[must_use]
    pub fn previous_year(&self) -> Option<Self> {
        Some(Self {
            start: self.start.previous_year()?,
            end: self.end.previous_year()?,
        })
    }

    /// Iterate the months in the range, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = Period> {
        let end = self.end;
        std::iter::successors(Some(self.start), move |p| p.succ().filter(|next| *next <= end))
    }

    /// Collect the months into a vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Period> {
        self.iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_valid_token() {
        let p = Period::parse("202512").unwrap();
        assert_eq!(p.year(), 2025);
        assert_eq!(p.month(), 12);
        assert_eq!(p.token(), "202512");
    }

    #[test]
    fn parse_rejects_bad_month() {
        assert!(Period::parse("202500").is_err());
        assert!(Period::parse("202513").is_err());
    }

    #[test]
    fn parse_rejects_non_digits() {
        assert!(Period::parse("2025-1").is_err());
        assert!(Period::parse("20251").is_err());
        assert!(Period::parse("").is_err());
    }

    #[test]
    fn succ_and_pred_wrap_year() {
        let dec = Period::new(2024, 12).unwrap();
        assert_eq!(dec.succ(), Some(Period::new(2025, 1).unwrap()));
        assert_eq!(Period::new(2025, 1).unwrap().pred(), Some(dec));
    }

    #[test]
    fn stepping_stays_within_four_digit_years() {
        let first = Period::new(1000, 1).unwrap();
        assert_eq!(first.pred(), None);
        assert_eq!(first.previous_year(), None);
        assert_eq!(Period::new(1001, 3).unwrap().previous_year(), Period::new(1000, 3).ok());

        let last = Period::new(9999, 12).unwrap();
        assert_eq!(last.succ(), None);
        assert_eq!(PeriodRange::new(Period::new(9999, 11).unwrap(), last).unwrap().to_vec().len(), 2);
        assert!(PeriodRange::year_to_month(1000, 3).unwrap().previous_year().is_none());
    }

    #[test]
    fn range_iterates_inclusive() {
        let range = PeriodRange::year_to_month(2025, 11).unwrap();
        let months = range.to_vec();
        assert_eq!(months.len(), 11);
        assert_eq!(months[0].token(), "202501");
        assert_eq!(months[10].token(), "202511");
    }

    #[test]
    fn range_across_year_boundary() {
        let range = PeriodRange::new(
            Period::parse("202411").unwrap(),
            Period::parse("202502").unwrap(),
        )
        .unwrap();
        let tokens: Vec<String> = range.iter().map(|p| p.token()).collect();
        assert_eq!(tokens, vec!["202411", "202412", "202501", "202502"]);
    }

    #[test]
    fn inverted_range_rejected() {
        let result = PeriodRange::new(
            Period::parse("202505").unwrap(),
            Period::parse("202501").unwrap(),
        );
        assert!(matches!(result, Err(DomainError::InvertedRange { .. })));
    }

    #[test]
    fn previous_year_range() {
        let range = PeriodRange::year_to_month(2025, 3).unwrap().previous_year().unwrap();
        assert_eq!(range.start().token(), "202401");
        assert_eq!(range.end().token(), "202403");
    }

    #[test]
    fn serde_uses_token() {
        let p = Period::parse("202507").unwrap();
        let json = serde_json::to_string(&p).unwrap();
        assert_eq!(json, "\"202507\"");
        let back: Period = serde_json::from_str(&json).unwrap();
        assert_eq!(back, p);
    }
}
