//! Brand standing at a department-store venue.

use std::cmp::Reverse;

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::debug;

use super::matcher::NameMatcher;
use super::money::{to_man_won, Won};
use super::record::CompetitorRecord;

/// One brand's position at a venue.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BrandRank {
    /// 1-based.
    pub rank: usize,
    pub brand: String,
    pub monthly_average: Won,
}

impl BrandRank {
    /// Monthly average in 만원.
    #[must_use]
    pub fn monthly_average_man_won(&self) -> i64 {
        to_man_won(self.monthly_average)
    }
}

/// Brands at the venue matching a store, best first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompetitorStanding {
    /// Venue spelling as it appears in the rankings sheet.
    pub venue: String,
    pub brands: Vec<BrandRank>,
    pub own_brand: Option<BrandRank>,
}

impl CompetitorStanding {
    /// The best `n` brands.
    #[must_use]
    pub fn top(&self, n: usize) -> &[BrandRank] {
        &self.brands[..n.min(self.brands.len())]
    }
}

/// Rank the brands at the venue that `store_name` maps to.
///
/// Brands without a positive figure are not ranked. Equal figures keep sheet
/// column order. `None` when no venue row matches.
#[must_use]
pub fn competitor_standing(
    store_name: &str,
    records: &[CompetitorRecord],
    matcher: &NameMatcher,
    own_brand: &str,
) -> Option<CompetitorStanding> {
    let record = records
        .iter()
        .find(|r| matcher.matches(&r.venue, store_name))?;

    let mut figures: Vec<&(String, Won)> = record
        .brand_averages
        .iter()
        .filter(|(_, value)| *value > Decimal::ZERO)
        .collect();
    figures.sort_by_key(|(_, value)| Reverse(*value));

    let brands: Vec<BrandRank> = figures
        .into_iter()
        .enumerate()
        .map(|(index, (brand, value))| BrandRank {
            rank: index + 1,
            brand: brand.clone(),
            monthly_average: *value,
        })
        .collect();

    let own_brand = brands
        .iter()
        .find(|b| b.brand.trim().eq_ignore_ascii_case(own_brand.trim()))
        .cloned();

    debug!(
        store = store_name,
        venue = %record.venue,
        brands = brands.len(),
        own_rank = own_brand.as_ref().map(|b| b.rank),
        "ranked competitor brands"
    );

    Some(CompetitorStanding {
        venue: record.venue.clone(),
        brands,
        own_brand,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::matcher::AliasTable;
    use rust_decimal_macros::dec;

    fn venue(name: &str, brands: &[(&str, Decimal)]) -> CompetitorRecord {
        CompetitorRecord {
            venue: name.into(),
            brand_averages: brands.iter().map(|(b, v)| ((*b).to_string(), *v)).collect(),
        }
    }

    #[test]
    fn ranks_by_average_and_reports_own_brand() {
        let records = vec![venue(
            "롯데본점",
            &[
                ("MLB", dec!(8_000_000)),
                ("DISCOVERY", dec!(12_000_000)),
                ("NIKE", dec!(8_000_000)),
                ("FILA", Decimal::ZERO),
            ],
        )];
        let standing =
            competitor_standing("롯데본점", &records, &NameMatcher::default(), "MLB").unwrap();

        let order: Vec<&str> = standing.brands.iter().map(|b| b.brand.as_str()).collect();
        assert_eq!(order, vec!["DISCOVERY", "MLB", "NIKE"]);
        let own = standing.own_brand.unwrap();
        assert_eq!(own.rank, 2);
        assert_eq!(own.monthly_average_man_won(), 800);
    }

    #[test]
    fn venue_found_through_alias() {
        let records = vec![venue("더현대 서울", &[("MLB", dec!(1))])];
        let matcher = NameMatcher::new(AliasTable::venue_defaults());
        let standing = competitor_standing("더현대서울", &records, &matcher, "MLB").unwrap();
        assert_eq!(standing.venue, "더현대 서울");

        assert!(competitor_standing("더현대서울", &records, &NameMatcher::default(), "MLB").is_none());
    }

    #[test]
    fn missing_own_brand_is_none() {
        let records = vec![venue("롯데본점", &[("NIKE", dec!(1))])];
        let standing =
            competitor_standing("롯데본점", &records, &NameMatcher::default(), "MLB").unwrap();
        assert!(standing.own_brand.is_none());
        assert_eq!(standing.top(5).len(), 1);
    }
}
