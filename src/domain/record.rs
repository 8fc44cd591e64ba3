//! Dataset records as the core sees them.
//!
//! Records carry the raw store name exactly as it appeared in the source
//! dataset. Identity resolution happens elsewhere; nothing here assumes the
//! raw name equals a canonical store name.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::money::Won;
use super::period::Period;

/// Sentinel category used when an item code or season label is missing.
pub const OTHER_CATEGORY: &str = "기타";

/// Normalize an aggregation key, substituting [`OTHER_CATEGORY`] for blanks.
#[must_use]
pub fn category_key(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        OTHER_CATEGORY.to_string()
    } else {
        trimmed.to_string()
    }
}

/// One (store, item, season) row of the item/season sales dataset.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionRecord {
    pub store_code: String,
    pub store_name: String,
    pub item: String,
    pub season: String,
    /// Net sales amount over the whole dataset window.
    pub sales_amount: Won,
    pub sales_quantity: Decimal,
    pub normal_amount: Won,
    pub normal_quantity: Decimal,
    /// Returns are reported as negative amounts in the source data.
    pub return_amount: Won,
    pub return_quantity: Decimal,
    /// Sparse monthly sales; an absent period means no sale.
    pub periods: BTreeMap<Period, Won>,
}

impl TransactionRecord {
    /// Sales for a single period, zero when absent.
    #[must_use]
    pub fn period_amount(&self, period: Period) -> Won {
        self.periods.get(&period).copied().unwrap_or(Decimal::ZERO)
    }

    /// Item code with the sentinel substituted for blanks.
    #[must_use]
    pub fn item_key(&self) -> String {
        category_key(&self.item)
    }

    /// Season label with the sentinel substituted for blanks.
    #[must_use]
    pub fn season_key(&self) -> String {
        category_key(&self.season)
    }
}

/// Stock on hand for a store and season.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InventoryRecord {
    pub store_code: String,
    pub store_name: String,
    pub season: String,
    pub quantity: Decimal,
    /// Retail (tag-price) value of the stock.
    pub retail_value: Won,
}

impl InventoryRecord {
    #[must_use]
    pub fn season_key(&self) -> String {
        category_key(&self.season)
    }
}

/// Monthly-average sales per brand at a department-store venue.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompetitorRecord {
    pub venue: String,
    /// Brand figures in source column order.
    pub brand_averages: Vec<(String, Won)>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn blank_keys_become_sentinel() {
        assert_eq!(category_key(""), OTHER_CATEGORY);
        assert_eq!(category_key("   "), OTHER_CATEGORY);
        assert_eq!(category_key(" TS "), "TS");
    }

    #[test]
    fn absent_period_is_zero() {
        let mut record = TransactionRecord::default();
        let december = Period::parse("202512").unwrap();
        assert_eq!(record.period_amount(december), Decimal::ZERO);

        record.periods.insert(december, dec!(150_000));
        assert_eq!(record.period_amount(december), dec!(150_000));
    }

    #[test]
    fn record_keys_fall_back_to_sentinel() {
        let record = TransactionRecord {
            item: String::new(),
            season: "25F".into(),
            ..Default::default()
        };
        assert_eq!(record.item_key(), OTHER_CATEGORY);
        assert_eq!(record.season_key(), "25F");
    }
}
