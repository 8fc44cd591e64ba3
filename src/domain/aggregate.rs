//! Aggregation of flat records into keyed totals.
//!
//! Output maps are `BTreeMap`s so iteration order, and anything derived from
//! it, is deterministic.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::money::Won;
use super::period::Period;
use super::record::TransactionRecord;

/// Sum `value_fn(record)` grouped by `key_fn(record)`.
pub fn aggregate<'a, T, K, I, KF, VF>(records: I, key_fn: KF, value_fn: VF) -> BTreeMap<K, Decimal>
where
    T: 'a,
    K: Ord,
    I: IntoIterator<Item = &'a T>,
    KF: Fn(&T) -> K,
    VF: Fn(&T) -> Decimal,
{
    let mut totals = BTreeMap::new();
    for record in records {
        *totals.entry(key_fn(record)).or_insert(Decimal::ZERO) += value_fn(record);
    }
    totals
}

/// Sum a single value across records.
pub fn total<'a, T, I, VF>(records: I, value_fn: VF) -> Decimal
where
    T: 'a,
    I: IntoIterator<Item = &'a T>,
    VF: Fn(&T) -> Decimal,
{
    records.into_iter().map(value_fn).sum()
}

/// Sum of a record's sales across several periods.
#[must_use]
pub fn sum_periods(record: &TransactionRecord, periods: &[Period]) -> Won {
    periods.iter().map(|p| record.period_amount(*p)).sum()
}

/// Period sales by item code.
pub fn by_item<'a, I>(records: I, period: Period) -> BTreeMap<String, Won>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    aggregate(records, TransactionRecord::item_key, |r| r.period_amount(period))
}

/// Period sales by season label.
pub fn by_season<'a, I>(records: I, period: Period) -> BTreeMap<String, Won>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    aggregate(records, TransactionRecord::season_key, |r| {
        r.period_amount(period)
    })
}

/// Sales by period token across a set of periods.
pub fn by_period<'a, I>(records: I, periods: &[Period]) -> BTreeMap<Period, Won>
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let mut totals: BTreeMap<Period, Won> = periods.iter().map(|p| (*p, Decimal::ZERO)).collect();
    for record in records {
        for period in periods {
            if let Some(total) = totals.get_mut(period) {
                *total += record.period_amount(*period);
            }
        }
    }
    totals
}

/// `total / count`, zero when `count` is zero.
#[must_use]
pub fn average(total: Decimal, count: usize) -> Decimal {
    if count == 0 {
        Decimal::ZERO
    } else {
        total / Decimal::from(count)
    }
}

/// Mean over the non-zero values only, zero when there are none.
///
/// A peer lacking an entry is left out of the denominator rather than
/// counted as zero.
pub fn present_mean<I>(values: I) -> Decimal
where
    I: IntoIterator<Item = Decimal>,
{
    let (sum, count) = values
        .into_iter()
        .filter(|v| !v.is_zero())
        .fold((Decimal::ZERO, 0usize), |(sum, count), v| (sum + v, count + 1));
    average(sum, count)
}

/// `numerator / denominator * 100`, zero when the denominator is not positive.
#[must_use]
pub fn percent_of(numerator: Decimal, denominator: Decimal) -> Decimal {
    if denominator > Decimal::ZERO {
        numerator / denominator * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    }
}

/// Growth of `current` over `previous` in percent, zero without a base.
#[must_use]
pub fn growth_rate(current: Decimal, previous: Decimal) -> Decimal {
    percent_of(current - previous, previous)
}
