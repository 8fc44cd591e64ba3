//! Year-over-year sales profile of a single store.
//!
//! Built from the monthly period columns of the transaction rows: the window
//! covers months `1..=through_month` of `year`, compared against the same
//! months of the previous year.

use std::cmp::Reverse;
use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::Serialize;

use super::aggregate::{aggregate, by_period, growth_rate, percent_of, sum_periods, total};
use super::error::DomainError;
use super::money::{round_percent, to_man_won, Won};
use super::period::{Period, PeriodRange};
use super::record::TransactionRecord;

/// Entries kept in each ranked list.
pub const PROFILE_TOP_N: usize = 5;

/// Months of a year compared against the same months a year earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProfileWindow {
    pub year: i32,
    pub through_month: u32,
}

impl ProfileWindow {
    pub fn new(year: i32, through_month: u32) -> Result<Self, DomainError> {
        PeriodRange::year_to_month(year, through_month)?;
        Ok(Self {
            year,
            through_month,
        })
    }

    /// Completed months before a reference period.
    ///
    /// A January reference yields the whole previous year.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidPeriod`] for `100001`, which has no
    /// earlier month.
    pub fn before(reference: Period) -> Result<Self, DomainError> {
        let last = reference.pred().ok_or_else(|| DomainError::InvalidPeriod {
            token: reference.token(),
            reason: "no earlier month to profile",
        })?;
        Ok(Self {
            year: last.year(),
            through_month: last.month(),
        })
    }

    fn current(&self) -> Vec<Period> {
        PeriodRange::year_to_month(self.year, self.through_month)
            .map(|r| r.to_vec())
            .unwrap_or_default()
    }

    fn previous(&self) -> Vec<Period> {
        self.current().iter().filter_map(Period::previous_year).collect()
    }
}

/// Cumulative sales for a season or item.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotal {
    pub key: String,
    /// 만원.
    pub sales: i64,
    pub quantity: Decimal,
}

/// Window sales against the same months a year earlier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Growth {
    pub key: String,
    /// 만원.
    pub current: i64,
    /// 만원.
    pub previous: i64,
    /// Percent to one decimal, 0 without prior-year sales.
    pub rate: Decimal,
}

/// Returns against normal-price sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReturnSummary {
    /// 만원.
    pub normal_sales: i64,
    /// 만원, as a positive figure.
    pub returns: i64,
    /// Percent to one decimal.
    pub rate: Decimal,
}

/// One month's sales.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSales {
    pub period: Period,
    /// 만원.
    pub sales: i64,
}

/// One calendar month of the trend line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub month: u32,
    /// 만원.
    pub current: i64,
    /// 만원.
    pub previous: i64,
    pub growth: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SalesProfile {
    pub window: ProfileWindow,
    pub record_count: usize,
    pub top_seasons: Vec<CategoryTotal>,
    pub top_items: Vec<CategoryTotal>,
    pub returns: ReturnSummary,
    /// Best month of the window, `None` when every month is empty.
    pub peak_month: Option<MonthSales>,
    pub season_growth: Vec<Growth>,
    pub item_growth: Vec<Growth>,
    pub overall_growth: Decimal,
    /// All twelve months of the window year against the prior year.
    pub trend: Vec<TrendPoint>,
}

impl SalesProfile {
    pub fn build<'a, I>(records: I, window: ProfileWindow) -> Self
    where
        I: IntoIterator<Item = &'a TransactionRecord>,
    {
        let records: Vec<&TransactionRecord> = records.into_iter().collect();
        let current = window.current();
        let previous = window.previous();

        let normal = total(records.iter().copied(), |r: &TransactionRecord| r.normal_amount);
        let returned =
            total(records.iter().copied(), |r: &TransactionRecord| r.return_amount).abs();

        let monthly = by_period(records.iter().copied(), &current);
        let peak_month = monthly
            .iter()
            .filter(|(_, sales)| **sales > Decimal::ZERO)
            .max_by(|a, b| a.1.cmp(b.1).then_with(|| b.0.cmp(a.0)))
            .map(|(period, sales)| MonthSales {
                period: *period,
                sales: to_man_won(*sales),
            });

        let current_total: Won = records.iter().map(|r| sum_periods(r, &current)).sum();
        let previous_total: Won = records.iter().map(|r| sum_periods(r, &previous)).sum();

        Self {
            window,
            record_count: records.len(),
            top_seasons: ranked_totals(&records, TransactionRecord::season_key),
            top_items: ranked_totals(&records, TransactionRecord::item_key),
            returns: ReturnSummary {
                normal_sales: to_man_won(normal),
                returns: to_man_won(returned),
                rate: round_percent(percent_of(returned, normal)),
            },
            peak_month,
            season_growth: growth_by(&records, &current, &previous, TransactionRecord::season_key),
            item_growth: growth_by(&records, &current, &previous, TransactionRecord::item_key),
            overall_growth: round_percent(growth_rate(current_total, previous_total)),
            trend: trend(&records, window.year),
        }
    }

    /// Entries of `season_growth` that grew.
    pub fn growing_seasons(&self) -> impl Iterator<Item = &Growth> {
        self.season_growth.iter().filter(|g| g.rate > Decimal::ZERO)
    }

    /// Entries of `season_growth` that shrank.
    pub fn declining_seasons(&self) -> impl Iterator<Item = &Growth> {
        self.season_growth.iter().filter(|g| g.rate < Decimal::ZERO)
    }

    /// Entries of `item_growth` that grew.
    pub fn growing_items(&self) -> impl Iterator<Item = &Growth> {
        self.item_growth.iter().filter(|g| g.rate > Decimal::ZERO)
    }

    /// Entries of `item_growth` that shrank.
    pub fn declining_items(&self) -> impl Iterator<Item = &Growth> {
        self.item_growth.iter().filter(|g| g.rate < Decimal::ZERO)
    }
}

fn ranked_totals<K>(records: &[&TransactionRecord], key_fn: K) -> Vec<CategoryTotal>
where
    K: Fn(&TransactionRecord) -> String + Copy,
{
    let sales = aggregate(records.iter().copied(), key_fn, |r| r.sales_amount);
    let quantities = aggregate(records.iter().copied(), key_fn, |r| r.sales_quantity);

    let mut totals: Vec<CategoryTotal> = sales
        .into_iter()
        .map(|(key, amount)| CategoryTotal {
            quantity: quantities.get(&key).copied().unwrap_or_default(),
            key,
            sales: to_man_won(amount),
        })
        .collect();
    totals.sort_by_key(|t| Reverse(t.sales));
    totals.truncate(PROFILE_TOP_N);
    totals
}

fn growth_by<K>(
    records: &[&TransactionRecord],
    current: &[Period],
    previous: &[Period],
    key_fn: K,
) -> Vec<Growth>
where
    K: Fn(&TransactionRecord) -> String + Copy,
{
    let this_year = aggregate(records.iter().copied(), key_fn, |r| sum_periods(r, current));
    let last_year = aggregate(records.iter().copied(), key_fn, |r| sum_periods(r, previous));

    let mut rows: Vec<(String, Won, Won)> = this_year
        .into_iter()
        .map(|(key, now)| {
            let before = last_year.get(&key).copied().unwrap_or_default();
            (key, now, before)
        })
        .collect();
    rows.sort_by_key(|(_, now, _)| Reverse(*now));
    rows.truncate(PROFILE_TOP_N);

    rows.into_iter()
        .map(|(key, now, before)| Growth {
            key,
            current: to_man_won(now),
            previous: to_man_won(before),
            rate: round_percent(growth_rate(now, before)),
        })
        .collect()
}

fn trend(records: &[&TransactionRecord], year: i32) -> Vec<TrendPoint> {
    let months: Vec<Period> = (1..=12).filter_map(|m| Period::new(year, m).ok()).collect();
    let prior: Vec<Period> = months.iter().filter_map(Period::previous_year).collect();
    let current: BTreeMap<Period, Won> = by_period(records.iter().copied(), &months);
    let previous: BTreeMap<Period, Won> = by_period(records.iter().copied(), &prior);

    months
        .iter()
        .map(|now| {
            let c = current.get(now).copied().unwrap_or_default();
            let p = now
                .previous_year()
                .and_then(|before| previous.get(&before).copied())
                .unwrap_or_default();
            TrendPoint {
                month: now.month(),
                current: to_man_won(c),
                previous: to_man_won(p),
                growth: round_percent(growth_rate(c, p)),
            }
        })
        .collect()
}
