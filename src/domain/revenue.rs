//! Single-period store revenue.
//!
//! Revenue is reported in whole 만원 (the sum of the period field divided by
//! 10,000, rounded half away from zero). Net-negative months, which only
//! happen when returns exceed sales, clamp to zero.

use rust_decimal::Decimal;
use tracing::debug;

use super::ledger::SalesLedger;
use super::matcher::NameMatcher;
use super::money::to_man_won;
use super::period::Period;
use super::record::TransactionRecord;
use super::store::Store;

/// Revenue of already-filtered records for one period, in 만원.
pub fn period_revenue<'a, I>(records: I, period: Period) -> i64
where
    I: IntoIterator<Item = &'a TransactionRecord>,
{
    let sum: Decimal = records.into_iter().map(|r| r.period_amount(period)).sum();
    to_man_won(sum).max(0)
}

/// Revenue for a store name, matching raw names with `matcher`.
///
/// Returns 0 for a store with no matching records.
#[must_use]
pub fn revenue_for_period(
    store_name: &str,
    period: Period,
    transactions: &[TransactionRecord],
    matcher: &NameMatcher,
) -> i64 {
    period_revenue(
        transactions
            .iter()
            .filter(|r| matcher.matches(&r.store_name, store_name)),
        period,
    )
}

/// Revenue for a canonical store via a ledger.
pub fn store_revenue<L: SalesLedger + ?Sized>(ledger: &L, store: &Store, period: Period) -> i64 {
    let records = ledger.transactions(store);
    let revenue = period_revenue(records.iter().copied(), period);
    debug!(
        store = %store.name,
        period = %period,
        records = records.len(),
        revenue,
        "computed period revenue"
    );
    revenue
}
