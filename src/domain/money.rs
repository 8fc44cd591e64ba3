//! Monetary amounts and display scaling.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

/// Won amounts are kept as exact decimals.
pub type Won = Decimal;

/// Divisor from won to the 만원 (ten-thousand won) display unit.
pub const DISPLAY_SCALE: i64 = 10_000;

/// Scale a won amount to whole 만원, rounding half away from zero.
#[must_use]
pub fn to_man_won(amount: Won) -> i64 {
    let scaled = amount / Decimal::from(DISPLAY_SCALE);
    scaled
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

/// Round a percentage to one decimal place.
#[must_use]
pub fn round_percent(value: Decimal) -> Decimal {
    value.round_dp_with_strategy(1, RoundingStrategy::MidpointAwayFromZero)
}

/// Format an integer with thousands separators.
#[must_use]
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
