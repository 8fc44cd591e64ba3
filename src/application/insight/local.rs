//! Deterministic Korean summary used when no LLM answer is available.

use async_trait::async_trait;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::domain::metrics::{ComparisonMetrics, ItemDelta};
use crate::domain::money::{group_thousands, to_man_won};
use crate::error::Result;
use crate::port::outbound::narrative::{InsightPayload, NarrativeRenderer};

/// Sentence returned when there is nothing to compare against.
pub const NO_COMPARISON_MESSAGE: &str = "매출이 비슷한 매장이 없어 비교 분석을 수행할 수 없습니다.";

/// Percentage without trailing zeros, with an explicit sign when positive.
fn signed_percent(value: Decimal) -> String {
    let value = value.normalize();
    if value > Decimal::ZERO {
        format!("+{value}")
    } else {
        value.to_string()
    }
}

fn round_units(value: Decimal) -> i64 {
    value
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .unwrap_or(0)
}

fn item_line(item: &ItemDelta) -> String {
    format!(
        "   - {}: {}만원 (평균 {}만원, {}%)",
        item.item,
        group_thousands(to_man_won(item.target)),
        group_thousands(to_man_won(item.peer_average)),
        signed_percent(item.delta_percent)
    )
}

/// Renders the comparison as a short sectioned Korean text.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalSummarizer;

impl LocalSummarizer {
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Write the summary for a payload.
    #[must_use]
    pub fn summarize(&self, payload: &InsightPayload) -> String {
        match payload.comparison.metrics() {
            Some(metrics) => Self::sections(metrics),
            None => NO_COMPARISON_MESSAGE.to_string(),
        }
    }

    fn sections(metrics: &ComparisonMetrics) -> String {
        let mut lines = vec![format!("【매출이 비슷한 {}개 매장과 비교 분석】", metrics.peer_count)];

        if !metrics.best_items.is_empty() {
            lines.push("\n✅ 잘하고 있는 아이템:".to_string());
            lines.extend(metrics.best_items.iter().map(item_line));
        }

        if !metrics.worst_items.is_empty() {
            lines.push("\n⚠️ 개선이 필요한 아이템:".to_string());
            lines.extend(metrics.worst_items.iter().map(item_line));
        }

        lines.push("\n📦 재고 현황:".to_string());
        let inventory = &metrics.inventory;
        let delta = round_units(inventory.quantity_delta);
        let percent = signed_percent(inventory.quantity_delta_percent);
        if inventory.quantity_delta > Decimal::ZERO {
            lines.push(format!("   재고가 평균보다 {}개 많음 ({percent}%)", group_thousands(delta)));
        } else if inventory.quantity_delta < Decimal::ZERO {
            lines.push(format!(
                "   재고가 평균보다 {}개 적음 ({percent}%)",
                group_thousands(delta.abs())
            ));
        } else {
            lines.push("   재고가 평균과 비슷한 수준".to_string());
        }

        let low: Vec<String> = metrics
            .low_inventory_seasons()
            .map(|s| {
                format!(
                    "   - {}: {}만원 (평균 {}만원의 {}%)",
                    s.season,
                    group_thousands(to_man_won(s.target_value)),
                    group_thousands(to_man_won(s.peer_average)),
                    s.share_percent()
                )
            })
            .collect();
        if !low.is_empty() {
            lines.push("\n🔻 재고 부족 시즌:".to_string());
            lines.extend(low);
        }

        lines.join("\n")
    }
}

#[async_trait]
impl NarrativeRenderer for LocalSummarizer {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn render(&self, payload: &InsightPayload) -> Result<String> {
        Ok(self.summarize(payload))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_sign_and_trailing_zeros() {
        assert_eq!(signed_percent(Decimal::new(250, 1)), "+25");
        assert_eq!(signed_percent(Decimal::new(-667, 1)), "-66.7");
        assert_eq!(signed_percent(Decimal::ZERO), "0");
    }
}
