//! Handler for the `profile` command.

use rust_decimal::Decimal;
use serde_json::json;

use super::output;
use crate::application::analysis::AnalysisService;
use crate::domain::profile::{Growth, ProfileWindow, SalesProfile};
use crate::error::Result;

fn growth_text(growth: &Growth) -> String {
    let rate = growth.rate.normalize();
    let text = if growth.rate > Decimal::ZERO {
        format!("+{rate}%")
    } else {
        format!("{rate}%")
    };
    format!(
        "{} (prev {}, {})",
        output::man_won(growth.current),
        output::man_won(growth.previous),
        output::signed(text, growth.rate > Decimal::ZERO, growth.rate < Decimal::ZERO)
    )
}

/// Show the year-over-year profile of one store.
pub fn execute(
    service: &AnalysisService,
    key: &str,
    year: Option<i32>,
    through_month: Option<u32>,
) -> Result<()> {
    let window = match (year, through_month) {
        (Some(year), Some(month)) => Some(ProfileWindow::new(year, month)?),
        _ => None,
    };
    let (store, profile) = service.profile(key, window)?;

    if output::is_json() {
        output::json_output("profile", &json!({ "store": store, "profile": profile }));
        return Ok(());
    }

    output::section(&format!(
        "{} ({} months 1-{})",
        store.name, profile.window.year, profile.window.through_month
    ));
    render(&profile);
    Ok(())
}

fn render(profile: &SalesProfile) {
    output::field("Records", profile.record_count);
    output::field("Growth", format!("{}%", profile.overall_growth.normalize()));
    if let Some(peak) = &profile.peak_month {
        output::field("Peak month", format!("{} ({})", peak.period, output::man_won(peak.sales)));
    }
    output::field(
        "Returns",
        format!(
            "{} of {} ({}%)",
            output::man_won(profile.returns.returns),
            output::man_won(profile.returns.normal_sales),
            profile.returns.rate.normalize()
        ),
    );

    output::section("Top seasons");
    for total in &profile.top_seasons {
        output::field(&total.key, output::man_won(total.sales));
    }

    output::section("Top items");
    for total in &profile.top_items {
        output::field(&total.key, output::man_won(total.sales));
    }

    output::section("Season growth");
    for growth in &profile.season_growth {
        output::field(&growth.key, growth_text(growth));
    }

    output::section("Item growth");
    for growth in &profile.item_growth {
        output::field(&growth.key, growth_text(growth));
    }

    if output::verbosity() > 0 {
        output::section("Monthly trend");
        for point in &profile.trend {
            output::field(
                &format!("{:02}", point.month),
                format!(
                    "{} / {} ({}%)",
                    output::man_won(point.current),
                    output::man_won(point.previous),
                    point.growth.normalize()
                ),
            );
        }
    }
}
