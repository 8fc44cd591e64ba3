//! Handler for the `compare` command.

use rust_decimal::Decimal;
use tabled::{Table, Tabled};

use super::output;
use crate::application::analysis::{AnalysisService, StoreAnalysis};
use crate::domain::competitor::CompetitorStanding;
use crate::domain::metrics::{ComparisonMetrics, ItemDelta};
use crate::domain::money::to_man_won;
use crate::error::Result;

/// Brands listed from the competitor sheet.
const COMPETITOR_ROWS: usize = 5;

#[derive(Tabled)]
struct ItemRow {
    #[tabled(rename = "Item")]
    item: String,
    #[tabled(rename = "Store")]
    target: String,
    #[tabled(rename = "Peer avg")]
    peer_average: String,
    #[tabled(rename = "Delta")]
    delta: String,
}

#[derive(Tabled)]
struct SeasonRow {
    #[tabled(rename = "Season")]
    season: String,
    #[tabled(rename = "Store stock")]
    target: String,
    #[tabled(rename = "Peer avg")]
    peer_average: String,
    #[tabled(rename = "Share")]
    share: String,
}

fn percent(value: Decimal) -> String {
    let text = format!("{}%", value.normalize());
    output::signed(
        if value > Decimal::ZERO { format!("+{text}") } else { text },
        value > Decimal::ZERO,
        value < Decimal::ZERO,
    )
}

fn item_row(delta: &ItemDelta) -> ItemRow {
    ItemRow {
        item: delta.item.clone(),
        target: output::man_won(to_man_won(delta.target)),
        peer_average: output::man_won(to_man_won(delta.peer_average)),
        delta: percent(delta.delta_percent),
    }
}

/// Compare one store against its peers.
pub fn execute(service: &AnalysisService, key: &str) -> Result<()> {
    let analysis = service.analyze(key)?;

    if output::is_json() {
        output::json_output("compare", &analysis);
        return Ok(());
    }

    render(&analysis);
    Ok(())
}

fn render(analysis: &StoreAnalysis) {
    output::section(&format!("{} ({})", analysis.store.name, analysis.period));
    output::field("Store", &analysis.store.id);
    output::field("Revenue", output::man_won(analysis.revenue));

    match analysis.metrics.metrics() {
        Some(metrics) => render_metrics(analysis, metrics),
        None => output::warning("no peers with similar revenue, nothing to compare"),
    }

    if let Some(standing) = &analysis.competitors {
        render_competitors(standing);
    }
}

fn render_metrics(analysis: &StoreAnalysis, metrics: &ComparisonMetrics) {
    let names: Vec<&str> = analysis.comparison.peers.iter().map(|p| p.name.as_str()).collect();
    output::field("Peers", format!("{} ({})", metrics.peer_count, names.join(", ")));

    output::section("Items");
    let rows: Vec<ItemRow> = metrics.item_deltas.iter().map(item_row).collect();
    if rows.is_empty() {
        output::note("(no item sales)");
    } else {
        output::lines(&Table::new(rows).to_string());
    }

    if !metrics.top_seasons.is_empty() {
        output::section("Top seasons");
        for season in &metrics.top_seasons {
            output::field(&season.season, output::man_won(to_man_won(season.sales)));
        }
    }

    output::section("Inventory");
    let inventory = &metrics.inventory;
    output::field(
        "Quantity",
        format!(
            "{} (peer avg {}, {})",
            inventory.target_quantity.normalize(),
            inventory.peer_average_quantity.round_dp(1).normalize(),
            percent(inventory.quantity_delta_percent)
        ),
    );
    output::field(
        "Tag value",
        format!(
            "{} (peer avg {})",
            output::man_won(to_man_won(inventory.target_value)),
            output::man_won(to_man_won(inventory.peer_average_value))
        ),
    );

    if !metrics.season_inventory.is_empty() {
        let rows: Vec<SeasonRow> = metrics
            .season_inventory
            .iter()
            .map(|s| SeasonRow {
                season: if s.low {
                    format!("{} ▼", s.season)
                } else {
                    s.season.clone()
                },
                target: output::man_won(to_man_won(s.target_value)),
                peer_average: output::man_won(to_man_won(s.peer_average)),
                share: format!("{}%", s.share_percent()),
            })
            .collect();
        output::lines(&Table::new(rows).to_string());
    }

    let low: Vec<&str> = metrics.low_inventory_seasons().map(|s| s.season.as_str()).collect();
    if !low.is_empty() {
        output::warning(&format!("low inventory seasons: {}", low.join(", ")));
    }
}

fn render_competitors(standing: &CompetitorStanding) {
    output::section(&format!("Competitors at {}", standing.venue));
    for brand in standing.top(COMPETITOR_ROWS) {
        output::field(
            &format!("#{} {}", brand.rank, brand.brand),
            output::man_won(brand.monthly_average_man_won()),
        );
    }
    match &standing.own_brand {
        Some(own) => output::success(&format!(
            "{} ranks #{} of {}",
            own.brand,
            own.rank,
            standing.brands.len()
        )),
        None => output::note("(own brand not listed)"),
    }
}
