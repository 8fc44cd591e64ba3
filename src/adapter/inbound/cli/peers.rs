//! Handler for the `peers` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::application::analysis::AnalysisService;
use crate::domain::peer::PeerOutcome;
use crate::error::Result;

#[derive(Tabled)]
struct PeerRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Store")]
    name: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Gap")]
    distance: String,
}

/// Show the revenue peers of one store.
pub fn execute(service: &AnalysisService, key: &str) -> Result<()> {
    let (store, outcome) = service.peers(key)?;
    let criteria = service.settings().criteria();

    if output::is_json() {
        output::json_output(
            "peers",
            &json!({
                "store": store,
                "period": criteria.period,
                "tolerance": criteria.tolerance,
                "outcome": outcome,
            }),
        );
        return Ok(());
    }

    output::section(&format!("Peers of {} ({})", store.name, criteria.period));
    let set = match outcome {
        PeerOutcome::NoBaseline => {
            output::warning("no revenue in the reference period, nothing to compare");
            return Ok(());
        }
        PeerOutcome::Peers(set) => set,
    };

    let (low, high) = criteria.band(set.target_revenue);
    output::field("Revenue", output::man_won(set.target_revenue));
    output::field("Band", format!("{}만원 - {}만원", low.normalize(), high.normalize()));

    if set.is_empty() {
        output::note("(no stores within the band)");
        return Ok(());
    }

    let rows: Vec<PeerRow> = set
        .peers
        .iter()
        .map(|p| PeerRow {
            id: p.store.id.to_string(),
            name: p.store.name.clone(),
            revenue: output::man_won(p.revenue),
            distance: output::man_won(p.distance),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());
    Ok(())
}
