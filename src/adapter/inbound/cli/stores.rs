//! Handler for the `stores` command.

use serde_json::json;
use tabled::{Table, Tabled};

use super::output;
use crate::application::analysis::AnalysisService;
use crate::error::Result;

#[derive(Tabled)]
struct StoreRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "Store")]
    name: String,
    #[tabled(rename = "Type")]
    category: String,
    #[tabled(rename = "Manager")]
    manager: String,
    #[tabled(rename = "Revenue")]
    revenue: String,
}

/// List roster stores with their reference-period revenue.
pub fn execute(service: &AnalysisService) -> Result<()> {
    let revenues = service.revenues();
    let period = service.settings().reference_period;
    let report = service.catalog().report();

    if output::is_json() {
        output::json_output(
            "stores",
            &json!({
                "period": period,
                "stores": revenues,
                "resolution": report,
            }),
        );
        return Ok(());
    }

    output::section(&format!("Stores ({period})"));
    let rows: Vec<StoreRow> = revenues
        .iter()
        .map(|r| StoreRow {
            id: r.store.id.to_string(),
            name: r.store.name.clone(),
            category: r.store.category.clone(),
            manager: r.store.manager.name.clone(),
            revenue: output::man_won(r.revenue),
        })
        .collect();
    output::lines(&Table::new(rows).to_string());

    if !report.unmatched.is_empty() {
        output::warning(&format!(
            "{} raw store names matched no roster store",
            report.unmatched.len()
        ));
        if output::verbosity() > 0 {
            for name in &report.unmatched {
                output::note(&format!("- {name}"));
            }
        }
    }
    if !report.ambiguous.is_empty() {
        output::warning(&format!(
            "{} raw store names matched several stores",
            report.ambiguous.len()
        ));
    }
    Ok(())
}
