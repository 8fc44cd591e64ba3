//! Handler for the `insight` command.

use super::output;
use crate::application::analysis::AnalysisService;
use crate::application::insight::service::{InsightOutcome, InsightService};
use crate::error::Result;

/// Render a narrative insight for one store.
pub async fn execute(service: &AnalysisService, insights: &InsightService, key: &str) -> Result<()> {
    let payload = service.insight_payload(key)?;
    let store = payload.store_name.clone();
    let outcome = insights.request(payload).await;

    if output::is_json() {
        output::json_output("insight", &outcome);
        return Ok(());
    }

    match outcome {
        InsightOutcome::Rendered { text, renderer } => {
            output::section(&format!("{store} insight"));
            output::note(&format!("via {renderer}"));
            output::body(&text);
        }
        InsightOutcome::Superseded { .. } => {
            output::warning("request superseded by a newer one");
        }
    }
    Ok(())
}
