//! Handler for the `config` command group.

use std::fs;
use std::path::Path;

use serde_json::json;

use super::output;
use crate::error::{ConfigError, Result};
use crate::infrastructure::config::settings::Config;

/// Default config template with documentation.
const CONFIG_TEMPLATE: &str = include_str!("../../../../config.toml.example");

/// Execute `config init`.
pub fn execute_init(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        return Err(ConfigError::InvalidValue {
            field: "config",
            reason: "file already exists (use --force to overwrite)".to_string(),
        }
        .into());
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    fs::write(path, CONFIG_TEMPLATE)?;
    if output::is_json() {
        output::json_output("config.init", &json!({ "path": path.display().to_string() }));
        return Ok(());
    }
    output::section("Config Initialized");
    output::success("Created configuration file");
    output::field("Path", path.display());
    output::section("Next Steps");
    output::note(&format!("1. Edit {} with your settings", path.display()));
    output::note("2. Set GEMINI_API_KEY for LLM insights (optional)");
    output::note(&format!("3. Run: storelens config validate -c {}", path.display()));
    output::note(&format!("4. Run: storelens stores -c {}", path.display()));
    Ok(())
}

/// Execute `config show`.
pub fn execute_show(path: &Path) -> Result<()> {
    let config = Config::load_or_default(path)?;

    if output::is_json() {
        output::json_output(
            "config.show",
            &json!({
                "path": path.display().to_string(),
                "exists": path.exists(),
                "logging": { "level": config.logging.level, "format": config.logging.format },
                "data": {
                    "dir": config.data.dir.display().to_string(),
                    "transactions_file": config.data.transactions_file,
                    "inventory_file": config.data.inventory_file,
                    "roster_file": config.data.roster_file,
                    "competitors_file": config.data.competitors_file,
                },
                "analysis": {
                    "reference_period": config.analysis.reference_period,
                    "tolerance": config.analysis.tolerance,
                    "max_peers": config.analysis.max_peers,
                    "low_inventory_ratio": config.analysis.low_inventory_ratio,
                    "containment_fallback": config.analysis.containment_fallback,
                    "own_brand": config.analysis.own_brand,
                },
                "aliases": config.aliases,
                "llm": {
                    "enabled": config.llm.enabled,
                    "models": config.llm.models,
                    "api_key_loaded": api_key_loaded(),
                },
            }),
        );
        return Ok(());
    }

    output::section("Effective Configuration");
    output::field("Path", path.display());
    if !path.exists() {
        output::note("(file not found, showing defaults)");
    }

    output::section("Data");
    output::field("Directory", config.data.dir.display());
    output::field("Transactions", &config.data.transactions_file);
    output::field("Inventory", &config.data.inventory_file);
    output::field("Roster", &config.data.roster_file);
    output::field("Competitors", &config.data.competitors_file);

    output::section("Analysis");
    output::field("Period", &config.analysis.reference_period);
    output::field(
        "Tolerance",
        format!("±{}%", (config.analysis.tolerance * rust_decimal::Decimal::ONE_HUNDRED).normalize()),
    );
    output::field("Max peers", config.analysis.max_peers);
    output::field("Low inventory", config.analysis.low_inventory_ratio);
    output::field(
        "Containment",
        if config.analysis.containment_fallback {
            "enabled"
        } else {
            "disabled"
        },
    );
    output::field("Own brand", &config.analysis.own_brand);
    output::field("Aliases", format!("{} stores", config.aliases.len()));

    output::section("LLM");
    output::field("Enabled", if config.llm.enabled { "yes" } else { "no" });
    output::field("Models", config.llm.models.join(", "));
    if api_key_loaded() {
        output::success("API key loaded from GEMINI_API_KEY");
    } else {
        output::warning("GEMINI_API_KEY not set, insights use the local summary");
    }

    Ok(())
}

/// Execute `config validate`.
pub fn execute_validate(path: &Path) -> Result<()> {
    let config = Config::load(path)?;

    if output::is_json() {
        output::json_output(
            "config.validate",
            &json!({ "path": path.display().to_string(), "valid": true }),
        );
        return Ok(());
    }

    output::section("Config Validation");
    output::field("Path", path.display());
    output::success("Configuration is valid");
    if !config.data.dir.exists() {
        output::warning(&format!(
            "data directory {} does not exist",
            config.data.dir.display()
        ));
    }
    Ok(())
}

fn api_key_loaded() -> bool {
    std::env::var(crate::adapter::outbound::llm::gemini::API_KEY_ENV)
        .is_ok_and(|key| !key.trim().is_empty())
}
