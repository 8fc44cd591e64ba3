//! Command dispatch.

use super::command::{Cli, Commands, ConfigCommand, DataArgs};
use super::output::{self, OutputConfig};
use super::{compare, config, insight, peers, profile, stores};
use crate::application::analysis::AnalysisService;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::factory::dataset::build_analysis_service;
use crate::infrastructure::factory::llm::build_insight_service;

/// Log level after applying `-q` and `-v` over the configured one.
fn log_level(config: &Config, cli: &Cli) -> String {
    match (cli.quiet, cli.verbose) {
        (true, _) => "error".into(),
        (false, 0) => config.logging.level.clone(),
        (false, 1) => "debug".into(),
        _ => "trace".into(),
    }
}

fn load(cli: &Cli, args: &DataArgs) -> Result<(Config, AnalysisService)> {
    let config = Config::load_or_default(&args.config)?;
    config.logging.clone().with_level(log_level(&config, cli)).init();
    let service = build_analysis_service(&config, args.data.as_deref())?;
    Ok((config, service))
}

/// Run the parsed command line.
///
/// # Errors
///
/// Returns the first error raised by configuration loading, dataset loading
/// or the command itself.
pub async fn execute(cli: &Cli) -> Result<()> {
    output::configure(OutputConfig::new(cli.json, cli.quiet, cli.verbose), &cli.color);

    match &cli.command {
        Commands::Stores(args) => {
            let (_, service) = load(cli, args)?;
            stores::execute(&service)
        }
        Commands::Peers(args) => {
            let (_, service) = load(cli, &args.data)?;
            peers::execute(&service, &args.store)
        }
        Commands::Compare(args) => {
            let (_, service) = load(cli, &args.data)?;
            compare::execute(&service, &args.store)
        }
        Commands::Profile(args) => {
            let (_, service) = load(cli, &args.data)?;
            profile::execute(&service, &args.store, args.year, args.through_month)
        }
        Commands::Insight(args) => {
            let (config, service) = load(cli, &args.data)?;
            let insights = build_insight_service(&config, args.local);
            insight::execute(&service, &insights, &args.store).await
        }
        Commands::Config(ConfigCommand::Init(args)) => config::execute_init(&args.path, args.force),
        Commands::Config(ConfigCommand::Show(args)) => config::execute_show(&args.config),
        Commands::Config(ConfigCommand::Validate(args)) => config::execute_validate(&args.config),
    }
}
