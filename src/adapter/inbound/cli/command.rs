//! Command-line interface definitions.
//!
//! Defines the CLI structure for storelens using `clap`. Every analysis
//! command loads the configuration, reads the dataset directory and reports
//! on one store or the whole roster.

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use super::paths;

/// Similar-store matching and comparative sales analytics
#[derive(Parser, Debug)]
#[command(name = "storelens")]
#[command(version)]
pub struct Cli {
    /// Color output mode [auto, always, never]
    #[arg(
        long,
        global = true,
        default_value = "auto",
        hide_possible_values = true
    )]
    pub color: ColorChoice,

    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase output verbosity
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Config file the command reads, if any.
    #[must_use]
    pub fn config_path(&self) -> Option<&Path> {
        match &self.command {
            Commands::Stores(args) => Some(args.config.as_path()),
            Commands::Peers(args) | Commands::Compare(args) => Some(args.data.config.as_path()),
            Commands::Profile(args) => Some(args.data.config.as_path()),
            Commands::Insight(args) => Some(args.data.config.as_path()),
            Commands::Config(ConfigCommand::Show(args) | ConfigCommand::Validate(args)) => {
                Some(args.config.as_path())
            }
            Commands::Config(ConfigCommand::Init(_)) => None,
        }
    }
}

/// Color output mode for terminal rendering.
#[derive(Clone, Debug, Default, clap::ValueEnum)]
pub enum ColorChoice {
    /// Detect automatically
    #[default]
    Auto,
    /// Always use colors
    Always,
    /// Never use colors
    Never,
}

/// Top-level subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List roster stores with their reference-period revenue
    Stores(DataArgs),

    /// Find stores with revenue similar to a store
    Peers(StoreArgs),

    /// Compare a store against its revenue peers
    Compare(StoreArgs),

    /// Year-over-year sales profile of a store
    Profile(ProfileArgs),

    /// Write a narrative insight for a store
    Insight(InsightArgs),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `storelens config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Generate a new configuration file from template.
    Init(ConfigInitArgs),
    /// Display the effective configuration with defaults applied.
    Show(ConfigPathArg),
    /// Validate a configuration file for correctness.
    Validate(ConfigPathArg),
}

/// Configuration and dataset location shared by analysis commands.
#[derive(Args, Debug)]
pub struct DataArgs {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,

    /// Dataset directory, overriding `[data].dir`.
    #[arg(long)]
    pub data: Option<PathBuf>,
}

/// Arguments for commands about one store.
#[derive(Args, Debug)]
pub struct StoreArgs {
    /// Store id (`ST-001`) or roster name.
    pub store: String,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Arguments for the `profile` subcommand.
#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Store id (`ST-001`) or roster name.
    pub store: String,

    /// Year of the profile window. Defaults to the months before the
    /// reference period.
    #[arg(long, requires = "through_month")]
    pub year: Option<i32>,

    /// Last month of the profile window (1-12).
    #[arg(long, requires = "year")]
    pub through_month: Option<u32>,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Arguments for the `insight` subcommand.
#[derive(Args, Debug)]
pub struct InsightArgs {
    /// Store id (`ST-001`) or roster name.
    pub store: String,

    /// Skip the LLM and use the local summary.
    #[arg(long)]
    pub local: bool,

    #[command(flatten)]
    pub data: DataArgs,
}

/// Shared argument struct for commands that require only a configuration path.
#[derive(Args, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long, default_value_os_t = paths::default_config())]
    pub config: PathBuf,
}

/// Arguments for the `config init` subcommand.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Output path for the generated configuration file.
    #[arg(default_value_os_t = paths::default_config())]
    pub path: PathBuf,

    /// Overwrite the file if it already exists.
    #[arg(long)]
    pub force: bool,
}
