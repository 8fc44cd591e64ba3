use clap::Parser;
use tracing::debug;

use storelens::adapter::inbound::cli::command::Cli;
use storelens::adapter::inbound::cli::diagnostic;
use storelens::adapter::inbound::cli::run::execute;

#[tokio::main]
async fn main() {
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();

    if let Err(e) = execute(&cli).await {
        debug!(error = ?e, "command failed");
        diagnostic::report(&e, cli.config_path());
        std::process::exit(1);
    }
}
