//! datebot entry point.
//!
//! Binary name: `datebot`
//!
//! Loads `.env` (so it can supply `DATEBOT_CONFIG` and `RUST_LOG`), parses
//! CLI arguments, initializes tracing, then dispatches to the gateway runner
//! or one of the offline inspection commands.

mod cli;
mod state;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let dotenv = datebot_infra::config::load_dotenv();
    let cli = Cli::parse();

    if let Err(e) = datebot_observe::init_tracing(cli.otel, cli.default_filter()) {
        eprintln!("Warning: failed to initialize tracing: {e}");
    }

    match dotenv {
        Ok(Some(path)) => tracing::debug!("loaded environment from {}", path.display()),
        Ok(None) => {}
        Err(e) => tracing::warn!("failed to load .env: {e}"),
    }

    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(datebot_infra::config::default_config_path);

    let result = match cli.command {
        Commands::Run => cli::run::run(&config_path).await,
        Commands::Config => cli::config::show_config(&config_path, cli.json).await,
        Commands::Days { month, year, page } => cli::days::show_days(month, year, page, cli.json),
    };

    datebot_observe::shutdown_tracing();
    result
}
