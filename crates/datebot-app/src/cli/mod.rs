//! CLI command definitions for the `datebot` binary.

pub mod config;
pub mod days;
pub mod run;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use datebot_types::month::Month;

/// Discord bot that walks members through picking a date and sends them the
/// matching `/set` command.
#[derive(Parser)]
#[command(name = "datebot", version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output machine-readable JSON instead of styled text.
    #[arg(long, global = true)]
    pub json: bool,

    /// Suppress all log output except errors.
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Detailed output (-v for debug, -vv for trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Path to config.toml (defaults to the platform config directory).
    #[arg(long, global = true, env = datebot_infra::config::CONFIG_PATH_VAR)]
    pub config: Option<PathBuf>,

    /// Export spans to stdout through OpenTelemetry.
    #[arg(long, global = true)]
    pub otel: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Connect to Discord and serve until Ctrl+C.
    Run,

    /// Print the effective configuration (token redacted).
    Config,

    /// Preview one page of the day menu for a month.
    Days {
        /// Month number (1-12).
        month: Month,

        /// Calendar year (defaults to the current year).
        #[arg(long)]
        year: Option<i32>,

        /// Page to render (clamped to the month's page range).
        #[arg(long, default_value_t = 1)]
        page: u32,
    },
}

impl Cli {
    /// Log filter used when `RUST_LOG` is unset.
    pub fn default_filter(&self) -> &'static str {
        match self.verbose {
            0 if self.quiet => "error",
            0 => "warn,datebot=info,datebot_core=info,datebot_infra=info",
            1 => "warn,datebot=debug,datebot_core=debug,datebot_infra=debug",
            _ => "trace",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn days_accepts_month_number_and_flags() {
        let cli = Cli::try_parse_from(["datebot", "days", "2", "--year", "2024", "--page", "2"])
            .unwrap();
        match cli.command {
            Commands::Days { month, year, page } => {
                assert_eq!(month.number(), 2);
                assert_eq!(year, Some(2024));
                assert_eq!(page, 2);
            }
            _ => panic!("expected days command"),
        }
    }

    #[test]
    fn days_rejects_invalid_month() {
        assert!(Cli::try_parse_from(["datebot", "days", "13"]).is_err());
    }

    #[test]
    fn verbosity_selects_filter() {
        let quiet = Cli::try_parse_from(["datebot", "--quiet", "config"]).unwrap();
        assert_eq!(quiet.default_filter(), "error");

        let verbose = Cli::try_parse_from(["datebot", "-vv", "run"]).unwrap();
        assert_eq!(verbose.default_filter(), "trace");

        let normal = Cli::try_parse_from(["datebot", "run"]).unwrap();
        assert!(normal.default_filter().contains("datebot_core=info"));
    }

    #[test]
    fn config_path_env_is_read_by_the_cli() {
        let command = Cli::command();
        let arg = command
            .get_arguments()
            .find(|arg| arg.get_id() == "config")
            .unwrap();
        assert_eq!(
            arg.get_env(),
            Some(std::ffi::OsStr::new(datebot_infra::config::CONFIG_PATH_VAR))
        );
    }

    #[test]
    fn global_flags_follow_subcommand() {
        let cli = Cli::try_parse_from(["datebot", "config", "--json", "--config", "/tmp/x.toml"])
            .unwrap();
        assert!(cli.json);
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/x.toml")));
    }
}
