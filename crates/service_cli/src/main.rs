//! revcast - Quarterly Revenue Forecast CLI
//!
//! Operational entry point for the forecast engine.
//!
//! # Commands
//!
//! - `revcast backtest --config <file>...` - Validate the model against historical quarters
//! - `revcast forecast --config <file>` - Forecast a quarter under Base/Bull/Bear scenarios
//! - `revcast sensitivity --config <file> --target <driver>` - Sweep a transaction driver
//! - `revcast check --config <file>...` - Validate settings and period files
//!
//! # Configuration
//!
//! Model settings are read from `--settings` (default `forecast.toml`; a
//! missing file means defaults) and may be overridden through
//! `REVCAST_TOLERANCE_PCT`, `REVCAST_SENTIMENT_LOWER` and
//! `REVCAST_SENTIMENT_UPPER`. Log verbosity follows `RUST_LOG`, with
//! `--verbose` raising the default level to debug.

use clap::{Parser, Subcommand};
use std::path::Path;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod commands;
mod config;
mod error;
mod periods;
mod report;
mod sentiment;

pub use error::{CliError, Result};

use commands::forecast::ForecastOptions;
use config::ModelSettings;

/// Quarterly revenue forecast CLI
#[derive(Parser)]
#[command(name = "revcast")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Model settings file path
    #[arg(long, global = true, default_value = "forecast.toml")]
    settings: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate the model against historical quarters
    Backtest {
        /// Period files carrying `reference_total`
        #[arg(short, long, required = true, num_args = 1..)]
        config: Vec<String>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Forecast a quarter under Base/Bull/Bear scenarios
    Forecast {
        /// Period file
        #[arg(short, long)]
        config: String,

        /// Scenario to run (base, bull, bear, all)
        #[arg(short, long, default_value = "all")]
        scenario: String,

        /// Monthly sentiment feed CSV (month,sentiment_factor)
        #[arg(long, requires = "sentiment_months")]
        sentiment: Option<String>,

        /// Feed months for months 2 and 3 (YYYY-MM,YYYY-MM)
        #[arg(long, requires = "sentiment")]
        sentiment_months: Option<String>,

        /// Month-2 notional override (billions)
        #[arg(long)]
        notional_m2: Option<String>,

        /// Month-3 notional override (billions)
        #[arg(long)]
        notional_m3: Option<String>,

        /// Take-rate override (fraction, e.g. 0.0025)
        #[arg(long)]
        take_rate: Option<String>,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Sweep a transaction driver around a forecast period
    Sensitivity {
        /// Period file
        #[arg(short, long)]
        config: String,

        /// Driver to sweep (take-rate, notional)
        #[arg(short, long, default_value = "take-rate")]
        target: String,

        /// Step between grid points (driver default when omitted)
        #[arg(long)]
        step: Option<String>,

        /// Grid points on each side of the base case
        #[arg(short = 'n', long, default_value = "1")]
        points: usize,

        /// Sweep both drivers over a two-parameter grid
        #[arg(long)]
        cross: bool,

        /// Output format (table, json, csv)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Validate settings and period files
    Check {
        /// Period files to validate
        #[arg(short, long, num_args = 0..)]
        config: Vec<String>,
    },
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };
    let filter = EnvFilter::builder()
        .with_default_directive(default_level.into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn dispatch(cli: Cli) -> Result<()> {
    let settings = ModelSettings::load_with_env_and_validate(Path::new(&cli.settings))?;

    match cli.command {
        Commands::Backtest { config, format } => commands::backtest::run(&settings, &config, &format),
        Commands::Forecast {
            config,
            scenario,
            sentiment,
            sentiment_months,
            notional_m2,
            notional_m3,
            take_rate,
            format,
        } => commands::forecast::run(
            &settings,
            &ForecastOptions {
                config,
                scenario,
                sentiment,
                sentiment_months,
                notional_m2,
                notional_m3,
                take_rate,
                format,
            },
        ),
        Commands::Sensitivity {
            config,
            target,
            step,
            points,
            cross,
            format,
        } => commands::sensitivity::run(
            &settings,
            &config,
            &target,
            step.as_deref(),
            points,
            cross,
            &format,
        ),
        Commands::Check { config } => commands::check::run(&settings, &config),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match dispatch(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_forecast_defaults() {
        let cli = Cli::try_parse_from(["revcast", "forecast", "-c", "configs/q3_2025.toml"]).unwrap();
        assert_eq!(cli.settings, "forecast.toml");
        match cli.command {
            Commands::Forecast {
                scenario, format, sentiment, ..
            } => {
                assert_eq!(scenario, "all");
                assert_eq!(format, "table");
                assert!(sentiment.is_none());
            }
            _ => panic!("Expected forecast command"),
        }
    }

    #[test]
    fn test_sentiment_flags_require_each_other() {
        let result = Cli::try_parse_from([
            "revcast",
            "forecast",
            "-c",
            "q3.toml",
            "--sentiment",
            "data/sentiment_monthly.csv",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_backtest_many_configs() {
        let cli = Cli::try_parse_from([
            "revcast",
            "--verbose",
            "backtest",
            "-c",
            "q1.toml",
            "q2.toml",
            "--format",
            "json",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Commands::Backtest { config, format } => {
                assert_eq!(config, vec!["q1.toml", "q2.toml"]);
                assert_eq!(format, "json");
            }
            _ => panic!("Expected backtest command"),
        }
    }

    #[test]
    fn test_parse_sensitivity() {
        let cli = Cli::try_parse_from([
            "revcast",
            "sensitivity",
            "-c",
            "q3.toml",
            "-t",
            "notional",
            "-n",
            "3",
            "--cross",
        ])
        .unwrap();
        match cli.command {
            Commands::Sensitivity {
                target, points, cross, step, ..
            } => {
                assert_eq!(target, "notional");
                assert_eq!(points, 3);
                assert!(cross);
                assert!(step.is_none());
            }
            _ => panic!("Expected sensitivity command"),
        }
    }
}
