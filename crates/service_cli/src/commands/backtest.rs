//! Backtest command implementation
//!
//! Runs the model over historical period files and checks each computed
//! total against the published reference.

use forecast_core::model::RevenueAggregator;
use forecast_risk::backtest::BacktestValidator;
use std::path::Path;
use tracing::{error, info};

use crate::config::ModelSettings;
use crate::periods::load_backtest_record;
use crate::report::{render_backtest, OutputFormat};
use crate::{CliError, Result};

/// Run the backtest command
///
/// Every period is reported before the command fails; a period that cannot
/// be loaded counts as failed.
pub fn run(settings: &ModelSettings, configs: &[String], format: &str) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let constants = settings.constants()?;
    if configs.is_empty() {
        return Err(CliError::invalid_argument("at least one --config file is required"));
    }

    info!("Running backtest...");
    info!("  Periods: {}", configs.len());
    info!("  Tolerance: {}%", settings.tolerance_pct);

    let mut records = Vec::with_capacity(configs.len());
    let mut load_failures = 0;
    for config in configs {
        match load_backtest_record(Path::new(config), &constants.sentiment_bounds) {
            Ok(record) => records.push(record),
            Err(e) => {
                error!("{}", e);
                load_failures += 1;
            }
        }
    }

    let validator = BacktestValidator::new(RevenueAggregator::new(constants))
        .with_tolerance(settings.tolerance_pct);
    let batch = validator.run_batch(&records);

    println!("{}", render_backtest(&batch.reports, format)?);

    let failed = load_failures + batch.failures.len();
    if failed > 0 {
        return Err(CliError::BacktestFailed {
            failed,
            total: configs.len(),
        });
    }

    info!("Backtest complete: {} periods within tolerance", batch.len());
    Ok(())
}
