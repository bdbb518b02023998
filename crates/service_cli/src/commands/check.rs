//! Check command implementation
//!
//! Validates model settings and period files without producing a forecast.
//! A file carrying `reference_total` is checked as a backtest record, any
//! other as a forecast period.

use forecast_core::types::{ParameterSet, SentimentBounds};
use forecast_risk::backtest::{BacktestRecord, REFERENCE_TOTAL_KEY};
use std::path::Path;
use tracing::{error, info};

use crate::config::ModelSettings;
use crate::periods::read_flat_input;
use crate::{CliError, Result};

/// Run the check command
pub fn run(settings: &ModelSettings, configs: &[String]) -> Result<()> {
    settings.validate()?;
    let constants = settings.constants()?;

    info!("Checking configuration...");
    info!(
        "  Sentiment bounds: [{}, {}]",
        constants.sentiment_bounds.lower(),
        constants.sentiment_bounds.upper()
    );
    info!("  Tolerance: {}%", settings.tolerance_pct);

    let mut failed = 0;
    for config in configs {
        match check_file(Path::new(config), &constants.sentiment_bounds) {
            Ok(kind) => info!("  ✓ {} ({})", config, kind),
            Err(e) => {
                error!("  ✗ {}", e);
                failed += 1;
            }
        }
    }

    if failed > 0 {
        return Err(CliError::CheckFailed {
            failed,
            total: configs.len(),
        });
    }

    info!("All checks passed");
    Ok(())
}

/// Load one file and name what it was checked as.
fn check_file(path: &Path, bounds: &SentimentBounds) -> Result<&'static str> {
    let input = read_flat_input(path)?;
    let display = path.display().to_string();

    if input.contains(REFERENCE_TOTAL_KEY) {
        BacktestRecord::from_flat(input, bounds).map_err(|e| CliError::period(display, e))?;
        Ok("backtest")
    } else {
        ParameterSet::from_flat(input, bounds).map_err(|e| CliError::period(display, e))?;
        Ok("forecast")
    }
}
