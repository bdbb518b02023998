//! Sensitivity command implementation
//!
//! Sweeps take-rate or notional over a symmetric grid, or both drivers over
//! a two-parameter grid with `--cross`.

use forecast_core::model::RevenueAggregator;
use forecast_core::types::input::parse_decimal;
use forecast_core::types::MAX_RATE;
use forecast_risk::sensitivity::{symmetric_grid, SensitivitySweep, SweepTarget};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::info;

use crate::config::ModelSettings;
use crate::periods::load_parameter_set;
use crate::report::{render_grid, render_sensitivity, OutputFormat};
use crate::{CliError, Result};

/// Upper limit on grid points per side.
const MAX_POINTS_PER_SIDE: usize = 50;

/// Run the sensitivity command
pub fn run(
    settings: &ModelSettings,
    config: &str,
    target: &str,
    step: Option<&str>,
    points: usize,
    cross: bool,
    format: &str,
) -> Result<()> {
    let format: OutputFormat = format.parse()?;
    let target: SweepTarget = target.parse().map_err(CliError::InvalidArgument)?;
    let step = resolve_step(target, step)?;
    if points > MAX_POINTS_PER_SIDE {
        return Err(CliError::invalid_argument(format!(
            "--points {} exceeds maximum allowed ({})",
            points, MAX_POINTS_PER_SIDE
        )));
    }
    let constants = settings.constants()?;

    info!("Running sensitivity sweep...");
    info!("  Period file: {}", config);
    info!("  Target: {} (step {}, {} points per side)", target, step, points);

    let base = load_parameter_set(Path::new(config), &constants.sentiment_bounds)?;
    let sweep = SensitivitySweep::new(RevenueAggregator::new(constants));
    let grid = symmetric_grid(step, points);

    let output = if cross {
        let other = other_target(target);
        let other_grid = symmetric_grid(other.default_step(), points);
        let result = sweep
            .sweep_grid(&base, (target, grid.as_slice()), (other, other_grid.as_slice()))
            .map_err(|e| CliError::period(config, e))?;
        render_grid(&result, format)?
    } else {
        let table = sweep
            .sweep(&base, target, &grid)
            .map_err(|e| CliError::period(config, e))?;
        render_sensitivity(&table, format)?
    };

    println!("{}", output);
    info!("Sensitivity sweep complete");
    Ok(())
}

fn resolve_step(target: SweepTarget, step: Option<&str>) -> Result<Decimal> {
    let step = match step {
        Some(raw) => parse_decimal("step", raw).map_err(|e| CliError::Forecast(e.into()))?,
        None => target.default_step(),
    };
    if step <= Decimal::ZERO {
        return Err(CliError::invalid_argument(format!(
            "--step must be positive, got {}",
            step
        )));
    }
    if step > MAX_RATE {
        return Err(CliError::invalid_argument(format!(
            "--step {} exceeds maximum allowed ({})",
            step, MAX_RATE
        )));
    }
    Ok(step)
}

fn other_target(target: SweepTarget) -> SweepTarget {
    match target {
        SweepTarget::TakeRate => SweepTarget::Notional,
        SweepTarget::Notional => SweepTarget::TakeRate,
    }
}
