//! Forecast command implementation
//!
//! Loads a forecast period, applies any command-line driver overrides, and
//! reports the Base/Bull/Bear scenarios.

use forecast_core::model::RevenueAggregator;
use forecast_core::types::input::parse_decimal;
use forecast_core::types::{ForecastError, ParameterSet, SentimentBounds};
use forecast_risk::scenarios::{ScenarioEngine, ScenarioKind};
use rust_decimal::Decimal;
use std::path::Path;
use tracing::{info, warn};

use crate::config::ModelSettings;
use crate::periods::load_parameter_set;
use crate::report::{render_scenarios, OutputFormat};
use crate::sentiment::{multipliers_from_feed, parse_month_pair};
use crate::{CliError, Result};

/// Options for the forecast command
#[derive(Debug, Clone, Default)]
pub struct ForecastOptions {
    /// Period file
    pub config: String,
    /// `base`, `bull`, `bear`, or `all`
    pub scenario: String,
    /// Sentiment feed CSV replacing the file's month-2/3 sentiment
    pub sentiment: Option<String>,
    /// Feed months for months 2 and 3 (`YYYY-MM,YYYY-MM`)
    pub sentiment_months: Option<String>,
    /// Month-2 notional override (billions)
    pub notional_m2: Option<String>,
    /// Month-3 notional override (billions)
    pub notional_m3: Option<String>,
    /// Take-rate override (fraction)
    pub take_rate: Option<String>,
    /// Output format
    pub format: String,
}

/// Run the forecast command
pub fn run(settings: &ModelSettings, options: &ForecastOptions) -> Result<()> {
    let format: OutputFormat = options.format.parse()?;
    let kinds = parse_scenarios(&options.scenario)?;
    let constants = settings.constants()?;

    info!("Running forecast...");
    info!("  Period file: {}", options.config);
    info!("  Scenarios: {}", options.scenario);

    let mut params = load_parameter_set(Path::new(&options.config), &constants.sentiment_bounds)?;
    apply_overrides(&mut params, options, &constants.sentiment_bounds)?;

    let engine = ScenarioEngine::new(RevenueAggregator::new(constants));
    let run = engine.run_kinds(&params, &kinds);

    println!("{}", render_scenarios(&params.period, &run, format)?);

    if let Some((kind, e)) = run.skipped.into_iter().next() {
        warn!("{} scenario could not be derived", kind.name());
        return Err(CliError::period(&options.config, e));
    }

    info!("Forecast complete");
    Ok(())
}

fn parse_scenarios(arg: &str) -> Result<Vec<ScenarioKind>> {
    if arg.eq_ignore_ascii_case("all") {
        return Ok(ScenarioKind::all().to_vec());
    }
    let kind = arg.parse::<ScenarioKind>().map_err(CliError::InvalidArgument)?;
    Ok(vec![kind])
}

fn parse_override(name: &str, value: Option<&str>) -> Result<Option<Decimal>> {
    value
        .map(|raw| parse_decimal(name, raw))
        .transpose()
        .map_err(|e| CliError::Forecast(e.into()))
}

/// Replace transaction drivers with command-line values.
///
/// Overrides require the period to carry transaction inputs and are
/// validated exactly like file input.
fn apply_overrides(
    params: &mut ParameterSet,
    options: &ForecastOptions,
    bounds: &SentimentBounds,
) -> Result<()> {
    let notional_m2 = parse_override("notional-m2", options.notional_m2.as_deref())?;
    let notional_m3 = parse_override("notional-m3", options.notional_m3.as_deref())?;
    let take_rate = parse_override("take-rate", options.take_rate.as_deref())?;

    let sentiment = match (&options.sentiment, &options.sentiment_months) {
        (Some(path), Some(months)) => Some(multipliers_from_feed(
            Path::new(path),
            parse_month_pair(months)?,
            bounds,
        )?),
        (None, None) => None,
        _ => {
            return Err(CliError::invalid_argument(
                "--sentiment and --sentiment-months must be given together",
            ))
        }
    };

    if notional_m2.is_none() && notional_m3.is_none() && take_rate.is_none() && sentiment.is_none() {
        return Ok(());
    }

    let txn = params
        .require_transactions_mut()
        .map_err(|e| CliError::Forecast(e.into()))?;
    if let Some(value) = notional_m2 {
        txn.notional_month2 = value;
    }
    if let Some(value) = notional_m3 {
        txn.notional_month3 = value;
    }
    if let Some(value) = take_rate {
        txn.take_rate = value;
    }
    if let Some(value) = sentiment {
        txn.sentiment = value;
    }

    params
        .validate()
        .map_err(|e| CliError::Forecast(ForecastError::from(e)))
}
