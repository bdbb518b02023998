//! Period file loading.
//!
//! A period file is a flat TOML table of driver keys. Numbers may be written
//! as TOML integers, floats, or strings; each is handed to the model as
//! decimal text, so `0.054` stays exactly `0.054`.

use forecast_core::types::{
    ConfigurationError, FlatInput, ParameterSet, SentimentBounds,
};
use forecast_risk::backtest::BacktestRecord;
use std::path::Path;
use toml::Value;

use crate::{CliError, Result};

/// Read a period file into flat input.
pub fn read_flat_input(path: &Path) -> Result<FlatInput> {
    let display = path.display().to_string();
    if !path.exists() {
        return Err(CliError::FileNotFound(display));
    }

    let content = std::fs::read_to_string(path)?;
    let table: toml::Table = content.parse().map_err(|e: toml::de::Error| CliError::PeriodSyntax {
        path: display.clone(),
        message: e.message().to_string(),
    })?;

    let mut input = FlatInput::default();
    for (key, value) in table {
        let text = scalar_text(&key, value).map_err(|e| CliError::period(&display, e))?;
        input.insert(key, text);
    }
    Ok(input)
}

/// Load a forecast parameter set.
pub fn load_parameter_set(path: &Path, bounds: &SentimentBounds) -> Result<ParameterSet> {
    let input = read_flat_input(path)?;
    ParameterSet::from_flat(input, bounds).map_err(|e| CliError::period(path.display().to_string(), e))
}

/// Load a backtest record (a parameter set plus `reference_total`).
pub fn load_backtest_record(path: &Path, bounds: &SentimentBounds) -> Result<BacktestRecord> {
    let input = read_flat_input(path)?;
    BacktestRecord::from_flat(input, bounds).map_err(|e| CliError::period(path.display().to_string(), e))
}

fn scalar_text(key: &str, value: Value) -> std::result::Result<String, ConfigurationError> {
    match value {
        Value::String(s) => Ok(s),
        Value::Integer(i) => Ok(i.to_string()),
        Value::Float(f) if f.is_finite() => Ok(f.to_string()),
        other => Err(ConfigurationError::malformed(
            key,
            other.to_string(),
            format!("expected a number or string, found {}", other.type_str()),
        )),
    }
}
