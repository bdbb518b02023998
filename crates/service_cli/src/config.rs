//! Model settings management.
//!
//! Loads the model conventions and backtest tolerance from a TOML file with
//! environment variable override support. Period data lives in separate
//! files; see [`crate::periods`].

use forecast_core::model::{
    ModelConstants, DEFAULT_NOTIONAL_UNIT_SCALE, DEFAULT_QUARTER_FRACTION_DIVISOR,
    MAX_NOTIONAL_UNIT_SCALE,
};
use forecast_core::types::input::parse_decimal;
use forecast_core::types::sentiment::{DEFAULT_SENTIMENT_LOWER, DEFAULT_SENTIMENT_UPPER};
use forecast_core::types::{SentimentBounds, ANCHOR_SENTIMENT};
use forecast_risk::DEFAULT_TOLERANCE_PCT;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding `tolerance_pct`.
pub const ENV_TOLERANCE_PCT: &str = "REVCAST_TOLERANCE_PCT";
/// Environment variable overriding `sentiment_lower`.
pub const ENV_SENTIMENT_LOWER: &str = "REVCAST_SENTIMENT_LOWER";
/// Environment variable overriding `sentiment_upper`.
pub const ENV_SENTIMENT_UPPER: &str = "REVCAST_SENTIMENT_UPPER";

/// Model settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ModelSettings {
    /// Divisor turning an annual staking reward rate into one period's accrual
    #[serde(default = "default_quarter_fraction_divisor")]
    pub quarter_fraction_divisor: Decimal,

    /// Notional units to currency
    #[serde(default = "default_notional_unit_scale")]
    pub notional_unit_scale: Decimal,

    /// Lower sentiment clamp
    #[serde(default = "default_sentiment_lower")]
    pub sentiment_lower: Decimal,

    /// Upper sentiment clamp
    #[serde(default = "default_sentiment_upper")]
    pub sentiment_upper: Decimal,

    /// Backtest error bound in percent
    #[serde(default = "default_tolerance_pct")]
    pub tolerance_pct: Decimal,
}

fn default_quarter_fraction_divisor() -> Decimal {
    DEFAULT_QUARTER_FRACTION_DIVISOR
}

fn default_notional_unit_scale() -> Decimal {
    DEFAULT_NOTIONAL_UNIT_SCALE
}

fn default_sentiment_lower() -> Decimal {
    DEFAULT_SENTIMENT_LOWER
}

fn default_sentiment_upper() -> Decimal {
    DEFAULT_SENTIMENT_UPPER
}

fn default_tolerance_pct() -> Decimal {
    DEFAULT_TOLERANCE_PCT
}

impl Default for ModelSettings {
    fn default() -> Self {
        Self {
            quarter_fraction_divisor: default_quarter_fraction_divisor(),
            notional_unit_scale: default_notional_unit_scale(),
            sentiment_lower: default_sentiment_lower(),
            sentiment_upper: default_sentiment_upper(),
            tolerance_pct: default_tolerance_pct(),
        }
    }
}

impl ModelSettings {
    /// Load settings from a TOML file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| SettingsError::Io(format!("{}: {}", path.display(), e)))?;

        toml::from_str(&content)
            .map_err(|e| SettingsError::Parse(format!("{}: {}", path.display(), e)))
    }

    /// Load settings from `path`, or defaults when the file does not exist
    ///
    /// A file that exists but cannot be read or parsed is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self, SettingsError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(self) -> Result<Self, SettingsError> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary key lookup
    pub fn with_overrides_from<F>(mut self, lookup: F) -> Result<Self, SettingsError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| -> Result<Option<Decimal>, SettingsError> {
            lookup(key)
                .map(|raw| parse_decimal(key, &raw).map_err(|e| SettingsError::Parse(e.to_string())))
                .transpose()
        };

        if let Some(tolerance) = read(ENV_TOLERANCE_PCT)? {
            self.tolerance_pct = tolerance;
        }
        if let Some(lower) = read(ENV_SENTIMENT_LOWER)? {
            self.sentiment_lower = lower;
        }
        if let Some(upper) = read(ENV_SENTIMENT_UPPER)? {
            self.sentiment_upper = upper;
        }
        Ok(self)
    }

    /// Validate the settings, collecting every problem
    pub fn validate(&self) -> Result<(), SettingsError> {
        let mut errors = Vec::new();

        if self.quarter_fraction_divisor < Decimal::ONE {
            errors.push(format!(
                "quarter_fraction_divisor must be at least 1, got {}",
                self.quarter_fraction_divisor
            ));
        }

        if self.notional_unit_scale <= Decimal::ZERO
            || self.notional_unit_scale > MAX_NOTIONAL_UNIT_SCALE
        {
            errors.push(format!(
                "notional_unit_scale must be in (0, {}], got {}",
                MAX_NOTIONAL_UNIT_SCALE, self.notional_unit_scale
            ));
        }

        if self.sentiment_lower < DEFAULT_SENTIMENT_LOWER
            || self.sentiment_lower > ANCHOR_SENTIMENT
            || self.sentiment_upper < ANCHOR_SENTIMENT
            || self.sentiment_upper > DEFAULT_SENTIMENT_UPPER
        {
            errors.push(format!(
                "sentiment bounds [{}, {}] must satisfy {} <= sentiment_lower <= 1.00 <= sentiment_upper <= {}",
                self.sentiment_lower,
                self.sentiment_upper,
                DEFAULT_SENTIMENT_LOWER,
                DEFAULT_SENTIMENT_UPPER
            ));
        }

        if self.tolerance_pct < Decimal::ZERO {
            errors.push(format!(
                "tolerance_pct must be non-negative, got {}",
                self.tolerance_pct
            ));
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(SettingsError::Validation(errors))
        }
    }

    /// Load from file (or defaults) with environment overrides and validate
    pub fn load_with_env_and_validate(path: &Path) -> Result<Self, SettingsError> {
        let settings = Self::load_or_default(path)?.with_env_override()?;
        settings.validate()?;
        Ok(settings)
    }

    /// Model constants for the aggregator and scenario engine
    pub fn constants(&self) -> Result<ModelConstants, SettingsError> {
        let bounds = SentimentBounds::new(self.sentiment_lower, self.sentiment_upper)
            .map_err(|e| SettingsError::Validation(vec![e.to_string()]))?;

        let constants = ModelConstants {
            quarter_fraction_divisor: self.quarter_fraction_divisor,
            notional_unit_scale: self.notional_unit_scale,
            sentiment_bounds: bounds,
        };
        constants
            .validate()
            .map_err(|e| SettingsError::Validation(vec![e.to_string()]))?;
        Ok(constants)
    }
}

/// Settings error type
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// IO error reading the settings file
    #[error("IO error: {0}")]
    Io(String),

    /// Parse error in the settings file or an override
    #[error("Parse error: {0}")]
    Parse(String),

    /// Validation errors
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
