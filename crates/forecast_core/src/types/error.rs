//! Error types for structured error handling.
//!
//! This module provides:
//! - `ConfigurationError`: missing, malformed, or unknown input fields
//! - `ValidationError`: well-typed values that violate a model invariant
//! - `BacktestToleranceExceeded`: a backtest outside the error bound
//! - `ForecastError`: umbrella type for callers that handle all three
//!
//! None of these are raised by the calculators or the aggregator; only the
//! boundary (intake, scenario derivation, tolerance check) produces them.

use rust_decimal::Decimal;
use serde::Serialize;
use thiserror::Error;

/// Input field errors, raised before any calculation runs.
///
/// # Examples
/// ```
/// use forecast_core::types::ConfigurationError;
///
/// let err = ConfigurationError::MissingField("fiat_rate".to_string());
/// assert_eq!(format!("{}", err), "missing required field `fiat_rate`");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// A required key is absent.
    #[error("missing required field `{0}`")]
    MissingField(String),

    /// A key is present but its value cannot be read as the expected type.
    #[error("malformed value for `{field}`: {value:?} ({reason})")]
    MalformedValue {
        /// Offending key
        field: String,
        /// Raw value as supplied
        value: String,
        /// What was expected
        reason: String,
    },

    /// A key the model does not know about.
    #[error("unknown field `{0}`")]
    UnknownField(String),

    /// An optional group was only partly supplied.
    #[error("incomplete `{section}` section, missing: {}", missing.join(", "))]
    IncompleteSection {
        /// Group name
        section: String,
        /// Keys of the group that were not supplied
        missing: Vec<String>,
    },
}

impl ConfigurationError {
    /// Create a malformed value error.
    pub fn malformed(
        field: impl Into<String>,
        value: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::MalformedValue {
            field: field.into(),
            value: value.into(),
            reason: reason.into(),
        }
    }
}

/// Invariant violations on well-typed input.
///
/// Recoverable at the caller level: a batch can skip the offending period or
/// scenario and continue with the others.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Sentiment multiplier outside the clamp bounds.
    #[error("sentiment for month {month} is {value}, outside [{lower}, {upper}]")]
    SentimentOutOfBounds {
        /// Month index within the quarter (1-based)
        month: u8,
        /// Supplied multiplier
        value: Decimal,
        /// Lower bound
        lower: Decimal,
        /// Upper bound
        upper: Decimal,
    },

    /// Month-1 sentiment differs from the anchor value.
    #[error("month 1 sentiment must be exactly 1.00, got {0}")]
    AnchorSentiment(Decimal),

    /// A field that must be non-negative is negative.
    #[error("`{field}` must be non-negative, got {value}")]
    NegativeValue {
        /// Field name
        field: String,
        /// Supplied value
        value: Decimal,
    },

    /// The operation needs transaction inputs but the parameter set has none.
    #[error("parameter set `{0}` has no transaction inputs")]
    MissingTransactionInputs(String),

    /// A backtest reference total of zero cannot anchor a percentage error.
    #[error("reference total for `{0}` must be non-zero")]
    ZeroReferenceTotal(String),

    /// A driver larger than the model accepts.
    #[error("`{field}` is {value}, beyond the accepted magnitude {max}")]
    ValueOutOfRange {
        /// Field name
        field: String,
        /// Supplied value
        value: Decimal,
        /// Largest accepted magnitude
        max: Decimal,
    },

    /// A model constant outside its accepted range.
    #[error("model constant `{name}` is {value}, expected {expected}")]
    InvalidConstant {
        /// Constant name
        name: String,
        /// Supplied value
        value: Decimal,
        /// Accepted range
        expected: String,
    },

    /// Clamp bounds that do not bracket the anchor or widen [0.95, 1.05].
    #[error("sentiment bounds [{lower}, {upper}] must satisfy 0.95 <= lower <= 1.00 <= upper <= 1.05")]
    InvalidBounds {
        /// Lower bound
        lower: Decimal,
        /// Upper bound
        upper: Decimal,
    },
}

impl ValidationError {
    /// Create a negative value error.
    pub fn negative(field: impl Into<String>, value: Decimal) -> Self {
        Self::NegativeValue {
            field: field.into(),
            value,
        }
    }

    /// Create an out-of-range error.
    pub fn out_of_range(field: impl Into<String>, value: Decimal, max: Decimal) -> Self {
        Self::ValueOutOfRange {
            field: field.into(),
            value,
            max,
        }
    }
}

/// Backtest whose computed total deviates from the reference beyond tolerance.
///
/// Carries everything needed to report the breach without re-running the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error(
    "backtest `{period}` out of tolerance: computed {computed_total}, reference {reference_total}, error {error_pct}% (bound {tolerance_pct}%)"
)]
pub struct BacktestToleranceExceeded {
    /// Period label
    pub period: String,
    /// Model output
    pub computed_total: Decimal,
    /// Ground truth
    pub reference_total: Decimal,
    /// Signed error in percent of the reference
    pub error_pct: Decimal,
    /// Absolute bound in percent
    pub tolerance_pct: Decimal,
}

/// Umbrella error for the forecast engine.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ForecastError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Backtest tolerance breach
    #[error("Backtest tolerance exceeded: {0}")]
    BacktestToleranceExceeded(#[from] BacktestToleranceExceeded),
}

impl ForecastError {
    /// Returns true for errors that abort the period before computation.
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::Configuration(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_missing_field_display() {
        let err = ConfigurationError::MissingField("custody_auc".to_string());
        assert!(err.to_string().contains("custody_auc"));
    }

    #[test]
    fn test_incomplete_section_lists_keys() {
        let err = ConfigurationError::IncompleteSection {
            section: "transactions".to_string(),
            missing: vec!["txn_take_rate".to_string(), "sentiment_m3".to_string()],
        };
        let display = err.to_string();
        assert!(display.contains("txn_take_rate, sentiment_m3"));
    }

    #[test]
    fn test_tolerance_breach_display_carries_fields() {
        let err = BacktestToleranceExceeded {
            period: "Q1 2025".to_string(),
            computed_total: dec!(341565000),
            reference_total: dec!(340000000),
            error_pct: dec!(0.46),
            tolerance_pct: dec!(0.05),
        };
        let display = err.to_string();
        assert!(display.contains("341565000"));
        assert!(display.contains("340000000"));
        assert!(display.contains("0.46"));
    }

    #[test]
    fn test_forecast_error_from_conversions() {
        let err: ForecastError = ConfigurationError::UnknownField("fee_bps".into()).into();
        assert!(err.is_configuration());

        let err: ForecastError = ValidationError::AnchorSentiment(dec!(1.01)).into();
        assert!(!err.is_configuration());
        assert!(err.to_string().starts_with("Validation error"));
    }
}
