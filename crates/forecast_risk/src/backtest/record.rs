//! Backtest records.

use forecast_core::types::{
    FlatInput, ForecastError, ParameterSet, SentimentBounds, ValidationError, MAX_AMOUNT,
};
use rust_decimal::Decimal;
use serde::Serialize;

/// Key holding the published total in flat input.
pub const REFERENCE_TOTAL_KEY: &str = "reference_total";

/// A historical period's drivers and its published total.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BacktestRecord {
    parameters: ParameterSet,
    reference_total: Decimal,
}

impl BacktestRecord {
    /// Pair drivers with a reference total.
    ///
    /// # Errors
    ///
    /// [`ValidationError::ZeroReferenceTotal`] when the reference is zero,
    /// [`ValidationError::ValueOutOfRange`] when its magnitude exceeds
    /// [`MAX_AMOUNT`].
    pub fn new(parameters: ParameterSet, reference_total: Decimal) -> Result<Self, ValidationError> {
        if reference_total.is_zero() {
            return Err(ValidationError::ZeroReferenceTotal(parameters.period));
        }
        if reference_total.abs() > MAX_AMOUNT {
            return Err(ValidationError::out_of_range(
                REFERENCE_TOTAL_KEY,
                reference_total,
                MAX_AMOUNT,
            ));
        }
        Ok(Self {
            parameters,
            reference_total,
        })
    }

    /// Read a record from flat input.
    ///
    /// Same keys as [`ParameterSet::from_flat`] plus `reference_total`.
    /// Configuration errors (missing, malformed, or unknown keys) take
    /// precedence over validation errors.
    pub fn from_flat(mut input: FlatInput, bounds: &SentimentBounds) -> Result<Self, ForecastError> {
        let parameters = match ParameterSet::read(&mut input, bounds) {
            Err(e) if e.is_configuration() => return Err(e),
            other => other,
        };
        let reference_total = input.decimal(REFERENCE_TOTAL_KEY)?;
        input.finish()?;

        Ok(Self::new(parameters?, reference_total)?)
    }

    /// Period label.
    pub fn period(&self) -> &str {
        &self.parameters.period
    }

    /// Drivers.
    pub fn parameters(&self) -> &ParameterSet {
        &self.parameters
    }

    /// Published total.
    pub fn reference_total(&self) -> Decimal {
        self.reference_total
    }
}
