//! Named model constants.
//!
//! The aggregator and scenario code read these from an explicit value rather
//! than from module-level globals, so tests can run the model under any
//! convention.

use crate::types::{SentimentBounds, ValidationError};
use rust_decimal::Decimal;
use serde::Serialize;

/// Quarterly accrual of an annualized rate (rate / 4).
pub const DEFAULT_QUARTER_FRACTION_DIVISOR: Decimal = Decimal::from_parts(4, 0, 0, false, 0);

/// Notional units (billions) to currency.
pub const DEFAULT_NOTIONAL_UNIT_SCALE: Decimal = Decimal::from_parts(1_000_000_000, 0, 0, false, 0);

/// Largest accepted notional unit scale (1e12).
pub const MAX_NOTIONAL_UNIT_SCALE: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Conventions the formulas depend on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ModelConstants {
    /// Divisor turning an annualized staking reward rate into one period's
    /// accrual. Must be recomputed for non-quarterly periods.
    pub quarter_fraction_divisor: Decimal,
    /// Multiplier from notional units to currency, applied once per month.
    pub notional_unit_scale: Decimal,
    /// Clamp bounds for sentiment multipliers.
    pub sentiment_bounds: SentimentBounds,
}

impl Default for ModelConstants {
    fn default() -> Self {
        Self {
            quarter_fraction_divisor: DEFAULT_QUARTER_FRACTION_DIVISOR,
            notional_unit_scale: DEFAULT_NOTIONAL_UNIT_SCALE,
            sentiment_bounds: SentimentBounds::default(),
        }
    }
}

impl ModelConstants {
    /// Replace the sentiment bounds.
    pub fn with_sentiment_bounds(mut self, bounds: SentimentBounds) -> Self {
        self.sentiment_bounds = bounds;
        self
    }

    /// Check the ranges the formulas rely on.
    ///
    /// The divisor must be at least 1 and the notional scale in
    /// `(0, MAX_NOTIONAL_UNIT_SCALE]`; with parameter sets capped at intake,
    /// aggregation then stays within `Decimal` range.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.quarter_fraction_divisor < Decimal::ONE {
            return Err(ValidationError::InvalidConstant {
                name: "quarter_fraction_divisor".to_string(),
                value: self.quarter_fraction_divisor,
                expected: ">= 1".to_string(),
            });
        }
        if self.notional_unit_scale <= Decimal::ZERO
            || self.notional_unit_scale > MAX_NOTIONAL_UNIT_SCALE
        {
            return Err(ValidationError::InvalidConstant {
                name: "notional_unit_scale".to_string(),
                value: self.notional_unit_scale,
                expected: format!("in (0, {}]", MAX_NOTIONAL_UNIT_SCALE),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_defaults() {
        let constants = ModelConstants::default();
        assert_eq!(constants.quarter_fraction_divisor, dec!(4));
        assert_eq!(constants.notional_unit_scale, dec!(1000000000));
        assert_eq!(constants.sentiment_bounds.upper(), dec!(1.05));
    }

    #[test]
    fn test_validate_ranges() {
        assert!(ModelConstants::default().validate().is_ok());
        assert_eq!(MAX_NOTIONAL_UNIT_SCALE, dec!(1000000000000));

        let monthly = ModelConstants {
            quarter_fraction_divisor: dec!(12),
            ..ModelConstants::default()
        };
        assert!(monthly.validate().is_ok());

        let tiny_divisor = ModelConstants {
            quarter_fraction_divisor: dec!(0.5),
            ..ModelConstants::default()
        };
        assert!(matches!(
            tiny_divisor.validate(),
            Err(ValidationError::InvalidConstant { name, .. }) if name == "quarter_fraction_divisor"
        ));

        let huge_scale = ModelConstants {
            notional_unit_scale: MAX_NOTIONAL_UNIT_SCALE * dec!(10),
            ..ModelConstants::default()
        };
        assert!(huge_scale.validate().is_err());
    }
}
