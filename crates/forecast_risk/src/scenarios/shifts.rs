//! Parameter shifts and scenario overrides.
//!
//! Provides infrastructure for defining driver shocks:
//! - `ParameterShift`: a single delta on a transaction driver
//! - `ScenarioOverride`: a named collection of shifts applied to a base set

use forecast_core::types::{
    BasisPoints, ParameterSet, SentimentBounds, TransactionInputs, ValidationError, MAX_RATE,
};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;

/// A single delta on a transaction driver.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "target", content = "amount", rename_all = "snake_case")]
pub enum ParameterShift {
    /// Multiplicative change on both variable-month notionals (0.10 = +10%)
    NotionalRelative(Decimal),
    /// Additive change on the blended take-rate
    TakeRate(BasisPoints),
    /// Additive change on month-2 and month-3 sentiment, clamped afterwards
    Sentiment(Decimal),
}

impl ParameterShift {
    /// Notional shift from a fraction (0.10 = +10%).
    pub fn notional_pct(fraction: Decimal) -> Self {
        Self::NotionalRelative(fraction)
    }

    /// Take-rate shift in basis points.
    pub fn take_rate_bps(bps: Decimal) -> Self {
        Self::TakeRate(BasisPoints::new(bps))
    }

    /// Take-rate shift from a fraction (0.0005 = +5bps).
    pub fn take_rate_fraction(fraction: Decimal) -> Self {
        Self::TakeRate(BasisPoints::from_fraction(fraction))
    }

    /// Sentiment shift.
    pub fn sentiment(delta: Decimal) -> Self {
        Self::Sentiment(delta)
    }

    /// Size of the shift as an absolute fraction.
    pub fn magnitude(&self) -> Decimal {
        match self {
            Self::NotionalRelative(fraction) => fraction.abs(),
            Self::TakeRate(bps) => bps.as_fraction().abs(),
            Self::Sentiment(delta) => delta.abs(),
        }
    }

    /// Name of the shifted driver.
    pub fn target_name(&self) -> &'static str {
        match self {
            Self::NotionalRelative(_) => "notional",
            Self::TakeRate(_) => "take_rate",
            Self::Sentiment(_) => "sentiment",
        }
    }

    /// Apply the shift in place.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::ValueOutOfRange`] when the shift magnitude exceeds
    ///   [`MAX_RATE`]
    /// - [`ValidationError::NegativeValue`] when the shift drives a notional
    ///   or the take-rate below zero
    ///
    /// Sentiment shifts are clamped into `bounds` and leave month 1 at the
    /// anchor.
    pub fn apply(
        &self,
        txn: &mut TransactionInputs,
        bounds: &SentimentBounds,
    ) -> Result<(), ValidationError> {
        let magnitude = self.magnitude();
        if magnitude > MAX_RATE {
            return Err(ValidationError::out_of_range(
                self.target_name(),
                magnitude,
                MAX_RATE,
            ));
        }

        match *self {
            Self::NotionalRelative(fraction) => {
                let factor = Decimal::ONE + fraction;
                let month2 = txn.notional_month2 * factor;
                let month3 = txn.notional_month3 * factor;
                if month2 < Decimal::ZERO {
                    return Err(ValidationError::negative("txn_notional_m2", month2));
                }
                if month3 < Decimal::ZERO {
                    return Err(ValidationError::negative("txn_notional_m3", month3));
                }
                txn.notional_month2 = month2;
                txn.notional_month3 = month3;
            }
            Self::TakeRate(bps) => {
                let take_rate = txn.take_rate + bps.as_fraction();
                if take_rate < Decimal::ZERO {
                    return Err(ValidationError::negative("txn_take_rate", take_rate));
                }
                txn.take_rate = take_rate;
            }
            Self::Sentiment(delta) => {
                txn.sentiment = txn.sentiment.shifted(delta, bounds);
            }
        }
        Ok(())
    }
}

impl fmt::Display for ParameterShift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotionalRelative(fraction) => {
                write!(f, "notional {:+}%", (*fraction * Decimal::ONE_HUNDRED).normalize())
            }
            Self::TakeRate(bps) => write!(f, "take-rate {:+}bps", bps.value().normalize()),
            Self::Sentiment(delta) => write!(f, "sentiment {:+}", delta.normalize()),
        }
    }
}

/// A named set of shifts applied to a base parameter set.
///
/// The derived set is an independent clone; the base is never touched.
///
/// # Examples
/// ```
/// use forecast_risk::scenarios::{ParameterShift, ScenarioOverride};
/// use rust_decimal::Decimal;
///
/// let overrides = ScenarioOverride::new("Upside")
///     .with_shift(ParameterShift::notional_pct(Decimal::new(10, 2)))
///     .with_shift(ParameterShift::take_rate_bps(Decimal::TWO));
/// assert_eq!(overrides.shifts().len(), 2);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioOverride {
    name: String,
    shifts: Vec<ParameterShift>,
}

impl ScenarioOverride {
    /// Create an override with no shifts.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shifts: Vec::new(),
        }
    }

    /// Add a shift.
    pub fn with_shift(mut self, shift: ParameterShift) -> Self {
        self.shifts.push(shift);
        self
    }

    /// Add multiple shifts.
    pub fn with_shifts(mut self, shifts: impl IntoIterator<Item = ParameterShift>) -> Self {
        self.shifts.extend(shifts);
        self
    }

    /// Override name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Shifts in application order.
    pub fn shifts(&self) -> &[ParameterShift] {
        &self.shifts
    }

    /// True when the override carries no shifts.
    pub fn is_identity(&self) -> bool {
        self.shifts.is_empty()
    }

    /// Derive a parameter set from `base`.
    ///
    /// An identity override returns a plain clone, so it also works on sets
    /// without transaction inputs.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingTransactionInputs`] when shifts are present
    ///   but `base` has no transaction inputs
    /// - [`ValidationError::NegativeValue`] when a shift drives a driver below
    ///   zero
    /// - [`ValidationError::ValueOutOfRange`] when a shift is too large or
    ///   pushes a driver past its accepted magnitude
    pub fn apply(
        &self,
        base: &ParameterSet,
        bounds: &SentimentBounds,
    ) -> Result<ParameterSet, ValidationError> {
        let mut derived = base.clone();
        if self.is_identity() {
            return Ok(derived);
        }

        let txn = derived.require_transactions_mut()?;
        for shift in &self.shifts {
            shift.apply(txn, bounds)?;
        }
        derived.validate()?;
        Ok(derived)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::types::{
        CustodyInputs, InterestInputs, SentimentMultipliers, StakingInputs, MAX_AMOUNT,
    };
    use rust_decimal_macros::dec;

    fn txn(sentiment_m2: Decimal, sentiment_m3: Decimal) -> TransactionInputs {
        TransactionInputs {
            month1_fixed_revenue: dec!(360000000),
            notional_month2: dec!(72),
            notional_month3: dec!(80),
            take_rate: dec!(0.0025),
            sentiment: SentimentMultipliers::from_feed(
                sentiment_m2,
                sentiment_m3,
                &SentimentBounds::default(),
            )
            .unwrap(),
        }
    }

    fn params(transactions: Option<TransactionInputs>) -> ParameterSet {
        ParameterSet {
            period: "Q3 2025".to_string(),
            interest: InterestInputs {
                fiat_balance: dec!(25000000000),
                fiat_rate: dec!(0.0540),
                fiat_share: dec!(0.22),
                stable_balance: dec!(28000000000),
                stable_rate: dec!(0.0540),
                stable_share: dec!(0.0035),
            },
            staking: StakingInputs {
                staked_units: dec!(33000000),
                asset_price: dec!(3500),
                annual_reward_rate: dec!(0.040),
                take_rate: dec!(0.115),
            },
            custody: CustodyInputs {
                assets_under_custody: dec!(150000000000),
                fee: BasisPoints::new(dec!(1.3)),
            },
            other_adjustment: dec!(-1500000),
            transactions,
        }
    }

    // ================================================================
    // ParameterShift
    // ================================================================

    #[test]
    fn test_notional_shift_is_multiplicative() {
        let mut t = txn(dec!(1.018), dec!(1.015));
        ParameterShift::notional_pct(dec!(0.10))
            .apply(&mut t, &SentimentBounds::default())
            .unwrap();
        assert_eq!(t.notional_month2, dec!(79.2));
        assert_eq!(t.notional_month3, dec!(88));
        assert_eq!(t.month1_fixed_revenue, dec!(360000000));
    }

    #[test]
    fn test_take_rate_shift_is_additive_bps() {
        let mut t = txn(dec!(1.018), dec!(1.015));
        ParameterShift::take_rate_bps(dec!(-2))
            .apply(&mut t, &SentimentBounds::default())
            .unwrap();
        assert_eq!(t.take_rate, dec!(0.0023));
    }

    #[test]
    fn test_take_rate_fraction_matches_bps() {
        assert_eq!(
            ParameterShift::take_rate_fraction(dec!(0.0005)),
            ParameterShift::take_rate_bps(dec!(5))
        );
    }

    #[test]
    fn test_negative_take_rate_rejected() {
        let mut t = txn(dec!(1.018), dec!(1.015));
        let err = ParameterShift::take_rate_bps(dec!(-30))
            .apply(&mut t, &SentimentBounds::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::NegativeValue { ref field, .. } if field == "txn_take_rate"));
        assert_eq!(t.take_rate, dec!(0.0025));
    }

    #[test]
    fn test_notional_below_zero_rejected() {
        let mut t = txn(dec!(1.018), dec!(1.015));
        let err = ParameterShift::notional_pct(dec!(-1.5))
            .apply(&mut t, &SentimentBounds::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::NegativeValue { .. }));
    }

    #[test]
    fn test_oversized_shift_rejected() {
        let mut t = txn(dec!(1.018), dec!(1.015));
        let snapshot = t.clone();
        let err = ParameterShift::notional_pct(Decimal::MAX)
            .apply(&mut t, &SentimentBounds::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::ValueOutOfRange { ref field, .. } if field == "notional"));

        let err = ParameterShift::take_rate_fraction(Decimal::MAX)
            .apply(&mut t, &SentimentBounds::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::ValueOutOfRange { ref field, .. } if field == "take_rate"));

        let err = ParameterShift::sentiment(dec!(-11))
            .apply(&mut t, &SentimentBounds::default())
            .unwrap_err();
        assert!(matches!(err, ValidationError::ValueOutOfRange { ref field, .. } if field == "sentiment"));
        assert_eq!(t, snapshot);
    }

    #[test]
    fn test_sentiment_shift_clamps_and_keeps_anchor() {
        let mut t = txn(dec!(1.04), dec!(1.05));
        ParameterShift::sentiment(dec!(0.02))
            .apply(&mut t, &SentimentBounds::default())
            .unwrap();
        assert_eq!(t.sentiment.month1(), dec!(1));
        assert_eq!(t.sentiment.month2(), dec!(1.05));
        assert_eq!(t.sentiment.month3(), dec!(1.05));
    }

    #[test]
    fn test_shift_display() {
        assert_eq!(ParameterShift::notional_pct(dec!(0.10)).to_string(), "notional +10%");
        assert_eq!(ParameterShift::take_rate_bps(dec!(-2)).to_string(), "take-rate -2bps");
        assert_eq!(ParameterShift::sentiment(dec!(0.02)).to_string(), "sentiment +0.02");
    }

    // ================================================================
    // ScenarioOverride
    // ================================================================

    #[test]
    fn test_override_leaves_base_untouched() {
        let base = params(Some(txn(dec!(1.018), dec!(1.015))));
        let snapshot = base.clone();
        let derived = ScenarioOverride::new("Up")
            .with_shift(ParameterShift::notional_pct(dec!(0.10)))
            .apply(&base, &SentimentBounds::default())
            .unwrap();

        assert_eq!(base, snapshot);
        assert_ne!(derived, base);
    }

    #[test]
    fn test_identity_override_without_transactions() {
        let base = params(None);
        let derived = ScenarioOverride::new("Base")
            .apply(&base, &SentimentBounds::default())
            .unwrap();
        assert_eq!(derived, base);
    }

    #[test]
    fn test_override_requires_transactions() {
        let base = params(None);
        let err = ScenarioOverride::new("Up")
            .with_shift(ParameterShift::sentiment(dec!(0.02)))
            .apply(&base, &SentimentBounds::default())
            .unwrap_err();
        assert_eq!(
            err,
            ValidationError::MissingTransactionInputs("Q3 2025".to_string())
        );
    }

    #[test]
    fn test_override_cannot_push_driver_past_cap() {
        let mut t = txn(dec!(1.018), dec!(1.015));
        t.notional_month2 = MAX_AMOUNT;
        let base = params(Some(t));
        let err = ScenarioOverride::new("Up")
            .with_shift(ParameterShift::notional_pct(dec!(0.10)))
            .apply(&base, &SentimentBounds::default())
            .unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ValueOutOfRange { ref field, max, .. }
                if field == "txn_notional_m2" && max == MAX_AMOUNT
        ));
    }

    #[test]
    fn test_with_shifts_preserves_order() {
        let overrides = ScenarioOverride::new("Mixed").with_shifts([
            ParameterShift::sentiment(dec!(0.01)),
            ParameterShift::notional_pct(dec!(0.05)),
        ]);
        let targets: Vec<_> = overrides.shifts().iter().map(|s| s.target_name()).collect();
        assert_eq!(targets, vec!["sentiment", "notional"]);
        assert!(!overrides.is_identity());
    }
}
