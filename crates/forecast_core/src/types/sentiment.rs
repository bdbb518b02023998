//! Sentiment multipliers for the three months of a quarter.
//!
//! Month 1 is the anchor: its multiplier is exactly [`ANCHOR_SENTIMENT`] and
//! no constructor or shift can change it. Months 2 and 3 must lie inside the
//! [`SentimentBounds`] in force; shifted values are clamped back into them.

use super::error::ValidationError;
use rust_decimal::Decimal;
use serde::Serialize;

/// Month-1 multiplier (1.00).
pub const ANCHOR_SENTIMENT: Decimal = Decimal::ONE;

/// Default lower clamp bound (0.95).
pub const DEFAULT_SENTIMENT_LOWER: Decimal = Decimal::from_parts(95, 0, 0, false, 2);

/// Default upper clamp bound (1.05).
pub const DEFAULT_SENTIMENT_UPPER: Decimal = Decimal::from_parts(105, 0, 0, false, 2);

/// Inclusive clamp bounds for sentiment multipliers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SentimentBounds {
    lower: Decimal,
    upper: Decimal,
}

impl Default for SentimentBounds {
    fn default() -> Self {
        Self {
            lower: DEFAULT_SENTIMENT_LOWER,
            upper: DEFAULT_SENTIMENT_UPPER,
        }
    }
}

impl SentimentBounds {
    /// Create bounds; they must bracket the anchor value.
    ///
    /// Bounds may narrow the default [0.95, 1.05] range but never widen it.
    pub fn new(lower: Decimal, upper: Decimal) -> Result<Self, ValidationError> {
        if lower < DEFAULT_SENTIMENT_LOWER
            || lower > ANCHOR_SENTIMENT
            || upper < ANCHOR_SENTIMENT
            || upper > DEFAULT_SENTIMENT_UPPER
        {
            return Err(ValidationError::InvalidBounds { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Lower bound.
    #[inline]
    pub fn lower(&self) -> Decimal {
        self.lower
    }

    /// Upper bound.
    #[inline]
    pub fn upper(&self) -> Decimal {
        self.upper
    }

    /// Returns true if `value` lies inside the bounds (inclusive).
    #[inline]
    pub fn contains(&self, value: Decimal) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// Clamp `value` into the bounds.
    #[inline]
    pub fn clamp(&self, value: Decimal) -> Decimal {
        value.max(self.lower).min(self.upper)
    }

    fn check(&self, month: u8, value: Decimal) -> Result<Decimal, ValidationError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(ValidationError::SentimentOutOfBounds {
                month,
                value,
                lower: self.lower,
                upper: self.upper,
            })
        }
    }
}

/// Per-month sentiment multipliers for transaction revenue.
///
/// Fields are private: every instance satisfies the anchor invariant and the
/// bounds it was validated against.
///
/// # Examples
/// ```
/// use forecast_core::types::{SentimentBounds, SentimentMultipliers};
/// use rust_decimal::Decimal;
///
/// let bounds = SentimentBounds::default();
/// let s = SentimentMultipliers::new(Decimal::ONE, Decimal::new(1018, 3), Decimal::new(1015, 3), &bounds).unwrap();
/// assert_eq!(s.month1(), Decimal::ONE);
///
/// // Month 1 must be the anchor
/// assert!(SentimentMultipliers::new(Decimal::new(101, 2), Decimal::ONE, Decimal::ONE, &bounds).is_err());
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct SentimentMultipliers {
    month1: Decimal,
    month2: Decimal,
    month3: Decimal,
}

impl Default for SentimentMultipliers {
    fn default() -> Self {
        Self::neutral()
    }
}

impl SentimentMultipliers {
    /// Validate three multipliers from an external feed.
    pub fn new(
        month1: Decimal,
        month2: Decimal,
        month3: Decimal,
        bounds: &SentimentBounds,
    ) -> Result<Self, ValidationError> {
        if month1 != ANCHOR_SENTIMENT {
            return Err(ValidationError::AnchorSentiment(month1));
        }
        Ok(Self {
            month1: ANCHOR_SENTIMENT,
            month2: bounds.check(2, month2)?,
            month3: bounds.check(3, month3)?,
        })
    }

    /// Validate the two non-anchor months; month 1 is the anchor.
    pub fn from_feed(
        month2: Decimal,
        month3: Decimal,
        bounds: &SentimentBounds,
    ) -> Result<Self, ValidationError> {
        Self::new(ANCHOR_SENTIMENT, month2, month3, bounds)
    }

    /// All three months at 1.00.
    pub fn neutral() -> Self {
        Self {
            month1: ANCHOR_SENTIMENT,
            month2: ANCHOR_SENTIMENT,
            month3: ANCHOR_SENTIMENT,
        }
    }

    /// Month-1 multiplier (always the anchor).
    #[inline]
    pub fn month1(&self) -> Decimal {
        self.month1
    }

    /// Month-2 multiplier.
    #[inline]
    pub fn month2(&self) -> Decimal {
        self.month2
    }

    /// Month-3 multiplier.
    #[inline]
    pub fn month3(&self) -> Decimal {
        self.month3
    }

    /// All three multipliers in month order.
    pub fn as_array(&self) -> [Decimal; 3] {
        [self.month1, self.month2, self.month3]
    }

    /// Shift months 2 and 3 by `delta`, then clamp into `bounds`.
    ///
    /// The anchor month is left untouched.
    pub fn shifted(&self, delta: Decimal, bounds: &SentimentBounds) -> Self {
        Self {
            month1: ANCHOR_SENTIMENT,
            month2: bounds.clamp(self.month2 + delta),
            month3: bounds.clamp(self.month3 + delta),
        }
    }
}
