//! Basis-point unit type and percentage helper.
//!
//! Fees and rate shifts quoted in bps are carried as [`BasisPoints`] and only
//! converted to a fraction at the point of use, so a bps value can never be
//! multiplied into a formula that expects a fraction.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;

/// Basis points per unit fraction.
pub const BPS_PER_UNIT: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// A quantity expressed in basis points (1 bp = 0.0001).
///
/// # Examples
/// ```
/// use forecast_core::types::BasisPoints;
/// use rust_decimal::Decimal;
///
/// let fee = BasisPoints::new(Decimal::new(13, 1)); // 1.3 bps
/// assert_eq!(fee.as_fraction(), Decimal::new(13, 5)); // 0.00013
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BasisPoints(Decimal);

impl BasisPoints {
    /// Zero basis points.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Wrap a value already expressed in bps.
    pub const fn new(bps: Decimal) -> Self {
        Self(bps)
    }

    /// Build from a fraction (0.0002 becomes 2 bps).
    pub fn from_fraction(fraction: Decimal) -> Self {
        Self(fraction.saturating_mul(BPS_PER_UNIT))
    }

    /// The raw bps figure.
    #[inline]
    pub fn value(&self) -> Decimal {
        self.0
    }

    /// The equivalent fraction (2 bps becomes 0.0002).
    #[inline]
    pub fn as_fraction(&self) -> Decimal {
        self.0 / BPS_PER_UNIT
    }

    /// Returns true if the value is below zero.
    #[inline]
    pub fn is_negative(&self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }
}

impl Neg for BasisPoints {
    type Output = Self;

    fn neg(self) -> Self {
        Self(-self.0)
    }
}

impl fmt::Display for BasisPoints {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}bps", self.0.normalize())
    }
}

/// `part / whole × 100`, zero when `whole` is zero.
///
/// Saturates at `Decimal::MAX` (or `MIN`) when the ratio is too large to
/// represent.
pub fn percent_of(part: Decimal, whole: Decimal) -> Decimal {
    if whole.is_zero() {
        return Decimal::ZERO;
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .unwrap_or(if part.is_sign_negative() == whole.is_sign_negative() {
            Decimal::MAX
        } else {
            Decimal::MIN
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_as_fraction() {
        assert_eq!(BasisPoints::new(dec!(2)).as_fraction(), dec!(0.0002));
        assert_eq!(BasisPoints::new(dec!(13)).as_fraction(), dec!(0.0013));
        assert_eq!(BasisPoints::new(dec!(1.3)).as_fraction(), dec!(0.00013));
    }

    #[test]
    fn test_from_fraction() {
        assert_eq!(BasisPoints::from_fraction(dec!(0.0005)).value(), dec!(5));
    }

    #[test]
    fn test_negation_and_sign() {
        let down = -BasisPoints::new(dec!(2));
        assert!(down.is_negative());
        assert_eq!(down.as_fraction(), dec!(-0.0002));
        assert!(!BasisPoints::ZERO.is_negative());
    }

    #[test]
    fn test_percent_of() {
        assert_eq!(percent_of(dec!(1565000), dec!(340000000)).round_dp(4), dec!(0.4603));
        assert_eq!(percent_of(dec!(-5), dec!(200)), dec!(-2.5));
        assert_eq!(percent_of(dec!(5), Decimal::ZERO), Decimal::ZERO);
        assert_eq!(percent_of(Decimal::from_i128_with_scale(10i128.pow(27), 0), dec!(0.0000001)), Decimal::MAX);
        assert_eq!(percent_of(Decimal::from_i128_with_scale(-(10i128.pow(27)), 0), dec!(0.0000001)), Decimal::MIN);
    }

    #[test]
    fn test_display() {
        assert_eq!(BasisPoints::new(dec!(2.50)).to_string(), "2.5bps");
    }
}
