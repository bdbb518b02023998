//! Preset forecast scenarios.
//!
//! The scenario set is closed: Base reproduces the input drivers, Bull and
//! Bear apply symmetric shocks to the transaction drivers.

use super::shifts::{ParameterShift, ScenarioOverride};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Relative notional shock for Bull (+) and Bear (-): 10%.
pub const SCENARIO_NOTIONAL_PCT: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

/// Take-rate shock for Bull (+) and Bear (-), in basis points.
pub const SCENARIO_TAKE_RATE_BPS: Decimal = Decimal::from_parts(2, 0, 0, false, 0);

/// Sentiment shock for Bull (+) and Bear (-) on months 2 and 3.
pub const SCENARIO_SENTIMENT_DELTA: Decimal = Decimal::from_parts(2, 0, 0, false, 2);

/// The forecast scenarios.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub enum ScenarioKind {
    /// Input drivers unchanged
    Base,
    /// Higher volume, take-rate, and sentiment
    Bull,
    /// Lower volume, take-rate, and sentiment
    Bear,
}

impl ScenarioKind {
    /// All scenarios in report order.
    pub fn all() -> [Self; 3] {
        [Self::Base, Self::Bull, Self::Bear]
    }

    /// Get the scenario name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Base => "Base",
            Self::Bull => "Bull",
            Self::Bear => "Bear",
        }
    }

    /// Get the scenario description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::Base => "Input drivers as supplied",
            Self::Bull => "Notional +10%, take-rate +2bps, sentiment +0.02 (capped at upper bound)",
            Self::Bear => "Notional -10%, take-rate -2bps, sentiment -0.02 (floored at lower bound)",
        }
    }

    /// Shifts that derive this scenario from the base set.
    pub fn overrides(&self) -> ScenarioOverride {
        let sign = match self {
            Self::Base => return ScenarioOverride::new(self.name()),
            Self::Bull => Decimal::ONE,
            Self::Bear => Decimal::NEGATIVE_ONE,
        };

        ScenarioOverride::new(self.name())
            .with_shift(ParameterShift::notional_pct(sign * SCENARIO_NOTIONAL_PCT))
            .with_shift(ParameterShift::take_rate_bps(sign * SCENARIO_TAKE_RATE_BPS))
            .with_shift(ParameterShift::sentiment(sign * SCENARIO_SENTIMENT_DELTA))
    }
}

impl fmt::Display for ScenarioKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ScenarioKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "base" => Ok(Self::Base),
            "bull" => Ok(Self::Bull),
            "bear" => Ok(Self::Bear),
            other => Err(format!(
                "unknown scenario '{}', expected one of: base, bull, bear",
                other
            )),
        }
    }
}
