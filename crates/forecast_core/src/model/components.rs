//! Revenue component calculators.
//!
//! Four pure functions, one per subscription and services line. They accept
//! any well-typed input, zero and negative values included, and never fail.

use crate::types::{CustodyInputs, InterestInputs, ParameterSet, StakingInputs};
use rust_decimal::Decimal;
use serde::Serialize;

/// The four subscription and services revenue lines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RevenueComponent {
    /// Yield on fiat and stablecoin balances
    Interest,
    /// Platform share of staking rewards
    Staking,
    /// Fee on assets under custody
    Custody,
    /// Signed adjustment
    Other,
}

impl RevenueComponent {
    /// All components in report order.
    pub fn all() -> [Self; 4] {
        [Self::Interest, Self::Staking, Self::Custody, Self::Other]
    }

    /// Display name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Interest => "Interest",
            Self::Staking => "Staking",
            Self::Custody => "Custody",
            Self::Other => "Other",
        }
    }
}

/// Interest = fiat balance × rate × share + stablecoin balance × rate × share.
pub fn interest_revenue(inputs: &InterestInputs) -> Decimal {
    let fiat = inputs.fiat_balance * inputs.fiat_rate * inputs.fiat_share;
    let stable = inputs.stable_balance * inputs.stable_rate * inputs.stable_share;
    fiat + stable
}

/// Staking = units × price × (annual rate / divisor) × take-rate.
pub fn staking_revenue(inputs: &StakingInputs, quarter_fraction_divisor: Decimal) -> Decimal {
    let staked_notional = inputs.staked_units * inputs.asset_price;
    let period_rewards = staked_notional * inputs.annual_reward_rate / quarter_fraction_divisor;
    period_rewards * inputs.take_rate
}

/// Custody = AUC × fee (bps converted to a fraction).
pub fn custody_revenue(inputs: &CustodyInputs) -> Decimal {
    inputs.assets_under_custody * inputs.fee.as_fraction()
}

/// Other = the adjustment, sign preserved.
#[inline]
pub fn other_revenue(adjustment: Decimal) -> Decimal {
    adjustment
}

/// Component-level revenue for one parameter set.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ComponentBreakdown {
    /// Interest revenue
    pub interest: Decimal,
    /// Staking revenue
    pub staking: Decimal,
    /// Custody revenue
    pub custody: Decimal,
    /// Other revenue
    pub other: Decimal,
}

impl ComponentBreakdown {
    /// Run all four calculators.
    pub fn compute(params: &ParameterSet, quarter_fraction_divisor: Decimal) -> Self {
        Self {
            interest: interest_revenue(&params.interest),
            staking: staking_revenue(&params.staking, quarter_fraction_divisor),
            custody: custody_revenue(&params.custody),
            other: other_revenue(params.other_adjustment),
        }
    }

    /// Value of a single component.
    pub fn get(&self, component: RevenueComponent) -> Decimal {
        match component {
            RevenueComponent::Interest => self.interest,
            RevenueComponent::Staking => self.staking,
            RevenueComponent::Custody => self.custody,
            RevenueComponent::Other => self.other,
        }
    }

    /// Interest + Staking + Custody + Other.
    pub fn subtotal(&self) -> Decimal {
        self.interest + self.staking + self.custody + self.other
    }
}
