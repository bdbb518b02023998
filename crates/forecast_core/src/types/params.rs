//! Per-period parameter set.
//!
//! A [`ParameterSet`] bundles the ex-ante drivers of one period: the inputs
//! of the four subscription and services components plus an optional
//! transaction group. It is read once from a [`FlatInput`] and validated at
//! that boundary; the calculators downstream never re-check it.
//!
//! Parameter sets are plain values. Scenario and sensitivity code derives new
//! sets by cloning and editing the copy, so a derived set never aliases its
//! base.

use super::error::{ConfigurationError, ForecastError, ValidationError};
use super::input::FlatInput;
use super::sentiment::{SentimentBounds, SentimentMultipliers};
use super::units::BasisPoints;
use rust_decimal::Decimal;
use serde::Serialize;

/// Keys of the all-or-nothing transaction group.
pub const TRANSACTION_KEYS: [&str; 7] = [
    "txn_month1_fixed",
    "txn_notional_m2",
    "txn_notional_m3",
    "txn_take_rate",
    "sentiment_m1",
    "sentiment_m2",
    "sentiment_m3",
];

/// Largest accepted balance, quantity, price, notional or fixed amount (1e13).
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_316_134_912, 2_328, 0, false, 0);

/// Largest accepted rate, share or take-rate (10, i.e. 1000%).
pub const MAX_RATE: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

/// Largest accepted fee in basis points (10,000, i.e. 100%).
pub const MAX_FEE_BPS: Decimal = Decimal::from_parts(10_000, 0, 0, false, 0);

/// Drivers of interest revenue: a fiat leg and a stablecoin leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct InterestInputs {
    /// Fiat balance
    pub fiat_balance: Decimal,
    /// Fiat rate (fraction)
    pub fiat_rate: Decimal,
    /// Share of the fiat yield retained (fraction)
    pub fiat_share: Decimal,
    /// Stablecoin balance
    pub stable_balance: Decimal,
    /// Stablecoin rate (fraction)
    pub stable_rate: Decimal,
    /// Share of the stablecoin yield retained (fraction)
    pub stable_share: Decimal,
}

/// Drivers of staking revenue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct StakingInputs {
    /// Staked asset units
    pub staked_units: Decimal,
    /// Asset price per unit
    pub asset_price: Decimal,
    /// Annualized reward rate (fraction)
    pub annual_reward_rate: Decimal,
    /// Platform take-rate on rewards (fraction)
    pub take_rate: Decimal,
}

/// Drivers of custody revenue.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct CustodyInputs {
    /// Assets under custody
    pub assets_under_custody: Decimal,
    /// Custody fee
    pub fee: BasisPoints,
}

/// Drivers of transaction revenue for the three months of the quarter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TransactionInputs {
    /// Month-1 transaction revenue, a given constant never scaled by sentiment
    pub month1_fixed_revenue: Decimal,
    /// Month-2 notional volume, in notional units (billions)
    pub notional_month2: Decimal,
    /// Month-3 notional volume, in notional units (billions)
    pub notional_month3: Decimal,
    /// Blended take-rate (fraction)
    pub take_rate: Decimal,
    /// Sentiment multipliers
    pub sentiment: SentimentMultipliers,
}

impl TransactionInputs {
    fn from_flat(
        input: &mut FlatInput,
        bounds: &SentimentBounds,
    ) -> Result<Option<Self>, ForecastError> {
        let missing = input.missing(&TRANSACTION_KEYS);
        if missing.len() == TRANSACTION_KEYS.len() {
            return Ok(None);
        }
        if !missing.is_empty() {
            return Err(ConfigurationError::IncompleteSection {
                section: "transactions".to_string(),
                missing: missing.into_iter().map(String::from).collect(),
            }
            .into());
        }

        let month1_fixed_revenue = input.decimal("txn_month1_fixed")?;
        let notional_month2 = input.decimal("txn_notional_m2")?;
        let notional_month3 = input.decimal("txn_notional_m3")?;
        let take_rate = input.decimal("txn_take_rate")?;
        let sentiment_m1 = input.decimal("sentiment_m1")?;
        let sentiment_m2 = input.decimal("sentiment_m2")?;
        let sentiment_m3 = input.decimal("sentiment_m3")?;

        Ok(Some(Self {
            month1_fixed_revenue,
            notional_month2,
            notional_month3,
            take_rate,
            sentiment: SentimentMultipliers::new(sentiment_m1, sentiment_m2, sentiment_m3, bounds)?,
        }))
    }

    fn validate(&self) -> Result<(), ValidationError> {
        within("txn_month1_fixed", self.month1_fixed_revenue, MAX_AMOUNT)?;
        within("txn_notional_m2", self.notional_month2, MAX_AMOUNT)?;
        within("txn_notional_m3", self.notional_month3, MAX_AMOUNT)?;
        within("txn_take_rate", self.take_rate, MAX_RATE)
    }
}

/// Ex-ante drivers for one period.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ParameterSet {
    /// Period label, e.g. "Q3 2025"
    pub period: String,
    /// Interest drivers
    pub interest: InterestInputs,
    /// Staking drivers
    pub staking: StakingInputs,
    /// Custody drivers
    pub custody: CustodyInputs,
    /// Signed other-revenue adjustment
    pub other_adjustment: Decimal,
    /// Transaction drivers, absent for subscription and services only periods
    pub transactions: Option<TransactionInputs>,
}

impl ParameterSet {
    /// Read and validate a parameter set from flat input.
    ///
    /// Every key in `input` must be consumed; leftovers are reported as
    /// [`ConfigurationError::UnknownField`]. Configuration errors are reported
    /// ahead of any invariant violation.
    pub fn from_flat(mut input: FlatInput, bounds: &SentimentBounds) -> Result<Self, ForecastError> {
        let result = Self::read(&mut input, bounds);
        if !matches!(result, Err(ForecastError::Configuration(_))) {
            input.finish()?;
        }
        result
    }

    /// Read and validate a parameter set, leaving unread keys in `input`.
    ///
    /// Callers that accept extra keys (a backtest reference total, say) read
    /// them afterwards and call [`FlatInput::finish`] themselves.
    pub fn read(input: &mut FlatInput, bounds: &SentimentBounds) -> Result<Self, ForecastError> {
        let period = input.text("period")?;

        let interest = InterestInputs {
            fiat_balance: input.decimal("fiat_balance")?,
            fiat_rate: input.decimal("fiat_rate")?,
            fiat_share: input.decimal("fiat_share")?,
            stable_balance: input.decimal("stable_balance")?,
            stable_rate: input.decimal("stable_rate")?,
            stable_share: input.decimal("stable_share")?,
        };

        let staking = StakingInputs {
            staked_units: input.decimal("staked_units")?,
            asset_price: input.decimal("asset_price")?,
            annual_reward_rate: input.decimal("staking_reward_rate")?,
            take_rate: input.decimal("staking_take_rate")?,
        };

        let custody = CustodyInputs {
            assets_under_custody: input.decimal("custody_auc")?,
            fee: BasisPoints::new(input.decimal("custody_fee_bps")?),
        };

        let other_adjustment = input.decimal("other_adjustment")?;
        let transactions = TransactionInputs::from_flat(input, bounds)?;

        let params = Self {
            period,
            interest,
            staking,
            custody,
            other_adjustment,
            transactions,
        };
        params.validate()?;
        Ok(params)
    }

    /// Check the non-negativity and magnitude invariants.
    ///
    /// Amounts are capped at [`MAX_AMOUNT`], rates at [`MAX_RATE`] and the
    /// custody fee at [`MAX_FEE_BPS`], so no formula can overflow on a set
    /// that passes. Sentiment bounds are enforced by [`SentimentMultipliers`]
    /// itself.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let i = &self.interest;
        within("fiat_balance", i.fiat_balance, MAX_AMOUNT)?;
        within("fiat_rate", i.fiat_rate, MAX_RATE)?;
        within("fiat_share", i.fiat_share, MAX_RATE)?;
        within("stable_balance", i.stable_balance, MAX_AMOUNT)?;
        within("stable_rate", i.stable_rate, MAX_RATE)?;
        within("stable_share", i.stable_share, MAX_RATE)?;

        let s = &self.staking;
        within("staked_units", s.staked_units, MAX_AMOUNT)?;
        within("asset_price", s.asset_price, MAX_AMOUNT)?;
        within("staking_reward_rate", s.annual_reward_rate, MAX_RATE)?;
        within("staking_take_rate", s.take_rate, MAX_RATE)?;

        within("custody_auc", self.custody.assets_under_custody, MAX_AMOUNT)?;
        within("custody_fee_bps", self.custody.fee.value(), MAX_FEE_BPS)?;
        bounded("other_adjustment", self.other_adjustment, MAX_AMOUNT)?;

        match &self.transactions {
            Some(txn) => txn.validate(),
            None => Ok(()),
        }
    }

    /// Transaction inputs, or an error naming the period.
    pub fn require_transactions(&self) -> Result<&TransactionInputs, ValidationError> {
        self.transactions
            .as_ref()
            .ok_or_else(|| ValidationError::MissingTransactionInputs(self.period.clone()))
    }

    /// Mutable transaction inputs, or an error naming the period.
    pub fn require_transactions_mut(&mut self) -> Result<&mut TransactionInputs, ValidationError> {
        let period = self.period.clone();
        self.transactions
            .as_mut()
            .ok_or(ValidationError::MissingTransactionInputs(period))
    }
}

pub(crate) fn non_negative(field: &str, value: Decimal) -> Result<(), ValidationError> {
    if value < Decimal::ZERO {
        Err(ValidationError::negative(field, value))
    } else {
        Ok(())
    }
}

fn bounded(field: &str, value: Decimal, max: Decimal) -> Result<(), ValidationError> {
    if value.abs() > max {
        Err(ValidationError::out_of_range(field, value, max))
    } else {
        Ok(())
    }
}

fn within(field: &str, value: Decimal, max: Decimal) -> Result<(), ValidationError> {
    non_negative(field, value)?;
    bounded(field, value, max)
}
