//! Revenue aggregation.
//!
//! Combines the component calculators into the subscription and services
//! total, adds fixed-plus-variable transaction revenue, and reports the grand
//! total. Pure: the same parameter set always yields the same summary.

use super::components::ComponentBreakdown;
use super::constants::ModelConstants;
use crate::types::{ParameterSet, TransactionInputs};
use rust_decimal::Decimal;
use serde::Serialize;

/// Monthly transaction revenue.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TransactionBreakdown {
    /// Fixed month-1 revenue (never scaled by sentiment)
    pub month1: Decimal,
    /// notional_2 × scale × take-rate × sentiment_2
    pub month2: Decimal,
    /// notional_3 × scale × take-rate × sentiment_3
    pub month3: Decimal,
}

impl TransactionBreakdown {
    /// Compute from transaction inputs.
    pub fn compute(inputs: &TransactionInputs, notional_unit_scale: Decimal) -> Self {
        Self {
            month1: inputs.month1_fixed_revenue,
            month2: variable_month(
                inputs.notional_month2,
                notional_unit_scale,
                inputs.take_rate,
                inputs.sentiment.month2(),
            ),
            month3: variable_month(
                inputs.notional_month3,
                notional_unit_scale,
                inputs.take_rate,
                inputs.sentiment.month3(),
            ),
        }
    }

    /// Sum of the three months.
    pub fn total(&self) -> Decimal {
        self.month1 + self.month2 + self.month3
    }
}

fn variable_month(notional: Decimal, scale: Decimal, take_rate: Decimal, sentiment: Decimal) -> Decimal {
    notional * scale * take_rate * sentiment
}

/// Aggregated revenue for one parameter set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RevenueSummary {
    /// Period label
    pub period: String,
    /// Component breakdown
    pub components: ComponentBreakdown,
    /// Interest + Staking + Custody + Other
    pub subscriptions_and_services_total: Decimal,
    /// Monthly transaction revenue (zero when the set has no transaction inputs)
    pub transactions: TransactionBreakdown,
    /// Sum of the monthly transaction revenue
    pub transaction_total: Decimal,
    /// S&S total + transaction total
    pub grand_total: Decimal,
}

/// Runs the component calculators and combines their output.
///
/// # Examples
/// ```
/// use forecast_core::model::{ModelConstants, RevenueAggregator};
///
/// let aggregator = RevenueAggregator::new(ModelConstants::default());
/// assert_eq!(aggregator.constants().quarter_fraction_divisor.to_string(), "4");
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RevenueAggregator {
    constants: ModelConstants,
}

impl RevenueAggregator {
    /// Create an aggregator over the given constants.
    pub fn new(constants: ModelConstants) -> Self {
        Self { constants }
    }

    /// The constants in force.
    pub fn constants(&self) -> &ModelConstants {
        &self.constants
    }

    /// Component breakdown only.
    pub fn components(&self, params: &ParameterSet) -> ComponentBreakdown {
        ComponentBreakdown::compute(params, self.constants.quarter_fraction_divisor)
    }

    /// Transaction breakdown only; zero when the set has no transaction inputs.
    pub fn transactions(&self, params: &ParameterSet) -> TransactionBreakdown {
        params
            .transactions
            .as_ref()
            .map(|txn| TransactionBreakdown::compute(txn, self.constants.notional_unit_scale))
            .unwrap_or_default()
    }

    /// Full summary.
    pub fn aggregate(&self, params: &ParameterSet) -> RevenueSummary {
        let components = self.components(params);
        let transactions = self.transactions(params);
        let subscriptions_and_services_total = components.subtotal();
        let transaction_total = transactions.total();

        RevenueSummary {
            period: params.period.clone(),
            components,
            subscriptions_and_services_total,
            transactions,
            transaction_total,
            grand_total: subscriptions_and_services_total + transaction_total,
        }
    }

    /// Grand total only.
    pub fn grand_total(&self, params: &ParameterSet) -> Decimal {
        self.components(params).subtotal() + self.transactions(params).total()
    }
}
