//! Scenario execution engine.
//!
//! Derives each scenario's parameter set from the base and re-runs the
//! aggregator on it.

use super::presets::ScenarioKind;
use forecast_core::model::{RevenueAggregator, RevenueSummary};
use forecast_core::types::{percent_of, ParameterSet, TransactionInputs, ValidationError};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{debug, warn};

/// Grand-total movement of a scenario against the base.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioDelta {
    /// Base grand total
    pub base_value: Decimal,
    /// Scenario grand total
    pub scenario_value: Decimal,
    /// scenario - base
    pub delta: Decimal,
    /// delta as a percentage of |base| (zero when base is zero)
    pub delta_pct: Decimal,
}

impl ScenarioDelta {
    /// Compute the delta between two totals.
    pub fn new(base_value: Decimal, scenario_value: Decimal) -> Self {
        let delta = scenario_value - base_value;
        let delta_pct = percent_of(delta, base_value.abs());
        Self {
            base_value,
            scenario_value,
            delta,
            delta_pct,
        }
    }

    /// Scenario total above base.
    pub fn is_gain(&self) -> bool {
        self.delta > Decimal::ZERO
    }

    /// Scenario total below base.
    pub fn is_loss(&self) -> bool {
        self.delta < Decimal::ZERO
    }
}

/// Result of one scenario.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScenarioResult {
    /// Scenario that was run
    pub kind: ScenarioKind,
    /// Derived parameter set the aggregator consumed
    pub parameters: ParameterSet,
    /// Revenue breakdown
    pub summary: RevenueSummary,
    /// Movement against the base grand total
    pub delta: ScenarioDelta,
}

impl ScenarioResult {
    /// Transaction drivers after the override, if the set has any.
    pub fn overridden(&self) -> Option<&TransactionInputs> {
        self.parameters.transactions.as_ref()
    }
}

/// Results of a multi-scenario run.
///
/// Scenarios that fail validation are recorded in `skipped` and do not stop
/// the others.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScenarioRun {
    /// Successful results in request order
    pub results: Vec<ScenarioResult>,
    /// Scenarios that could not be derived, with the reason
    pub skipped: Vec<(ScenarioKind, ValidationError)>,
}

impl ScenarioRun {
    /// Result for a given scenario.
    pub fn get(&self, kind: ScenarioKind) -> Option<&ScenarioResult> {
        self.results.iter().find(|r| r.kind == kind)
    }

    /// True when every requested scenario produced a result.
    pub fn is_complete(&self) -> bool {
        self.skipped.is_empty()
    }

    /// Scenario with the highest grand total.
    pub fn best_case(&self) -> Option<&ScenarioResult> {
        self.results
            .iter()
            .max_by(|a, b| a.summary.grand_total.cmp(&b.summary.grand_total))
    }

    /// Scenario with the lowest grand total.
    pub fn worst_case(&self) -> Option<&ScenarioResult> {
        self.results
            .iter()
            .min_by(|a, b| a.summary.grand_total.cmp(&b.summary.grand_total))
    }
}

/// Engine for running forecast scenarios.
///
/// # Examples
/// ```
/// use forecast_core::model::RevenueAggregator;
/// use forecast_risk::scenarios::{ScenarioEngine, ScenarioKind};
///
/// let engine = ScenarioEngine::new(RevenueAggregator::default());
/// assert_eq!(ScenarioKind::all().len(), 3);
/// # let _ = engine;
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct ScenarioEngine {
    aggregator: RevenueAggregator,
}

impl ScenarioEngine {
    /// Create an engine over the given aggregator.
    pub fn new(aggregator: RevenueAggregator) -> Self {
        Self { aggregator }
    }

    /// The aggregator in use.
    pub fn aggregator(&self) -> &RevenueAggregator {
        &self.aggregator
    }

    /// Derive the parameter set for `kind`.
    ///
    /// Base returns an unchanged clone. Bull and Bear require transaction
    /// inputs and fail with [`ValidationError::MissingTransactionInputs`]
    /// otherwise.
    pub fn derive(
        &self,
        kind: ScenarioKind,
        base: &ParameterSet,
    ) -> Result<ParameterSet, ValidationError> {
        kind.overrides()
            .apply(base, &self.aggregator.constants().sentiment_bounds)
    }

    /// Run a single scenario.
    pub fn run(
        &self,
        kind: ScenarioKind,
        base: &ParameterSet,
    ) -> Result<ScenarioResult, ValidationError> {
        let base_total = self.aggregator.grand_total(base);
        self.run_against(kind, base, base_total)
    }

    /// Run every scenario in report order.
    pub fn run_all(&self, base: &ParameterSet) -> ScenarioRun {
        self.run_kinds(base, &ScenarioKind::all())
    }

    /// Run the requested scenarios, collecting failures instead of stopping.
    pub fn run_kinds(&self, base: &ParameterSet, kinds: &[ScenarioKind]) -> ScenarioRun {
        let base_total = self.aggregator.grand_total(base);
        let mut run = ScenarioRun::default();

        for &kind in kinds {
            match self.run_against(kind, base, base_total) {
                Ok(result) => run.results.push(result),
                Err(e) => {
                    warn!(period = %base.period, scenario = kind.name(), error = %e, "Scenario skipped");
                    run.skipped.push((kind, e));
                }
            }
        }
        run
    }

    fn run_against(
        &self,
        kind: ScenarioKind,
        base: &ParameterSet,
        base_total: Decimal,
    ) -> Result<ScenarioResult, ValidationError> {
        let parameters = self.derive(kind, base)?;
        let summary = self.aggregator.aggregate(&parameters);
        let delta = ScenarioDelta::new(base_total, summary.grand_total);

        debug!(
            period = %parameters.period,
            scenario = kind.name(),
            grand_total = %summary.grand_total,
            delta = %delta.delta,
            "Scenario computed"
        );

        Ok(ScenarioResult {
            kind,
            parameters,
            summary,
            delta,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::types::{
        BasisPoints, CustodyInputs, InterestInputs, SentimentBounds, SentimentMultipliers,
        StakingInputs,
    };
    use rust_decimal_macros::dec;

    fn q3_params(sentiment_m2: Decimal, sentiment_m3: Decimal) -> ParameterSet {
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
            transactions: Some(TransactionInputs {
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
            }),
        }
    }

    // ================================================================
    // ScenarioDelta
    // ================================================================

    #[test]
    fn test_delta_gain_and_pct() {
        let delta = ScenarioDelta::new(dec!(200), dec!(250));
        assert_eq!(delta.delta, dec!(50));
        assert_eq!(delta.delta_pct, dec!(25));
        assert!(delta.is_gain());
        assert!(!delta.is_loss());
    }

    #[test]
    fn test_delta_zero_base() {
        let delta = ScenarioDelta::new(Decimal::ZERO, dec!(-10));
        assert_eq!(delta.delta_pct, Decimal::ZERO);
        assert!(delta.is_loss());
    }

    // ================================================================
    // Engine
    // ================================================================

    #[test]
    fn test_base_reproduces_input() {
        let engine = ScenarioEngine::default();
        let base = q3_params(dec!(1.018), dec!(1.015));
        let result = engine.run(ScenarioKind::Base, &base).unwrap();

        assert_eq!(result.parameters, base);
        assert_eq!(result.summary.grand_total, dec!(1199357000));
        assert_eq!(result.delta.delta, Decimal::ZERO);
    }

    #[test]
    fn test_bull_drivers_and_total() {
        let engine = ScenarioEngine::default();
        let result = engine
            .run(ScenarioKind::Bull, &q3_params(dec!(1.018), dec!(1.015)))
            .unwrap();
        let txn = result.overridden().unwrap();

        assert_eq!(txn.notional_month2, dec!(79.2));
        assert_eq!(txn.notional_month3, dec!(88));
        assert_eq!(txn.take_rate, dec!(0.0027));
        assert_eq!(txn.sentiment.as_array(), [dec!(1), dec!(1.038), dec!(1.035)]);
        assert_eq!(result.summary.transaction_total, dec!(827881920));
        assert_eq!(result.summary.grand_total, dec!(1280998920));
        assert_eq!(result.delta.delta, dec!(81641920));
    }

    #[test]
    fn test_bear_drivers_and_total() {
        let engine = ScenarioEngine::default();
        let result = engine
            .run(ScenarioKind::Bear, &q3_params(dec!(1.018), dec!(1.015)))
            .unwrap();
        let txn = result.overridden().unwrap();

        assert_eq!(txn.notional_month2, dec!(64.8));
        assert_eq!(txn.notional_month3, dec!(72));
        assert_eq!(txn.take_rate, dec!(0.0023));
        assert_eq!(txn.sentiment.as_array(), [dec!(1), dec!(0.998), dec!(0.995)]);
        assert_eq!(result.summary.transaction_total, dec!(673513920));
        assert_eq!(result.summary.grand_total, dec!(1126630920));
    }

    #[test]
    fn test_bull_sentiment_capped() {
        let engine = ScenarioEngine::default();
        let result = engine
            .run(ScenarioKind::Bull, &q3_params(dec!(1.04), dec!(1.05)))
            .unwrap();
        let sentiment = result.overridden().unwrap().sentiment;
        assert_eq!(sentiment.month2(), dec!(1.05));
        assert_eq!(sentiment.month3(), dec!(1.05));
    }

    #[test]
    fn test_bear_sentiment_floored() {
        let engine = ScenarioEngine::default();
        let result = engine
            .run(ScenarioKind::Bear, &q3_params(dec!(0.96), dec!(0.95)))
            .unwrap();
        let sentiment = result.overridden().unwrap().sentiment;
        assert_eq!(sentiment.month2(), dec!(0.95));
        assert_eq!(sentiment.month3(), dec!(0.95));
    }

    #[test]
    fn test_run_all_order_and_extremes() {
        let engine = ScenarioEngine::default();
        let run = engine.run_all(&q3_params(dec!(1.018), dec!(1.015)));

        assert!(run.is_complete());
        let kinds: Vec<_> = run.results.iter().map(|r| r.kind).collect();
        assert_eq!(kinds, ScenarioKind::all().to_vec());
        assert_eq!(run.best_case().unwrap().kind, ScenarioKind::Bull);
        assert_eq!(run.worst_case().unwrap().kind, ScenarioKind::Bear);
        assert!(run.get(ScenarioKind::Bear).unwrap().delta.is_loss());
    }

    #[test]
    fn test_run_all_without_transactions_skips_bull_and_bear() {
        let engine = ScenarioEngine::default();
        let mut base = q3_params(dec!(1.018), dec!(1.015));
        base.transactions = None;
        let run = engine.run_all(&base);

        assert_eq!(run.results.len(), 1);
        assert_eq!(run.results[0].kind, ScenarioKind::Base);
        let skipped: Vec<_> = run.skipped.iter().map(|(k, _)| *k).collect();
        assert_eq!(skipped, vec![ScenarioKind::Bull, ScenarioKind::Bear]);
        assert!(!run.is_complete());
    }

    #[test]
    fn test_scenarios_do_not_mutate_base() {
        let engine = ScenarioEngine::default();
        let base = q3_params(dec!(1.018), dec!(1.015));
        let snapshot = base.clone();
        let _ = engine.run_all(&base);
        assert_eq!(base, snapshot);
    }
}
