//! Backtest tolerance validation.

use super::record::BacktestRecord;
use forecast_core::model::{RevenueAggregator, RevenueSummary};
use forecast_core::types::{percent_of, BacktestToleranceExceeded};
use rust_decimal::Decimal;
use serde::Serialize;
use tracing::{info, warn};

/// Default absolute error bound: 0.05%.
pub const DEFAULT_TOLERANCE_PCT: Decimal = Decimal::from_parts(5, 0, 0, false, 2);

/// Outcome of one backtest.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct BacktestReport {
    /// Period label
    pub period: String,
    /// Full model breakdown for the period
    pub summary: RevenueSummary,
    /// Model grand total
    pub computed_total: Decimal,
    /// Published total
    pub reference_total: Decimal,
    /// computed - reference
    pub error_abs: Decimal,
    /// Signed error in percent of the reference
    pub error_pct: Decimal,
    /// Bound the error was checked against
    pub tolerance_pct: Decimal,
    /// |error_pct| <= tolerance_pct
    pub passed: bool,
}

impl BacktestReport {
    /// Breach details, if the report failed.
    pub fn breach(&self) -> Option<BacktestToleranceExceeded> {
        if self.passed {
            return None;
        }
        Some(BacktestToleranceExceeded {
            period: self.period.clone(),
            computed_total: self.computed_total,
            reference_total: self.reference_total,
            error_pct: self.error_pct,
            tolerance_pct: self.tolerance_pct,
        })
    }
}

/// Reports from a batch run.
///
/// Every record is evaluated; breaches are collected rather than stopping
/// the batch.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct BacktestBatch {
    /// One report per record, in input order
    pub reports: Vec<BacktestReport>,
    /// Breaches, in input order
    pub failures: Vec<BacktestToleranceExceeded>,
}

impl BacktestBatch {
    /// True when no record breached tolerance.
    pub fn all_passed(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of reports.
    pub fn len(&self) -> usize {
        self.reports.len()
    }

    /// True when the batch was empty.
    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Reports on success, every breach otherwise.
    pub fn into_result(self) -> Result<Vec<BacktestReport>, Vec<BacktestToleranceExceeded>> {
        if self.failures.is_empty() {
            Ok(self.reports)
        } else {
            Err(self.failures)
        }
    }
}

/// Checks model output against published totals.
///
/// # Examples
/// ```
/// use forecast_core::model::RevenueAggregator;
/// use forecast_risk::backtest::BacktestValidator;
/// use rust_decimal::Decimal;
///
/// let validator = BacktestValidator::new(RevenueAggregator::default())
///     .with_tolerance(Decimal::new(1, 1));
/// assert_eq!(validator.tolerance_pct(), Decimal::new(1, 1));
/// ```
#[derive(Clone, Copy, Debug)]
pub struct BacktestValidator {
    aggregator: RevenueAggregator,
    tolerance_pct: Decimal,
}

impl Default for BacktestValidator {
    fn default() -> Self {
        Self::new(RevenueAggregator::default())
    }
}

impl BacktestValidator {
    /// Create a validator with the default tolerance.
    pub fn new(aggregator: RevenueAggregator) -> Self {
        Self {
            aggregator,
            tolerance_pct: DEFAULT_TOLERANCE_PCT,
        }
    }

    /// Replace the tolerance (percent, absolute value is used).
    pub fn with_tolerance(mut self, tolerance_pct: Decimal) -> Self {
        self.tolerance_pct = tolerance_pct.abs();
        self
    }

    /// The tolerance in force.
    pub fn tolerance_pct(&self) -> Decimal {
        self.tolerance_pct
    }

    /// Run the model on a record and compare; never fails.
    pub fn evaluate(&self, record: &BacktestRecord) -> BacktestReport {
        let summary = self.aggregator.aggregate(record.parameters());
        let computed_total = summary.grand_total;
        let reference_total = record.reference_total();
        let error_abs = computed_total - reference_total;
        // BacktestRecord guarantees a non-zero reference
        let error_pct = percent_of(error_abs, reference_total);

        BacktestReport {
            period: record.period().to_string(),
            summary,
            computed_total,
            reference_total,
            error_abs,
            error_pct,
            tolerance_pct: self.tolerance_pct,
            passed: error_pct.abs() <= self.tolerance_pct,
        }
    }

    /// Evaluate and fail on a breach.
    pub fn validate(
        &self,
        record: &BacktestRecord,
    ) -> Result<BacktestReport, BacktestToleranceExceeded> {
        let report = self.evaluate(record);
        match report.breach() {
            Some(breach) => Err(breach),
            None => Ok(report),
        }
    }

    /// Evaluate every record, collecting breaches.
    pub fn run_batch<'a>(
        &self,
        records: impl IntoIterator<Item = &'a BacktestRecord>,
    ) -> BacktestBatch {
        let mut batch = BacktestBatch::default();

        for record in records {
            let report = self.evaluate(record);
            if let Some(breach) = report.breach() {
                warn!(
                    period = %breach.period,
                    error_pct = %breach.error_pct.round_dp(4),
                    tolerance_pct = %breach.tolerance_pct,
                    "Backtest out of tolerance"
                );
                batch.failures.push(breach);
            } else {
                info!(
                    period = %report.period,
                    error_pct = %report.error_pct.round_dp(4),
                    "Backtest passed"
                );
            }
            batch.reports.push(report);
        }
        batch
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::types::{
        BasisPoints, CustodyInputs, InterestInputs, ParameterSet, StakingInputs,
    };
    use rust_decimal_macros::dec;

    fn q1_params() -> ParameterSet {
        ParameterSet {
            period: "Q1 2025".to_string(),
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
            other_adjustment: dec!(-113052000),
            transactions: None,
        }
    }

    // ================================================================
    // Single record
    // ================================================================

    #[test]
    fn test_q1_exact_match() {
        let record = BacktestRecord::new(q1_params(), dec!(341565000)).unwrap();
        let report = BacktestValidator::default().validate(&record).unwrap();

        assert_eq!(report.computed_total, dec!(341565000));
        assert_eq!(report.summary.transaction_total, Decimal::ZERO);
        assert!(report.error_pct.is_zero());
        assert!(report.passed);
        assert!(report.breach().is_none());
    }

    #[test]
    fn test_breach_carries_fields() {
        let record = BacktestRecord::new(q1_params(), dec!(340000000)).unwrap();
        let err = BacktestValidator::default().validate(&record).unwrap_err();

        assert_eq!(err.period, "Q1 2025");
        assert_eq!(err.computed_total, dec!(341565000));
        assert_eq!(err.reference_total, dec!(340000000));
        assert_eq!(err.error_pct.round_dp(4), dec!(0.4603));
        assert_eq!(err.tolerance_pct, dec!(0.05));
    }

    #[test]
    fn test_error_at_bound_passes() {
        // 0.05% of 341,565,000 is 170,782.5
        let record = BacktestRecord::new(q1_params(), dec!(341565000)).unwrap();
        let mut shifted = record.parameters().clone();
        shifted.other_adjustment += dec!(170782.5);
        let at_bound = BacktestRecord::new(shifted, dec!(341565000)).unwrap();

        let report = BacktestValidator::default().evaluate(&at_bound);
        assert_eq!(report.error_pct, dec!(0.05));
        assert!(report.passed);
    }

    #[test]
    fn test_negative_error_uses_absolute_value() {
        let record = BacktestRecord::new(q1_params(), dec!(343000000)).unwrap();
        let report = BacktestValidator::default().evaluate(&record);
        assert!(report.error_pct < Decimal::ZERO);
        assert!(!report.passed);

        let loose = BacktestValidator::default().with_tolerance(dec!(-1));
        assert_eq!(loose.tolerance_pct(), dec!(1));
        assert!(loose.evaluate(&record).passed);
    }

    // ================================================================
    // Batch
    // ================================================================

    #[test]
    fn test_batch_collects_every_breach() {
        let records = vec![
            BacktestRecord::new(q1_params(), dec!(340000000)).unwrap(),
            BacktestRecord::new(q1_params(), dec!(341565000)).unwrap(),
            BacktestRecord::new(q1_params(), dec!(350000000)).unwrap(),
        ];
        let batch = BacktestValidator::default().run_batch(&records);

        assert_eq!(batch.len(), 3);
        assert!(!batch.all_passed());
        assert_eq!(batch.failures.len(), 2);
        assert_eq!(batch.failures[1].reference_total, dec!(350000000));
        assert!(batch.into_result().is_err());
    }

    #[test]
    fn test_empty_batch_passes() {
        let records: Vec<BacktestRecord> = Vec::new();
        let batch = BacktestValidator::default().run_batch(&records);
        assert!(batch.is_empty());
        assert!(batch.all_passed());
        assert_eq!(batch.into_result().unwrap().len(), 0);
    }
}
