//! One-parameter sensitivity sweep.

use super::grid::{GridCell, SensitivityGrid};
use crate::scenarios::{ParameterShift, ScenarioOverride};
use forecast_core::model::RevenueAggregator;
use forecast_core::types::{ParameterSet, ValidationError};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Default take-rate step: 0.0005 (5bps).
pub const DEFAULT_TAKE_RATE_STEP: Decimal = Decimal::from_parts(5, 0, 0, false, 4);

/// Default notional step: 10%.
pub const DEFAULT_NOTIONAL_STEP: Decimal = Decimal::from_parts(10, 0, 0, false, 2);

// =============================================================================
// SWEEP TARGET
// =============================================================================

/// Driver being swept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SweepTarget {
    /// Blended take-rate; deltas are absolute fractions (0.0005 = +5bps)
    TakeRate,
    /// Month-2 and month-3 notional; deltas are relative (0.10 = +10%)
    Notional,
}

impl SweepTarget {
    /// Short name used in reports and on the command line.
    pub fn name(&self) -> &'static str {
        match self {
            Self::TakeRate => "take-rate",
            Self::Notional => "notional",
        }
    }

    /// Human-readable description.
    pub fn description(&self) -> &'static str {
        match self {
            Self::TakeRate => "Blended transaction take-rate (absolute delta)",
            Self::Notional => "Variable-month notional volume (relative delta)",
        }
    }

    /// Step used when the caller does not supply one.
    pub fn default_step(&self) -> Decimal {
        match self {
            Self::TakeRate => DEFAULT_TAKE_RATE_STEP,
            Self::Notional => DEFAULT_NOTIONAL_STEP,
        }
    }

    /// Shift that moves this driver by `delta`.
    pub fn shift_for(&self, delta: Decimal) -> ParameterShift {
        match self {
            Self::TakeRate => ParameterShift::take_rate_fraction(delta),
            Self::Notional => ParameterShift::notional_pct(delta),
        }
    }
}

impl fmt::Display for SweepTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SweepTarget {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "take-rate" | "take_rate" | "takerate" => Ok(Self::TakeRate),
            "notional" => Ok(Self::Notional),
            other => Err(format!(
                "unknown sweep target '{}', expected take-rate or notional",
                other
            )),
        }
    }
}

/// Symmetric delta grid `[-n·step, ..., 0, ..., +n·step]`.
///
/// # Examples
/// ```
/// use forecast_risk::sensitivity::symmetric_grid;
/// use rust_decimal::Decimal;
///
/// let grid = symmetric_grid(Decimal::new(5, 4), 1);
/// assert_eq!(grid, vec![Decimal::new(-5, 4), Decimal::ZERO, Decimal::new(5, 4)]);
/// ```
pub fn symmetric_grid(step: Decimal, points_per_side: usize) -> Vec<Decimal> {
    let step = step.abs();
    let n = points_per_side as i64;
    (-n..=n).map(|i| step * Decimal::from(i)).collect()
}

// =============================================================================
// RESULTS
// =============================================================================

/// One grid point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SensitivityPoint {
    /// Applied delta
    pub delta: Decimal,
    /// Grand total at this point
    pub grand_total: Decimal,
    /// grand_total - base grand total
    pub delta_from_base: Decimal,
}

/// Ordered sweep results for one driver.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SensitivityTable {
    /// Period label
    pub period: String,
    /// Swept driver
    pub target: SweepTarget,
    /// Grand total of the unshifted base
    pub base_grand_total: Decimal,
    /// Points in grid order
    pub points: Vec<SensitivityPoint>,
}

impl SensitivityTable {
    /// Point for an exact delta.
    pub fn point_at(&self, delta: Decimal) -> Option<&SensitivityPoint> {
        self.points.iter().find(|p| p.delta == delta)
    }

    /// Largest absolute move from base across the grid.
    pub fn max_abs_delta(&self) -> Decimal {
        self.points
            .iter()
            .map(|p| p.delta_from_base.abs())
            .max()
            .unwrap_or(Decimal::ZERO)
    }
}

// =============================================================================
// SWEEP
// =============================================================================

/// Runs sensitivity sweeps against an aggregator.
#[derive(Debug, Clone, Copy, Default)]
pub struct SensitivitySweep {
    aggregator: RevenueAggregator,
}

impl SensitivitySweep {
    /// Create a sweep over the given aggregator.
    pub fn new(aggregator: RevenueAggregator) -> Self {
        Self { aggregator }
    }

    /// Sweep one driver over `grid`, preserving grid order.
    ///
    /// # Errors
    ///
    /// - [`ValidationError::MissingTransactionInputs`] when `base` has no
    ///   transaction inputs
    /// - [`ValidationError::NegativeValue`] when a grid point drives the
    ///   driver below zero
    /// - [`ValidationError::ValueOutOfRange`] when a grid point is larger
    ///   than the accepted shift or driver magnitude
    pub fn sweep(
        &self,
        base: &ParameterSet,
        target: SweepTarget,
        grid: &[Decimal],
    ) -> Result<SensitivityTable, ValidationError> {
        base.require_transactions()?;
        let base_grand_total = self.aggregator.grand_total(base);

        let points = grid
            .iter()
            .map(|&delta| {
                let grand_total = self.evaluate(base, &[target.shift_for(delta)])?;
                Ok(SensitivityPoint {
                    delta,
                    grand_total,
                    delta_from_base: grand_total - base_grand_total,
                })
            })
            .collect::<Result<Vec<_>, ValidationError>>()?;

        debug!(
            period = %base.period,
            target = target.name(),
            points = points.len(),
            "Sensitivity sweep complete"
        );

        Ok(SensitivityTable {
            period: base.period.clone(),
            target,
            base_grand_total,
            points,
        })
    }

    /// Sweep two drivers over the cross product of their grids.
    ///
    /// Each cell applies the row shift, then the column shift, to a fresh
    /// clone of `base`.
    pub fn sweep_grid(
        &self,
        base: &ParameterSet,
        rows: (SweepTarget, &[Decimal]),
        cols: (SweepTarget, &[Decimal]),
    ) -> Result<SensitivityGrid, ValidationError> {
        base.require_transactions()?;
        let base_grand_total = self.aggregator.grand_total(base);
        let (row_target, row_deltas) = rows;
        let (col_target, col_deltas) = cols;

        let mut cells = Vec::with_capacity(row_deltas.len());
        for &row_delta in row_deltas {
            let mut row = Vec::with_capacity(col_deltas.len());
            for &col_delta in col_deltas {
                let shifts = [row_target.shift_for(row_delta), col_target.shift_for(col_delta)];
                let grand_total = self.evaluate(base, &shifts)?;
                row.push(GridCell {
                    row_delta,
                    col_delta,
                    grand_total,
                    delta_from_base: grand_total - base_grand_total,
                });
            }
            cells.push(row);
        }

        debug!(
            period = %base.period,
            rows = row_target.name(),
            cols = col_target.name(),
            "Sensitivity grid complete"
        );

        Ok(SensitivityGrid {
            period: base.period.clone(),
            row_target,
            col_target,
            base_grand_total,
            cells,
        })
    }

    fn evaluate(
        &self,
        base: &ParameterSet,
        shifts: &[ParameterShift],
    ) -> Result<Decimal, ValidationError> {
        let derived = ScenarioOverride::new("sweep")
            .with_shifts(shifts.iter().copied())
            .apply(base, &self.aggregator.constants().sentiment_bounds)?;
        Ok(self.aggregator.grand_total(&derived))
    }
}
