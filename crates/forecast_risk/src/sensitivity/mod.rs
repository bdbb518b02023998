//! Sensitivity sweeps over transaction drivers.
//!
//! Each grid point derives an independent parameter set from the base and
//! re-runs the aggregator; no state carries over between points.
//!
//! - [`SensitivitySweep::sweep`]: one driver over a delta grid
//! - [`SensitivitySweep::sweep_grid`]: two drivers over the cross product

mod grid;
mod sweep;

pub use grid::{GridCell, SensitivityGrid};
pub use sweep::{
    symmetric_grid, SensitivityPoint, SensitivitySweep, SensitivityTable, SweepTarget,
    DEFAULT_NOTIONAL_STEP, DEFAULT_TAKE_RATE_STEP,
};
