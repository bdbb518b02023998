//! # forecast_risk (L2: Application)
//!
//! Scenario analysis, sensitivity sweeps, and historical backtest validation
//! built on the `forecast_core` revenue model.
//!
//! This crate provides:
//! - Closed Base/Bull/Bear scenarios with declarative parameter shifts
//! - One- and two-parameter sensitivity sweeps over take-rate and notional
//! - Backtest records, tolerance validation, and batch runs that collect
//!   every breach
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │            forecast_risk (L2)           │
//! ├─────────────────────────────────────────┤
//! │  scenarios/   - ScenarioKind, shifts,   │
//! │                 ScenarioEngine          │
//! │  sensitivity/ - SensitivitySweep, grid  │
//! │  backtest/    - BacktestRecord,         │
//! │                 BacktestValidator       │
//! └─────────────────────────────────────────┘
//!          ↓
//! ┌─────────────────────────────────────────┐
//! │           forecast_core (L1)            │
//! │  ParameterSet, RevenueAggregator        │
//! └─────────────────────────────────────────┘
//! ```
//!
//! Every derived parameter set is an independent clone of its base; nothing
//! here holds shared mutable state between scenarios or grid points.
//!
//! ## Example
//!
//! ```
//! use forecast_core::model::RevenueAggregator;
//! use forecast_core::types::{FlatInput, SentimentBounds};
//! use forecast_risk::backtest::{BacktestRecord, BacktestValidator};
//!
//! let input = FlatInput::from_pairs([
//!     ("period", "Q1 2025"),
//!     ("reference_total", "341565000"),
//!     ("fiat_balance", "25000000000"),
//!     ("fiat_rate", "0.0540"),
//!     ("fiat_share", "0.22"),
//!     ("stable_balance", "28000000000"),
//!     ("stable_rate", "0.0540"),
//!     ("stable_share", "0.0035"),
//!     ("staked_units", "33000000"),
//!     ("asset_price", "3500"),
//!     ("staking_reward_rate", "0.040"),
//!     ("staking_take_rate", "0.115"),
//!     ("custody_auc", "150000000000"),
//!     ("custody_fee_bps", "1.3"),
//!     ("other_adjustment", "-113052000"),
//! ]);
//!
//! let record = BacktestRecord::from_flat(input, &SentimentBounds::default()).unwrap();
//! let validator = BacktestValidator::new(RevenueAggregator::default());
//! let report = validator.validate(&record).unwrap();
//!
//! assert!(report.passed);
//! assert!(report.error_pct.is_zero());
//! ```

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![warn(missing_docs)]

pub mod backtest;
pub mod scenarios;
pub mod sensitivity;

// Re-export commonly used types
pub use backtest::{
    BacktestBatch, BacktestRecord, BacktestReport, BacktestValidator, DEFAULT_TOLERANCE_PCT,
};
pub use scenarios::{
    ParameterShift, ScenarioDelta, ScenarioEngine, ScenarioKind, ScenarioOverride,
    ScenarioResult, ScenarioRun,
};
pub use sensitivity::{
    symmetric_grid, GridCell, SensitivityGrid, SensitivityPoint, SensitivitySweep,
    SensitivityTable, SweepTarget,
};
