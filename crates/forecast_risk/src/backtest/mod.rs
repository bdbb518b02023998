//! Historical backtest validation.
//!
//! A [`BacktestRecord`] pairs a historical period's drivers with its
//! published total. [`BacktestValidator`] runs the model on the drivers and
//! checks the percentage error against a tolerance.

mod record;
mod validator;

pub use record::{BacktestRecord, REFERENCE_TOTAL_KEY};
pub use validator::{BacktestBatch, BacktestReport, BacktestValidator, DEFAULT_TOLERANCE_PCT};
