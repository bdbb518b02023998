//! Core unit, input, and error types.
//!
//! This module provides:
//! - `units`: `BasisPoints` newtype (bps are never confused with fractions)
//! - `sentiment`: `SentimentMultipliers` and `SentimentBounds`
//! - `params`: the per-period `ParameterSet` and its input groups
//! - `input`: `FlatInput`, the flat key-value boundary the parameter set is read from
//! - `error`: `ConfigurationError`, `ValidationError`, `BacktestToleranceExceeded`, `ForecastError`
//!
//! # Re-exports
//!
//! Commonly used types are re-exported at this module level.

pub mod error;
pub mod input;
pub mod params;
pub mod sentiment;
pub mod units;

pub use error::{
    BacktestToleranceExceeded, ConfigurationError, ForecastError, ValidationError,
};
pub use input::FlatInput;
pub use params::{
    CustodyInputs, InterestInputs, ParameterSet, StakingInputs, TransactionInputs, MAX_AMOUNT,
    MAX_FEE_BPS, MAX_RATE, TRANSACTION_KEYS,
};
pub use sentiment::{SentimentBounds, SentimentMultipliers, ANCHOR_SENTIMENT};
pub use units::{percent_of, BasisPoints};
