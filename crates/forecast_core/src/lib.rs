//! # forecast_core: Revenue Model Foundation
//!
//! ## Layer 1 (Foundation) Role
//!
//! forecast_core is the bottom layer of the forecast workspace, providing:
//! - Unit types: `BasisPoints` (`types::units`)
//! - Sentiment multipliers with the month-1 anchor and clamp bounds (`types::sentiment`)
//! - The strongly-typed `ParameterSet` and its flat key-value intake (`types::params`, `types::input`)
//! - Error taxonomy: `ConfigurationError`, `ValidationError`, `BacktestToleranceExceeded` (`types::error`)
//! - Revenue component calculators and the aggregator (`model`)
//!
//! ## Zero I/O Principle
//!
//! Layer 1 performs no file access and no logging. Everything here is pure
//! arithmetic over `rust_decimal::Decimal`, so the same inputs always
//! produce the same totals to the last digit.
//!
//! ## Usage Examples
//!
//! ```rust
//! use forecast_core::model::{ModelConstants, RevenueAggregator};
//! use forecast_core::types::{FlatInput, ParameterSet};
//!
//! let input = FlatInput::from_pairs([
//!     ("period", "Q1 2025"),
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
//! let constants = ModelConstants::default();
//! let params = ParameterSet::from_flat(input, &constants.sentiment_bounds).unwrap();
//! let summary = RevenueAggregator::new(constants).aggregate(&params);
//!
//! assert_eq!(summary.grand_total.normalize().to_string(), "341565000");
//! ```

#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
#![warn(missing_docs)]

pub mod model;
pub mod types;
