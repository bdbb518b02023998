//! Revenue model: component calculators and the aggregator.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────┐
//! │              RevenueAggregator                │
//! ├──────────────────────────────────────────────┤
//! │  ModelConstants     - divisor, scale, bounds │
//! │  components         - Interest, Staking,     │
//! │                       Custody, Other         │
//! │  TransactionBreakdown - fixed + variable     │
//! │  RevenueSummary     - S&S, txn, grand total  │
//! └──────────────────────────────────────────────┘
//! ```

mod aggregator;
pub mod components;
mod constants;

pub use aggregator::{RevenueAggregator, RevenueSummary, TransactionBreakdown};
pub use components::{ComponentBreakdown, RevenueComponent};
pub use constants::{
    ModelConstants, DEFAULT_NOTIONAL_UNIT_SCALE, DEFAULT_QUARTER_FRACTION_DIVISOR,
    MAX_NOTIONAL_UNIT_SCALE,
};
