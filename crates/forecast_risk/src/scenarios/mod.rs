//! Scenario analysis for the quarterly forecast.
//!
//! This module provides:
//! - [`ParameterShift`] and [`ScenarioOverride`]: declarative deltas on
//!   transaction drivers
//! - [`ScenarioKind`]: the closed Base/Bull/Bear set with its overrides
//! - [`ScenarioEngine`]: derives each variant and re-runs the aggregator

mod engine;
mod presets;
mod shifts;

pub use engine::{ScenarioDelta, ScenarioEngine, ScenarioResult, ScenarioRun};
pub use presets::{
    ScenarioKind, SCENARIO_NOTIONAL_PCT, SCENARIO_SENTIMENT_DELTA, SCENARIO_TAKE_RATE_BPS,
};
pub use shifts::{ParameterShift, ScenarioOverride};
