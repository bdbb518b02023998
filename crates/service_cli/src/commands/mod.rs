//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod backtest;
pub mod check;
pub mod forecast;
pub mod sensitivity;
