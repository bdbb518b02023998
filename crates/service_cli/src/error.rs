//! Error types for the revcast CLI.

use forecast_core::types::ForecastError;
use thiserror::Error;

use crate::config::SettingsError;

/// CLI result type.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Input file does not exist
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// Invalid command-line argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Model settings could not be loaded or failed validation
    #[error("Settings error: {0}")]
    Settings(#[from] SettingsError),

    /// A period file is not valid TOML
    #[error("{path}: TOML parse error: {message}")]
    PeriodSyntax {
        /// Period file path
        path: String,
        /// Parser message
        message: String,
    },

    /// A period file failed configuration or validation checks
    #[error("{path}: {source}")]
    Period {
        /// Period file path
        path: String,
        /// Underlying failure
        #[source]
        source: ForecastError,
    },

    /// Forecast engine error outside a file context
    #[error(transparent)]
    Forecast(#[from] ForecastError),

    /// Sentiment feed could not supply the requested months
    #[error("Sentiment feed error: {0}")]
    Sentiment(String),

    /// One or more backtest periods failed
    #[error("{failed} of {total} backtest periods failed")]
    BacktestFailed {
        /// Failed periods (load errors and tolerance breaches)
        failed: usize,
        /// Periods requested
        total: usize,
    },

    /// One or more files failed the check command
    #[error("{failed} of {total} files failed validation")]
    CheckFailed {
        /// Files with problems
        failed: usize,
        /// Files checked
        total: usize,
    },

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Create an invalid argument error
    pub fn invalid_argument(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }

    /// Create a sentiment feed error
    pub fn sentiment(msg: impl Into<String>) -> Self {
        Self::Sentiment(msg.into())
    }

    /// Attach a file path to a forecast error
    pub fn period(path: impl Into<String>, source: impl Into<ForecastError>) -> Self {
        Self::Period {
            path: path.into(),
            source: source.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use forecast_core::types::ConfigurationError;

    #[test]
    fn test_error_display() {
        let err = CliError::invalid_argument("bad points");
        assert!(err.to_string().contains("bad points"));

        let err = CliError::BacktestFailed { failed: 1, total: 2 };
        assert_eq!(err.to_string(), "1 of 2 backtest periods failed");
    }

    #[test]
    fn test_period_error_includes_path() {
        let err = CliError::period(
            "configs/q1_2025.toml",
            ConfigurationError::MissingField("fiat_rate".to_string()),
        );
        let display = err.to_string();
        assert!(display.starts_with("configs/q1_2025.toml: "));
        assert!(display.contains("fiat_rate"));
    }
}
