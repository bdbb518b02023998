//! Monthly sentiment feed intake.
//!
//! Reads a CSV with header `month,sentiment_factor` (months as `YYYY-MM`)
//! and returns the factors for the quarter's three months. The first month
//! is the month before month 2 and must be the 1.00 anchor; when the feed
//! has no row for it, the anchor is used.

use chrono::{Months, NaiveDate};
use forecast_core::types::input::parse_decimal;
use forecast_core::types::{SentimentBounds, SentimentMultipliers, ANCHOR_SENTIMENT};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct SentimentRow {
    month: String,
    sentiment_factor: String,
}

/// Parse a `YYYY-MM` month label.
pub fn parse_month(label: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", label.trim()), "%Y-%m-%d")
        .map_err(|_| CliError::sentiment(format!("invalid month '{}', expected YYYY-MM", label)))
}

/// Parse a `YYYY-MM,YYYY-MM` argument.
pub fn parse_month_pair(arg: &str) -> Result<[NaiveDate; 2]> {
    let parts: Vec<&str> = arg.split(',').collect();
    match parts.as_slice() {
        [m2, m3] => Ok([parse_month(m2)?, parse_month(m3)?]),
        _ => Err(CliError::invalid_argument(format!(
            "expected two months as YYYY-MM,YYYY-MM, got '{}'",
            arg
        ))),
    }
}

/// Read every factor in the feed, keyed by month.
pub fn read_feed(path: &Path) -> Result<BTreeMap<NaiveDate, Decimal>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }

    let mut reader = csv::Reader::from_path(path)?;
    let mut factors = BTreeMap::new();

    for row in reader.deserialize() {
        let row: SentimentRow = row?;
        let month = parse_month(&row.month)?;
        let factor = parse_decimal("sentiment_factor", &row.sentiment_factor)
            .map_err(|e| CliError::sentiment(e.to_string()))?;
        if factors.insert(month, factor).is_some() {
            return Err(CliError::sentiment(format!(
                "duplicate month {} in {}",
                row.month.trim(),
                path.display()
            )));
        }
    }

    debug!(path = %path.display(), months = factors.len(), "Sentiment feed loaded");
    Ok(factors)
}

/// Factors for the quarter's three months, given its second and third.
///
/// Month 2 or 3 absent from the feed is an error. Month 1 falls back to the
/// anchor when absent and is returned as read otherwise.
pub fn load_monthly_factors(path: &Path, months: [NaiveDate; 2]) -> Result<[Decimal; 3]> {
    let feed = read_feed(path)?;
    let lookup = |month: NaiveDate| {
        feed.get(&month).copied().ok_or_else(|| {
            CliError::sentiment(format!(
                "month {} not found in {}",
                month.format("%Y-%m"),
                path.display()
            ))
        })
    };

    let first = months[0]
        .checked_sub_months(Months::new(1))
        .ok_or_else(|| CliError::sentiment(format!("no month precedes {}", months[0])))?;
    let month1 = match feed.get(&first) {
        Some(factor) => *factor,
        None => {
            debug!(month = %first.format("%Y-%m"), "Month 1 absent from feed, using anchor");
            ANCHOR_SENTIMENT
        }
    };

    Ok([month1, lookup(months[0])?, lookup(months[1])?])
}

/// Multipliers for a quarter; a month-1 factor other than 1.00 is rejected.
pub fn multipliers_from_feed(
    path: &Path,
    months: [NaiveDate; 2],
    bounds: &SentimentBounds,
) -> Result<SentimentMultipliers> {
    let [month1, month2, month3] = load_monthly_factors(path, months)?;
    SentimentMultipliers::new(month1, month2, month3, bounds)
        .map_err(|e| CliError::Forecast(e.into()))
}
