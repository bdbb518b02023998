//! Report rendering.
//!
//! Every report renders to a `String` in one of three formats: an aligned
//! text table, pretty JSON wrapped with a `generated_at` timestamp, or CSV
//! with one row per line item or grid point.

use chrono::{SecondsFormat, Utc};
use forecast_core::model::{RevenueComponent, RevenueSummary};
use forecast_risk::backtest::BacktestReport;
use forecast_risk::scenarios::{ScenarioKind, ScenarioResult, ScenarioRun};
use forecast_risk::sensitivity::{SensitivityGrid, SensitivityTable};
use rust_decimal::Decimal;
use serde::Serialize;
use std::fmt::Write as _;
use std::str::FromStr;

use crate::{CliError, Result};

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Aligned text
    Table,
    /// Pretty-printed JSON
    Json,
    /// Comma-separated values
    Csv,
}

impl FromStr for OutputFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(CliError::invalid_argument(format!(
                "Unknown format: {}. Supported: table, json, csv",
                other
            ))),
        }
    }
}

#[derive(Serialize)]
struct Envelope<'a, T: Serialize> {
    report: &'static str,
    generated_at: String,
    data: &'a T,
}

fn to_json<T: Serialize>(report: &'static str, data: &T) -> Result<String> {
    let envelope = Envelope {
        report,
        generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
        data,
    };
    Ok(serde_json::to_string_pretty(&envelope)?)
}

fn to_csv(header: &[&str], rows: Vec<Vec<String>>) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(header)?;
    for row in rows {
        writer.write_record(&row)?;
    }
    let bytes = writer.into_inner().map_err(|e| CliError::Io(e.into_error()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Currency amount rounded to cents with thousands separators.
pub fn format_amount(value: Decimal) -> String {
    let rounded = value.round_dp(2).normalize();
    let text = rounded.abs().to_string();
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (text.as_str(), None),
    };

    let mut out = String::new();
    if rounded < Decimal::ZERO {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac) = frac_part {
        out.push('.');
        out.push_str(frac);
    }
    out
}

fn line(out: &mut String, label: &str, value: impl AsRef<str>) {
    let _ = writeln!(out, "  {:<28}{:>22}", label, value.as_ref());
}

fn rule(out: &mut String) {
    let _ = writeln!(out, "  {}", "-".repeat(50));
}

fn summary_lines(out: &mut String, summary: &RevenueSummary) {
    for component in RevenueComponent::all() {
        line(out, component.name(), format_amount(summary.components.get(component)));
    }
    rule(out);
    line(
        out,
        "Subscriptions & Services",
        format_amount(summary.subscriptions_and_services_total),
    );
    line(out, "Transactions", format_amount(summary.transaction_total));
    line(out, "Grand total", format_amount(summary.grand_total));
}

fn summary_rows(prefix: &[String], summary: &RevenueSummary) -> Vec<Vec<String>> {
    let mut items: Vec<(&str, Decimal)> = RevenueComponent::all()
        .iter()
        .map(|c| (c.name(), summary.components.get(*c)))
        .collect();
    items.extend([
        ("Subscriptions & Services", summary.subscriptions_and_services_total),
        ("Transactions month 1", summary.transactions.month1),
        ("Transactions month 2", summary.transactions.month2),
        ("Transactions month 3", summary.transactions.month3),
        ("Transactions", summary.transaction_total),
        ("Grand total", summary.grand_total),
    ]);

    items
        .into_iter()
        .map(|(item, value)| {
            let mut row = prefix.to_vec();
            row.push(item.to_string());
            row.push(value.normalize().to_string());
            row
        })
        .collect()
}

// =============================================================================
// BACKTEST
// =============================================================================

/// Render backtest reports.
pub fn render_backtest(reports: &[BacktestReport], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json("backtest", &reports),
        OutputFormat::Csv => {
            let mut rows = Vec::new();
            for report in reports {
                let prefix = vec![report.period.clone()];
                rows.extend(summary_rows(&prefix, &report.summary));
                for (item, value) in [
                    ("Reference total", report.reference_total.normalize().to_string()),
                    ("Error", report.error_abs.normalize().to_string()),
                    ("Error %", report.error_pct.round_dp(6).normalize().to_string()),
                    ("Tolerance %", report.tolerance_pct.normalize().to_string()),
                    ("Passed", report.passed.to_string()),
                ] {
                    rows.push(vec![report.period.clone(), item.to_string(), value]);
                }
            }
            to_csv(&["period", "item", "value"], rows)
        }
        OutputFormat::Table => {
            let mut out = String::new();
            for report in reports {
                let _ = writeln!(out, "Backtest {}", report.period);
                summary_lines(&mut out, &report.summary);
                line(&mut out, "Reference total", format_amount(report.reference_total));
                line(&mut out, "Error", format!("{:.3}%", report.error_pct));
                line(
                    &mut out,
                    "Status",
                    if report.passed {
                        format!("PASS (<= {}%)", report.tolerance_pct.normalize())
                    } else {
                        format!("FAIL (> {}%)", report.tolerance_pct.normalize())
                    },
                );
                out.push('\n');
            }
            Ok(out)
        }
    }
}

// =============================================================================
// SCENARIOS
// =============================================================================

#[derive(Serialize)]
struct SkippedScenario {
    scenario: ScenarioKind,
    reason: String,
}

#[derive(Serialize)]
struct ScenarioReport<'a> {
    period: &'a str,
    results: &'a [ScenarioResult],
    skipped: Vec<SkippedScenario>,
}

fn parameter_rows(result: &ScenarioResult) -> Vec<(&'static str, Decimal)> {
    match result.overridden() {
        Some(txn) => vec![
            ("Notional month 2 (bn)", txn.notional_month2),
            ("Notional month 3 (bn)", txn.notional_month3),
            ("Take-rate", txn.take_rate),
            ("Sentiment month 1", txn.sentiment.month1()),
            ("Sentiment month 2", txn.sentiment.month2()),
            ("Sentiment month 3", txn.sentiment.month3()),
        ],
        None => Vec::new(),
    }
}

/// Render a scenario run.
pub fn render_scenarios(period: &str, run: &ScenarioRun, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => {
            let report = ScenarioReport {
                period,
                results: &run.results,
                skipped: run
                    .skipped
                    .iter()
                    .map(|(kind, e)| SkippedScenario {
                        scenario: *kind,
                        reason: e.to_string(),
                    })
                    .collect(),
            };
            to_json("forecast", &report)
        }
        OutputFormat::Csv => {
            let mut rows = Vec::new();
            for result in &run.results {
                let prefix = vec![period.to_string(), result.kind.name().to_string()];
                rows.extend(summary_rows(&prefix, &result.summary));
                let mut extras = parameter_rows(result);
                extras.push(("Delta vs base", result.delta.delta));
                for (item, value) in extras {
                    rows.push(vec![
                        period.to_string(),
                        result.kind.name().to_string(),
                        item.to_string(),
                        value.normalize().to_string(),
                    ]);
                }
            }
            to_csv(&["period", "scenario", "item", "value"], rows)
        }
        OutputFormat::Table => {
            let mut out = String::new();
            for result in &run.results {
                let _ = writeln!(
                    out,
                    "{} scenario, {} ({})",
                    result.kind.name(),
                    period,
                    result.kind.description()
                );
                summary_lines(&mut out, &result.summary);
                line(
                    &mut out,
                    "Delta vs base",
                    format!(
                        "{} ({:+.3}%)",
                        format_amount(result.delta.delta),
                        result.delta.delta_pct
                    ),
                );
                for (label, value) in parameter_rows(result) {
                    line(&mut out, label, value.normalize().to_string());
                }
                out.push('\n');
            }
            for (kind, e) in &run.skipped {
                let _ = writeln!(out, "{} scenario skipped: {}", kind.name(), e);
            }
            Ok(out)
        }
    }
}

// =============================================================================
// SENSITIVITY
// =============================================================================

/// Render a one-parameter sweep.
pub fn render_sensitivity(table: &SensitivityTable, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json("sensitivity", table),
        OutputFormat::Csv => {
            let rows = table
                .points
                .iter()
                .map(|p| {
                    vec![
                        table.period.clone(),
                        table.target.name().to_string(),
                        p.delta.normalize().to_string(),
                        p.grand_total.normalize().to_string(),
                        p.delta_from_base.normalize().to_string(),
                    ]
                })
                .collect();
            to_csv(
                &["period", "target", "delta", "grand_total", "delta_from_base"],
                rows,
            )
        }
        OutputFormat::Table => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "Sensitivity {}: {} (base {})",
                table.period,
                table.target.name(),
                format_amount(table.base_grand_total)
            );
            let _ = writeln!(out, "  {:>10}{:>22}{:>22}", "delta", "grand total", "vs base");
            for p in &table.points {
                let _ = writeln!(
                    out,
                    "  {:>10}{:>22}{:>22}",
                    p.delta.normalize().to_string(),
                    format_amount(p.grand_total),
                    format_amount(p.delta_from_base)
                );
            }
            Ok(out)
        }
    }
}

/// Render a two-parameter grid.
pub fn render_grid(grid: &SensitivityGrid, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => to_json("sensitivity_grid", grid),
        OutputFormat::Csv => {
            let rows = grid
                .iter()
                .map(|c| {
                    vec![
                        grid.period.clone(),
                        c.row_delta.normalize().to_string(),
                        c.col_delta.normalize().to_string(),
                        c.grand_total.normalize().to_string(),
                        c.delta_from_base.normalize().to_string(),
                    ]
                })
                .collect();
            let row_header = format!("{}_delta", grid.row_target.name());
            let col_header = format!("{}_delta", grid.col_target.name());
            to_csv(
                &["period", &row_header, &col_header, "grand_total", "delta_from_base"],
                rows,
            )
        }
        OutputFormat::Table => {
            let mut out = String::new();
            let _ = writeln!(
                out,
                "Sensitivity grid {}: rows {} x columns {} (delta vs base {})",
                grid.period,
                grid.row_target.name(),
                grid.col_target.name(),
                format_amount(grid.base_grand_total)
            );
            let _ = write!(out, "  {:>10}", "");
            for col in grid.col_deltas() {
                let _ = write!(out, "{:>18}", col.normalize().to_string());
            }
            out.push('\n');
            for row in &grid.cells {
                if let Some(first) = row.first() {
                    let _ = write!(out, "  {:>10}", first.row_delta.normalize().to_string());
                }
                for cell in row {
                    let _ = write!(out, "{:>18}", format_amount(cell.delta_from_base));
                }
                out.push('\n');
            }
            Ok(out)
        }
    }
}
