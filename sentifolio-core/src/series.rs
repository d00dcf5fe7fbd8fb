//! Returns-series sanitization and summary metrics.
//!
//! The server reports cumulative returns as an array of loosely shaped JSON
//! objects: the portfolio column is `portfolio_return`, the benchmark column
//! is named after the benchmark symbol itself (`QQQ`, `AAPL`, ...), and the
//! date label has drifted across server versions (`date`, `Date`, `index`).
//! `clean` reconciles that into two same-length finite series; `summarize`
//! derives the scalar metrics shown next to the chart. Both are pure
//! functions — same payload in, same output out.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::filter::Benchmark;

/// Candidate label fields, tried in order per point.
pub const LABEL_FIELDS: [&str; 3] = ["date", "Date", "index"];

/// Structured error for a returns payload the engine cannot work with.
///
/// Terminal for the request that produced it: the caller shows an
/// empty/error view and waits for the next commit.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MetricsError {
    #[error("malformed returns payload: {0}")]
    MalformedPayload(String),
}

/// Sanitized, chart-ready series. `labels`, `portfolio` and `benchmark`
/// are index-paired and always the same length; every value is finite.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CleanedSeries {
    /// Per-point date label; `None` when the server row carried no label
    /// field at all (tolerated, not an error).
    pub labels: Vec<Option<String>>,
    pub portfolio: Vec<f64>,
    pub benchmark: Vec<f64>,
}

impl CleanedSeries {
    pub fn len(&self) -> usize {
        self.portfolio.len()
    }

    pub fn is_empty(&self) -> bool {
        self.portfolio.is_empty()
    }
}

/// Scalar summary derived from a [`CleanedSeries`]. Immutable snapshot,
/// recomputed in full whenever the series changes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceSummary {
    /// Maximum cumulative portfolio return over the window.
    pub peak_return: f64,
    /// Label at the peak; first occurrence wins on ties.
    pub peak_label: Option<String>,
    /// Share of periods (0..100) where the portfolio beat the benchmark.
    pub outperformance_pct: f64,
}

/// One monthly rebalancing event: the tickers bought on `date`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerSelection {
    pub date: String,
    pub tickers: Vec<String>,
}

/// Map one raw numeric cell to a finite number.
///
/// Policy: null, absent, non-numeric and non-finite all become `0.0`. The
/// same rule is applied to both series so the chart and the metrics see
/// identical data.
fn sanitize(value: Option<&Value>) -> f64 {
    value
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// First present, non-null label field, per [`LABEL_FIELDS`].
fn point_label(point: &Value) -> Option<String> {
    LABEL_FIELDS.iter().find_map(|field| {
        point
            .get(*field)
            .filter(|v| !v.is_null())
            .map(|v| match v {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
    })
}

/// Sanitize the raw returns payload into a [`CleanedSeries`].
///
/// The benchmark column is selected by the symbol of the applied benchmark
/// — an explicit mapping fixed at parse time, not a caller-supplied key.
/// A payload whose `portfolio_returns` field is missing or not an array is
/// reported as [`MetricsError::MalformedPayload`]; irregular points inside
/// the array (missing fields, nulls, strings) are tolerated per the
/// sanitization policy.
pub fn clean(payload: &Value, benchmark: Benchmark) -> Result<CleanedSeries, MetricsError> {
    let points = match payload.get("portfolio_returns") {
        Some(Value::Array(points)) => points,
        Some(other) => {
            return Err(MetricsError::MalformedPayload(format!(
                "portfolio_returns is {}, expected an array",
                json_type_name(other)
            )))
        }
        None => {
            return Err(MetricsError::MalformedPayload(
                "portfolio_returns field is missing".into(),
            ))
        }
    };

    let mut series = CleanedSeries {
        labels: Vec::with_capacity(points.len()),
        portfolio: Vec::with_capacity(points.len()),
        benchmark: Vec::with_capacity(points.len()),
    };

    for point in points {
        series.labels.push(point_label(point));
        series.portfolio.push(sanitize(point.get("portfolio_return")));
        series.benchmark.push(sanitize(point.get(benchmark.as_symbol())));
    }

    Ok(series)
}

/// Compute the summary metrics for a cleaned series.
///
/// The empty series yields all-zero metrics rather than dividing by zero.
pub fn summarize(series: &CleanedSeries) -> PerformanceSummary {
    if series.is_empty() {
        return PerformanceSummary {
            peak_return: 0.0,
            peak_label: None,
            outperformance_pct: 0.0,
        };
    }

    let mut peak_idx = 0usize;
    let mut wins = 0usize;
    for i in 0..series.len() {
        // Strict > keeps the first occurrence on ties.
        if series.portfolio[i] > series.portfolio[peak_idx] {
            peak_idx = i;
        }
        if series.portfolio[i] > series.benchmark[i] {
            wins += 1;
        }
    }

    PerformanceSummary {
        peak_return: series.portfolio[peak_idx],
        peak_label: series.labels[peak_idx].clone(),
        outperformance_pct: 100.0 * wins as f64 / series.len() as f64,
    }
}

/// Extract the monthly rebalancing table from the returns payload.
///
/// Tolerant by design: an absent or misshapen `tickers_by_date` field
/// yields an empty table, and rows that fail to decode are skipped. The
/// table is display-only, so a partial table beats a dead page.
pub fn ticker_selections(payload: &Value) -> Vec<TickerSelection> {
    match payload.get("tickers_by_date") {
        Some(Value::Array(rows)) => rows
            .iter()
            .filter_map(|row| serde_json::from_value(row.clone()).ok())
            .collect(),
        _ => Vec::new(),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a bool",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
