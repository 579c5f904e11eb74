//! Trend series: recompute the metric set once per day over a trailing window.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::metrics::{calculate, EvmMetrics};
use crate::task::Task;

/// Trailing window used by the dashboard.
pub const DEFAULT_TREND_DAYS: u32 = 30;

/// Longest window `generate_trend` will build (about a century).
pub const MAX_TREND_DAYS: u32 = 36_600;

/// One point of the trend series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvmTrendData {
    /// Calendar day, `YYYY-MM-DD`.
    pub date: String,
    pub pv: f64,
    pub ev: f64,
    pub ac: f64,
    pub spi: f64,
    pub cpi: f64,
}

impl EvmTrendData {
    pub fn from_metrics(at: DateTime<Utc>, m: &EvmMetrics) -> Self {
        Self {
            date: at.date_naive().format("%Y-%m-%d").to_string(),
            pv: m.planned_value,
            ev: m.earned_value,
            ac: m.actual_cost,
            spi: m.schedule_performance_index,
            cpi: m.cost_performance_index,
        }
    }
}

/// Build `days + 1` points, oldest first, ending at `now`.
///
/// Each point is evaluated at `now - i days` (same time of day as `now`) and
/// labelled with that instant's UTC calendar day. `days` is capped at
/// [`MAX_TREND_DAYS`], and days before the earliest representable instant are
/// left out.
pub fn generate_trend(tasks: &[Task], days: u32, now: DateTime<Utc>) -> Vec<EvmTrendData> {
    let days = days.min(MAX_TREND_DAYS);
    tracing::debug!(days, tasks = tasks.len(), "generating trend series");

    (0..=days)
        .rev()
        .filter_map(|offset| now.checked_sub_signed(Duration::days(i64::from(offset))))
        .map(|at| EvmTrendData::from_metrics(at, &calculate(tasks, at)))
        .collect()
}
