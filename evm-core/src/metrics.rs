//! EVM metrics calculator.
//!
//! `calculate` is a pure function of the task slice and the as-of instant:
//! - PV accrues straight-line across each task's planned window
//! - EV is earned only on completion (no partial credit)
//! - AC is summed unconditionally
//!
//! Indices use a zero-denominator policy: SPI is 0 when PV is 0 and CPI is 0
//! when AC is 0. Use `EvmMetrics::spi` / `EvmMetrics::cpi` to tell "undefined"
//! apart from a computed zero.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::task::Task;

/// Derived snapshot for one as-of instant.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvmMetrics {
    pub planned_value: f64,
    pub earned_value: f64,
    pub actual_cost: f64,
    /// EV - PV
    pub schedule_variance: f64,
    /// EV - AC
    pub cost_variance: f64,
    /// EV / PV, or 0 when PV is 0.
    pub schedule_performance_index: f64,
    /// EV / AC, or 0 when AC is 0.
    pub cost_performance_index: f64,
}

impl EvmMetrics {
    fn from_sums(planned_value: f64, earned_value: f64, actual_cost: f64) -> Self {
        Self {
            planned_value,
            earned_value,
            actual_cost,
            schedule_variance: earned_value - planned_value,
            cost_variance: earned_value - actual_cost,
            schedule_performance_index: ratio_or_zero(earned_value, planned_value),
            cost_performance_index: ratio_or_zero(earned_value, actual_cost),
        }
    }

    /// SPI, or `None` when nothing was scheduled yet.
    pub fn spi(&self) -> Option<f64> {
        (self.planned_value > 0.0).then_some(self.schedule_performance_index)
    }

    /// CPI, or `None` when nothing was spent yet.
    pub fn cpi(&self) -> Option<f64> {
        (self.actual_cost > 0.0).then_some(self.cost_performance_index)
    }
}

fn ratio_or_zero(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Planned value a single task contributes at `as_of`.
pub fn planned_value_at(task: &Task, as_of: DateTime<Utc>) -> f64 {
    if task.not_started(as_of) {
        return 0.0;
    }
    if task.window_elapsed(as_of) {
        return task.planned_cost;
    }

    // start <= as_of < end here, so the window is strictly positive.
    let total = (task.planned_end_date - task.planned_start_date).num_milliseconds() as f64;
    let elapsed = (as_of - task.planned_start_date).num_milliseconds() as f64;
    let progress = (elapsed / total).min(1.0);
    task.planned_cost * progress
}

/// Earned value a single task contributes. Completion is the only signal.
pub fn earned_value_of(task: &Task) -> f64 {
    if task.completed { task.planned_cost } else { 0.0 }
}

/// Compute the full metric set for `tasks` at `as_of`.
pub fn calculate(tasks: &[Task], as_of: DateTime<Utc>) -> EvmMetrics {
    let (pv, ev, ac) = tasks.iter().fold((0.0, 0.0, 0.0), |(pv, ev, ac), task| {
        (
            pv + planned_value_at(task, as_of),
            ev + earned_value_of(task),
            ac + task.actual_cost,
        )
    });

    EvmMetrics::from_sums(pv, ev, ac)
}
