//! Task model: one schedulable unit of project work with a budget and a window.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EvmError, Result};

/// Core task type.
///
/// Fields are public so callers can mutate their own collection freely.
/// `Task::new` and `Task::validate` check the invariants; the calculator
/// itself accepts whatever it is given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,

    /// Budget at completion. Counts fully toward EV once completed.
    pub planned_cost: f64,

    /// Amount spent so far.
    pub actual_cost: f64,

    pub planned_start_date: DateTime<Utc>,
    pub planned_end_date: DateTime<Utc>,

    pub completed: bool,

    /// Informational only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<DateTime<Utc>>,
}

impl Task {
    /// Build a validated, not-yet-completed task.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        planned_cost: f64,
        planned_start_date: DateTime<Utc>,
        planned_end_date: DateTime<Utc>,
    ) -> Result<Self> {
        let task = Self {
            id: id.into(),
            name: name.into(),
            planned_cost,
            actual_cost: 0.0,
            planned_start_date,
            planned_end_date,
            completed: false,
            completion_date: None,
        };
        task.validate()?;
        Ok(task)
    }

    pub fn with_actual_cost(mut self, actual_cost: f64) -> Self {
        self.actual_cost = actual_cost;
        self
    }

    pub fn completed_at(mut self, when: DateTime<Utc>) -> Self {
        self.completed = true;
        self.completion_date = Some(when);
        self
    }

    /// Check the invariants the calculator assumes.
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(EvmError::invalid_task(&self.id, "id must be non-empty"));
        }
        check_amount(&self.id, "planned cost", self.planned_cost)?;
        check_amount(&self.id, "actual cost", self.actual_cost)?;
        if self.planned_start_date > self.planned_end_date {
            return Err(EvmError::invalid_task(
                &self.id,
                format!(
                    "planned start {} is after planned end {}",
                    self.planned_start_date.to_rfc3339(),
                    self.planned_end_date.to_rfc3339()
                ),
            ));
        }
        Ok(())
    }

    /// True once the scheduled window has fully elapsed at `as_of`.
    pub fn window_elapsed(&self, as_of: DateTime<Utc>) -> bool {
        self.planned_end_date <= as_of
    }

    /// True while `as_of` is before the scheduled start.
    pub fn not_started(&self, as_of: DateTime<Utc>) -> bool {
        self.planned_start_date > as_of
    }
}

pub(crate) fn check_amount(id: &str, what: &str, value: f64) -> Result<()> {
    if !value.is_finite() {
        return Err(EvmError::invalid_task(id, format!("{what} must be finite")));
    }
    if value < 0.0 {
        return Err(EvmError::invalid_task(
            id,
            format!("{what} must be non-negative, got {value}"),
        ));
    }
    Ok(())
}
