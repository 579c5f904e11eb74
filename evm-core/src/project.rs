//! Task collection helper: the CRUD operations a dashboard performs on its
//! task list, plus the status overview.
//!
//! The collection is plain data owned by the caller. Metrics are always
//! recomputed from it; nothing here is cached.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EvmError, Result};
use crate::metrics::{calculate, EvmMetrics};
use crate::task::{check_amount, Task};
use crate::trend::{generate_trend, EvmTrendData};

/// Input for `Project::add_task`. The id is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskDraft {
    pub name: String,
    pub planned_cost: f64,
    pub actual_cost: f64,
    pub planned_start_date: DateTime<Utc>,
    pub planned_end_date: DateTime<Utc>,
    pub completed: bool,
}

/// Headline counts for the status panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectOverview {
    pub total_tasks: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// completed / total, 0 for an empty project.
    pub completion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub tasks: Vec<Task>,
}

impl Project {
    /// Wrap an existing collection, rejecting invalid tasks and duplicate ids.
    pub fn from_tasks(tasks: Vec<Task>) -> Result<Self> {
        for (i, task) in tasks.iter().enumerate() {
            task.validate()?;
            if tasks[..i].iter().any(|t| t.id == task.id) {
                return Err(EvmError::DuplicateTaskId(task.id.clone()));
            }
        }
        Ok(Self { tasks })
    }

    pub fn into_tasks(self) -> Vec<Task> {
        self.tasks
    }

    pub fn get(&self, id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    fn get_mut(&mut self, id: &str) -> Result<&mut Task> {
        self.tasks
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or_else(|| EvmError::TaskNotFound(id.to_string()))
    }

    /// Insert a new task with an id derived from `now` (milliseconds),
    /// bumped until unique.
    pub fn add_task(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Result<&Task> {
        if draft.name.trim().is_empty() {
            return Err(EvmError::InvalidDraft("name must be non-empty".to_string()));
        }
        if draft.planned_cost == 0.0 {
            return Err(EvmError::InvalidDraft("planned cost must be non-zero".to_string()));
        }

        let mut stamp = now.timestamp_millis();
        while self.get(&stamp.to_string()).is_some() {
            stamp += 1;
        }

        let mut task = Task::new(
            stamp.to_string(),
            draft.name.trim(),
            draft.planned_cost,
            draft.planned_start_date,
            draft.planned_end_date,
        )?
        .with_actual_cost(draft.actual_cost);
        if draft.completed {
            task = task.completed_at(now);
        }
        task.validate()?;

        tracing::debug!(id = %task.id, name = %task.name, "task added");
        self.tasks.push(task);
        Ok(&self.tasks[self.tasks.len() - 1])
    }

    /// Flip completion. Becoming complete stamps `completion_date = now`;
    /// reopening clears it. Returns the new state.
    pub fn toggle_completion(&mut self, id: &str, now: DateTime<Utc>) -> Result<bool> {
        let task = self.get_mut(id)?;
        task.completed = !task.completed;
        task.completion_date = task.completed.then_some(now);
        tracing::debug!(id, completed = task.completed, "task completion toggled");
        Ok(task.completed)
    }

    pub fn delete_task(&mut self, id: &str) -> Result<Task> {
        let idx = self
            .tasks
            .iter()
            .position(|t| t.id == id)
            .ok_or_else(|| EvmError::TaskNotFound(id.to_string()))?;
        tracing::debug!(id, "task deleted");
        Ok(self.tasks.remove(idx))
    }

    pub fn update_actual_cost(&mut self, id: &str, actual_cost: f64) -> Result<()> {
        check_amount(id, "actual cost", actual_cost)?;
        let task = self.get_mut(id)?;
        task.actual_cost = actual_cost;
        tracing::debug!(id, actual_cost, "actual cost updated");
        Ok(())
    }

    pub fn overview(&self) -> ProjectOverview {
        let total_tasks = self.tasks.len();
        let completed = self.tasks.iter().filter(|t| t.completed).count();
        let completion_rate = if total_tasks == 0 {
            0.0
        } else {
            completed as f64 / total_tasks as f64
        };
        ProjectOverview {
            total_tasks,
            completed,
            in_progress: total_tasks - completed,
            completion_rate,
        }
    }

    pub fn metrics(&self, as_of: DateTime<Utc>) -> EvmMetrics {
        calculate(&self.tasks, as_of)
    }

    pub fn trend(&self, days: u32, now: DateTime<Utc>) -> Vec<EvmTrendData> {
        generate_trend(&self.tasks, days, now)
    }
}
