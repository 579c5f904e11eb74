//! Built-in demo project used by `evm demo`.

use anyhow::Result;
use chrono::{DateTime, TimeZone, Utc};
use evm_core::Task;

fn day(y: i32, m: u32, d: u32) -> Result<DateTime<Utc>> {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0)
        .single()
        .ok_or_else(|| anyhow::anyhow!("invalid date {y}-{m}-{d}"))
}

/// Five phases: two finished (one over budget), one mid-flight, two ahead.
pub fn sample_tasks() -> Result<Vec<Task>> {
    Ok(vec![
        Task::new("1", "Project Planning", 10_000.0, day(2024, 1, 1)?, day(2024, 1, 15)?)?
            .with_actual_cost(12_000.0)
            .completed_at(day(2024, 1, 16)?),
        Task::new("2", "Requirements Analysis", 15_000.0, day(2024, 1, 16)?, day(2024, 2, 1)?)?
            .with_actual_cost(14_000.0)
            .completed_at(day(2024, 2, 2)?),
        Task::new("3", "System Design", 20_000.0, day(2024, 2, 2)?, day(2024, 2, 20)?)?
            .with_actual_cost(18_000.0),
        Task::new("4", "Development Phase 1", 30_000.0, day(2024, 2, 21)?, day(2024, 3, 15)?)?
            .with_actual_cost(5_000.0),
        Task::new("5", "Testing", 12_000.0, day(2024, 3, 16)?, day(2024, 4, 1)?)?,
    ])
}

/// Default as-of for the demo: midway through "System Design".
pub fn sample_as_of() -> Result<DateTime<Utc>> {
    day(2024, 2, 11)
}
