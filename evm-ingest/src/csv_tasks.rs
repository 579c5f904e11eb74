//! Parse task lists exported from spreadsheets.
//!
//! Expected header (column order is free, `id`/`actual_cost`/`completed`/
//! `completion_date` may be omitted):
//! id,name,planned_cost,actual_cost,planned_start,planned_end,completed,completion_date
//!
//! Money cells may carry `$` and thousands separators. Dates are
//! `YYYY-MM-DD`, `MM/DD/YYYY` (local midnight in the given timezone) or RFC3339.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use evm_core::time::parse_instant;
use evm_core::Task;
use serde::Deserialize;

use crate::cells::{parse_amount, parse_amount_or_zero, parse_flag};

#[derive(Debug, Deserialize)]
struct RawTaskRow {
    #[serde(default)]
    id: String,
    name: String,
    planned_cost: String,
    #[serde(default)]
    actual_cost: String,
    planned_start: String,
    planned_end: String,
    #[serde(default)]
    completed: String,
    #[serde(default)]
    completion_date: String,
}

impl RawTaskRow {
    fn into_task(self, index: usize, tz: &str) -> Result<Task> {
        let id = match self.id.trim() {
            "" => positional_id(index),
            id => id.to_string(),
        };

        let planned_cost = parse_amount(&self.planned_cost).context("planned_cost")?;
        let start = parse_instant(&self.planned_start, tz).context("planned_start")?;
        let end = parse_instant(&self.planned_end, tz).context("planned_end")?;

        let mut task = Task::new(id, self.name.trim(), planned_cost, start, end)?
            .with_actual_cost(parse_amount_or_zero(&self.actual_cost).context("actual_cost")?);

        if parse_flag(&self.completed).context("completed")? {
            task.completed = true;
            if !self.completion_date.trim().is_empty() {
                task.completion_date =
                    Some(parse_instant(&self.completion_date, tz).context("completion_date")?);
            }
        }

        task.validate()?;
        Ok(task)
    }
}

/// Id for rows that leave the id column blank: `task-001`, `task-002`, ...
pub fn positional_id(index: usize) -> String {
    format!("task-{:03}", index + 1)
}

/// Parse a task CSV file.
pub fn parse_tasks_csv(path: impl AsRef<Path>, tz: &str) -> Result<Vec<Task>> {
    let file = std::fs::File::open(path.as_ref())
        .with_context(|| format!("opening {}", path.as_ref().display()))?;
    parse_tasks_csv_reader(file, tz).with_context(|| format!("parsing {}", path.as_ref().display()))
}

/// Parse task CSV from any reader. Every row must be valid; the error names
/// the offending line.
pub fn parse_tasks_csv_reader<R: Read>(reader: R, tz: &str) -> Result<Vec<Task>> {
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut tasks = Vec::new();
    for (index, row) in rdr.deserialize::<RawTaskRow>().enumerate() {
        // Header is line 1.
        let line = index + 2;
        let row = row.with_context(|| format!("line {line}"))?;
        let task = row
            .into_task(index, tz)
            .with_context(|| format!("line {line}"))?;
        tasks.push(task);
    }

    tracing::debug!(count = tasks.len(), "parsed task csv");
    Ok(tasks)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn fixture() -> PathBuf {
        PathBuf::from(env!("CARGO_MANIFEST_DIR"))
            .parent()
            .unwrap()
            .join("fixtures")
            .join("sample_tasks.csv")
    }

    #[test]
    fn test_parse_fixture() {
        let tasks = parse_tasks_csv(fixture(), "UTC").expect("should parse sample_tasks.csv");
        assert_eq!(tasks.len(), 5);

        let first = &tasks[0];
        assert_eq!(first.id, "1");
        assert_eq!(first.name, "Project Planning");
        assert_eq!(first.planned_cost, 10_000.0);
        assert_eq!(first.actual_cost, 12_000.0);
        assert!(first.completed);
        assert_eq!(
            first.completion_date.map(|d| d.to_rfc3339()),
            Some("2024-01-16T00:00:00+00:00".to_string())
        );

        // US-style dates on row 4, blank actual cost on row 5.
        assert_eq!(tasks[3].planned_start_date.to_rfc3339(), "2024-02-21T00:00:00+00:00");
        assert_eq!(tasks[4].actual_cost, 0.0);
        assert!(!tasks[4].completed);
    }

    #[test]
    fn test_blank_id_gets_positional_id() {
        let csv = "id,name,planned_cost,planned_start,planned_end\n\
                   ,Kickoff,500,2024-01-01,2024-01-02\n";
        let tasks = parse_tasks_csv_reader(csv.as_bytes(), "UTC").unwrap();
        assert_eq!(tasks[0].id, "task-001");
        assert_eq!(tasks[0].actual_cost, 0.0);
    }

    #[test]
    fn test_dates_anchor_to_timezone() {
        let csv = "name,planned_cost,planned_start,planned_end\n\
                   Kickoff,500,2024-01-01,2024-01-02\n";
        let tasks = parse_tasks_csv_reader(csv.as_bytes(), "America/Chicago").unwrap();
        assert_eq!(tasks[0].planned_start_date.to_rfc3339(), "2024-01-01T06:00:00+00:00");
    }

    #[test]
    fn test_row_on_dst_skipped_midnight() {
        let csv = "name,planned_cost,planned_start,planned_end\n\
                   Cutover,500,2024-09-08,2024-09-10\n";
        let tasks = parse_tasks_csv_reader(csv.as_bytes(), "America/Santiago").unwrap();
        assert_eq!(tasks[0].planned_start_date.to_rfc3339(), "2024-09-08T04:00:00+00:00");
    }

    #[test]
    fn test_error_names_line() {
        let csv = "name,planned_cost,planned_start,planned_end\n\
                   Good,500,2024-01-01,2024-01-02\n\
                   Backwards,500,2024-02-01,2024-01-02\n";
        let err = parse_tasks_csv_reader(csv.as_bytes(), "UTC").unwrap_err();
        assert!(format!("{err:#}").contains("line 3"), "{err:#}");
    }

    #[test]
    fn test_bad_amount_is_rejected() {
        let csv = "name,planned_cost,planned_start,planned_end\n\
                   Oops,lots,2024-01-01,2024-01-02\n";
        let err = parse_tasks_csv_reader(csv.as_bytes(), "UTC").unwrap_err();
        assert!(format!("{err:#}").contains("planned_cost"), "{err:#}");
    }
}
