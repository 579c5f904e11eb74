//! JSON task files: a pretty-printed array of tasks in the dashboard shape.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use evm_core::{Project, Task};

/// Load a task file. A missing file is an empty collection.
pub fn load_tasks_json(path: &Path) -> Result<Vec<Task>> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "no task file yet");
        return Ok(Vec::new());
    }
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let tasks: Vec<Task> =
        serde_json::from_str(&s).with_context(|| format!("parse {}", path.display()))?;

    // Run the same checks as construction, including duplicate ids.
    let project = Project::from_tasks(tasks).with_context(|| format!("validate {}", path.display()))?;
    Ok(project.into_tasks())
}

pub fn save_tasks_json(path: &Path, tasks: &[Task]) -> Result<()> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir).with_context(|| format!("create {}", dir.display()))?;
    }
    let json = serde_json::to_string_pretty(tasks).context("serialize tasks")?;
    fs::write(path, json).with_context(|| format!("write {}", path.display()))?;
    tracing::debug!(path = %path.display(), count = tasks.len(), "saved task file");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let tasks = load_tasks_json(&dir.path().join("tasks.json")).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("tasks.json");
        let start = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let end = Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap();
        let tasks = vec![
            Task::new("1", "Planning", 10_000.0, start, end)
                .unwrap()
                .with_actual_cost(12_000.0)
                .completed_at(end),
        ];

        save_tasks_json(&path, &tasks).unwrap();
        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"plannedCost\""));

        assert_eq!(load_tasks_json(&path).unwrap(), tasks);
    }

    #[test]
    fn test_invalid_task_in_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tasks.json");
        fs::write(
            &path,
            r#"[{"id":"1","name":"Backwards","plannedCost":1.0,"actualCost":0.0,
                "plannedStartDate":"2024-02-01T00:00:00Z","plannedEndDate":"2024-01-01T00:00:00Z",
                "completed":false}]"#,
        )
        .unwrap();
        let err = load_tasks_json(&path).unwrap_err();
        assert!(format!("{err:#}").contains("invalid task 1"), "{err:#}");
    }
}
