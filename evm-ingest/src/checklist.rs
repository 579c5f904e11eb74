//! Markdown checklist task lists.
//!
//! One task per checkbox bullet:
//!   - [x] Project Planning | $10,000 | $12,000 | 2024-01-01..2024-01-15
//!   - [ ] Testing | 12000 | 0 | 2024-03-16..2024-04-01
//!
//! Columns are name, planned cost, actual cost and the planned window.
//! Headings, prose and plain bullets are skipped.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use evm_core::time::parse_instant;
use evm_core::Task;
use regex::Regex;

use crate::cells::{parse_amount, parse_amount_or_zero};
use crate::csv_tasks::positional_id;

/// Parse checklist markdown into tasks. Ids are positional (`task-001`, ...).
pub fn parse_checklist_md(md: &str, tz: &str) -> Result<Vec<Task>> {
    let item_re = Regex::new(concat!(
        r"^\s*[-*]\s+\[(?P<done>[ xX])\]\s+",
        r"(?P<name>[^|]+?)\s*\|\s*",
        r"(?P<planned>[^|]+?)\s*\|\s*",
        r"(?P<actual>[^|]*?)\s*\|\s*",
        r"(?P<start>\S+)\s*\.\.\s*(?P<end>\S+)\s*$"
    ))?;

    let mut tasks = Vec::new();
    for (lineno, line) in md.lines().enumerate() {
        let Some(caps) = item_re.captures(line) else {
            continue;
        };
        let task = checklist_task(&caps, tasks.len(), tz)
            .with_context(|| format!("line {}", lineno + 1))?;
        tasks.push(task);
    }

    tracing::debug!(count = tasks.len(), "parsed checklist");
    Ok(tasks)
}

fn checklist_task(caps: &regex::Captures<'_>, index: usize, tz: &str) -> Result<Task> {
    let start: DateTime<Utc> = parse_instant(&caps["start"], tz).context("start")?;
    let end: DateTime<Utc> = parse_instant(&caps["end"], tz).context("end")?;

    let mut task = Task::new(
        positional_id(index),
        caps["name"].trim(),
        parse_amount(&caps["planned"]).context("planned cost")?,
        start,
        end,
    )?
    .with_actual_cost(parse_amount_or_zero(&caps["actual"]).context("actual cost")?);

    // A ticked box carries no date.
    task.completed = !caps["done"].trim().is_empty();
    Ok(task)
}
