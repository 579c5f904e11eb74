//! Text and JSON rendering for the CLI. This is the presentation layer:
//! everything here consumes engine output and never computes metrics itself.

use chrono::{DateTime, Utc};
use evm_core::{
    classify, format_currency, format_index, format_percentage, EvmMetrics, EvmTrendData,
    IndexKind, ProjectOverview, RagStatus, RagThresholds, Task,
};
use serde::Serialize;
use std::fmt::Write as _;

use crate::config::Config;

/// One performance index, ready to display.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexReport {
    pub kind: IndexKind,
    /// `None` when the denominator is zero and the index is undefined.
    pub value: Option<f64>,
    pub status: Option<RagStatus>,
    pub caption: Option<&'static str>,
    pub note: Option<&'static str>,
}

impl IndexReport {
    pub fn new(kind: IndexKind, value: Option<f64>, thresholds: RagThresholds) -> Self {
        let status = value.map(|v| classify(v, thresholds));
        Self {
            kind,
            value,
            status,
            caption: status.map(|s| kind.status_caption(s)),
            note: value.map(|v| kind.value_note(v)),
        }
    }

    pub fn line(&self) -> String {
        match (self.value, self.status) {
            (Some(v), Some(status)) => format!(
                "{} = {} [{}] {} ({})",
                self.kind.abbrev(),
                format_index(v, 3),
                status.to_string().to_uppercase(),
                self.caption.unwrap_or_default(),
                self.note.unwrap_or_default(),
            ),
            _ => {
                let why = match self.kind {
                    IndexKind::Schedule => "nothing scheduled yet",
                    IndexKind::Cost => "nothing spent yet",
                };
                format!("{} = N/A ({why})", self.kind.abbrev())
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusReport {
    pub as_of: DateTime<Utc>,
    pub overview: ProjectOverview,
    pub metrics: EvmMetrics,
    pub schedule: IndexReport,
    pub cost: IndexReport,
}

impl StatusReport {
    pub fn new(
        as_of: DateTime<Utc>,
        overview: ProjectOverview,
        metrics: EvmMetrics,
        cfg: &Config,
    ) -> Self {
        Self {
            as_of,
            overview,
            metrics,
            schedule: IndexReport::new(IndexKind::Schedule, metrics.spi(), cfg.rag.schedule),
            cost: IndexReport::new(IndexKind::Cost, metrics.cpi(), cfg.rag.cost),
        }
    }

    pub fn render(&self) -> String {
        let o = &self.overview;
        let mut out = String::new();
        let _ = writeln!(out, "EVM status as of {}\n", self.as_of.format("%Y-%m-%d %H:%M UTC"));
        let _ = writeln!(
            out,
            "Tasks: {} total | {} completed | {} in progress | completion {}\n",
            o.total_tasks,
            o.completed,
            o.in_progress,
            format_percentage(o.completion_rate)
        );
        out.push_str(&render_metrics(&self.metrics));
        for index in [&self.schedule, &self.cost] {
            let _ = writeln!(out, "\n{}\n  {}", index.kind.label(), index.line());
        }
        out
    }
}

/// The five headline cards: value plus what it means.
pub fn render_metrics(m: &EvmMetrics) -> String {
    let rows = [
        ("Planned Value (PV)", m.planned_value, "Budgeted cost of work scheduled"),
        ("Earned Value (EV)", m.earned_value, "Budgeted cost of work performed"),
        ("Actual Cost (AC)", m.actual_cost, "Actual cost of work performed"),
        ("Schedule Variance (SV)", m.schedule_variance, "EV - PV"),
        ("Cost Variance (CV)", m.cost_variance, "EV - AC"),
    ];

    let mut out = String::new();
    for (label, value, what) in rows {
        let _ = writeln!(out, "{label:<24}{:>12}   {what}", format_currency(value));
    }
    out
}

pub fn render_trend(trend: &[EvmTrendData]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<12}{:>12}{:>12}{:>12}{:>8}{:>8}",
        "date", "pv", "ev", "ac", "spi", "cpi"
    );
    for p in trend {
        let _ = writeln!(
            out,
            "{:<12}{:>12}{:>12}{:>12}{:>8}{:>8}",
            p.date,
            format_currency(p.pv),
            format_currency(p.ev),
            format_currency(p.ac),
            format_index(p.spi, 2),
            format_index(p.cpi, 2),
        );
    }
    out
}

pub fn render_tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "(no tasks; add one with `evm task add` or `evm import`)\n".to_string();
    }

    let mut out = String::new();
    for t in tasks {
        let mark = if t.completed { "x" } else { " " };
        let _ = write!(
            out,
            "[{mark}] {:<16} {:<28} planned {:>10}  actual {:>10}  {} .. {}",
            t.id,
            t.name,
            format_currency(t.planned_cost),
            format_currency(t.actual_cost),
            t.planned_start_date.format("%Y-%m-%d"),
            t.planned_end_date.format("%Y-%m-%d"),
        );
        if let Some(done) = t.completion_date {
            let _ = write!(out, "  done {}", done.format("%Y-%m-%d"));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{sample_as_of, sample_tasks};
    use evm_core::Project;

    fn sample_report() -> StatusReport {
        let project = Project::from_tasks(sample_tasks().unwrap()).unwrap();
        let as_of = sample_as_of().unwrap();
        StatusReport::new(as_of, project.overview(), project.metrics(as_of), &Config::default())
    }

    #[test]
    fn test_status_render() {
        let text = sample_report().render();
        assert!(text.contains("completion 40.0%"), "{text}");
        assert!(text.contains("$35,000"), "{text}");
        assert!(text.contains("-$24,000"), "{text}");
        assert!(text.contains("SPI = 0.714 [RED] Behind schedule"), "{text}");
        assert!(text.contains("CPI = 0.510 [RED] Over budget"), "{text}");
        assert!(text.contains("Schedule Performance Index (SPI)\n  SPI = 0.714"), "{text}");
        assert!(text.contains("Cost Performance Index (CPI)\n  CPI = 0.510"), "{text}");
    }

    #[test]
    fn test_undefined_index_renders_na() {
        let r = IndexReport::new(IndexKind::Schedule, None, RagThresholds::default());
        assert_eq!(r.status, None);
        assert_eq!(r.line(), "SPI = N/A (nothing scheduled yet)");
    }

    #[test]
    fn test_status_json_shape() {
        let json = serde_json::to_value(sample_report()).unwrap();
        assert_eq!(json["overview"]["completed"], 2);
        assert_eq!(json["metrics"]["plannedValue"], 35_000.0);
        assert_eq!(json["schedule"]["status"], "red");
        assert_eq!(json["cost"]["caption"], "Over budget");
    }

    #[test]
    fn test_trend_table() {
        let tasks = sample_tasks().unwrap();
        let trend = evm_core::generate_trend(&tasks, 2, sample_as_of().unwrap());
        let text = render_trend(&trend);
        assert_eq!(text.lines().count(), 4);
        assert!(text.lines().last().unwrap().starts_with("2024-02-11"));
    }

    #[test]
    fn test_task_list() {
        let text = render_tasks(&sample_tasks().unwrap());
        assert_eq!(text.lines().count(), 5);
        assert!(text.lines().next().unwrap().starts_with("[x] 1"));
        assert!(text.contains("done 2024-01-16"));
    }
}
