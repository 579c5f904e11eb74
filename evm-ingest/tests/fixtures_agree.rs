use chrono::{TimeZone, Utc};
use evm_core::{calculate, generate_trend};
use evm_ingest::{
    load_tasks_json, parse_checklist_md, parse_tasks_csv, save_tasks_json, write_trend_csv_file,
};
use std::path::PathBuf;

fn fixtures() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .parent()
        .unwrap()
        .join("fixtures")
}

/// The CSV and checklist fixtures describe the same project and must agree
/// on every metric.
#[test]
fn test_csv_and_checklist_agree() {
    let from_csv = parse_tasks_csv(fixtures().join("sample_tasks.csv"), "UTC").unwrap();
    let md = std::fs::read_to_string(fixtures().join("sample_tasks.md")).unwrap();
    let from_md = parse_checklist_md(&md, "UTC").unwrap();

    let as_of = Utc.with_ymd_and_hms(2024, 2, 11, 0, 0, 0).unwrap();
    let a = calculate(&from_csv, as_of);
    let b = calculate(&from_md, as_of);
    assert_eq!(a, b);
    assert_eq!(a.planned_value, 35_000.0);
    assert_eq!(a.earned_value, 25_000.0);
    assert_eq!(a.actual_cost, 49_000.0);
}

/// Import CSV, store as JSON, reload, export the trend.
#[test]
fn test_csv_to_json_to_trend() {
    let dir = tempfile::tempdir().unwrap();
    let tasks = parse_tasks_csv(fixtures().join("sample_tasks.csv"), "UTC").unwrap();

    let json_path = dir.path().join("tasks.json");
    save_tasks_json(&json_path, &tasks).unwrap();
    let reloaded = load_tasks_json(&json_path).unwrap();
    assert_eq!(reloaded, tasks);

    let now = Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap();
    let trend = generate_trend(&reloaded, 7, now);
    let csv_path = dir.path().join("trend.csv");
    write_trend_csv_file(&csv_path, &trend).unwrap();

    let out = std::fs::read_to_string(&csv_path).unwrap();
    assert_eq!(out.lines().count(), 9);
    assert!(out.lines().last().unwrap().starts_with("2024-03-01,"));
}
