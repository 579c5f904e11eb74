//! evm-ingest: load task collections from CSV, JSON and markdown checklists,
//! and export trend series.

pub mod cells;
pub mod checklist;
pub mod csv_tasks;
pub mod json_tasks;
pub mod trend_export;

pub use checklist::parse_checklist_md;
pub use csv_tasks::{parse_tasks_csv, parse_tasks_csv_reader};
pub use json_tasks::{load_tasks_json, save_tasks_json};
pub use trend_export::{write_trend_csv, write_trend_csv_file};
