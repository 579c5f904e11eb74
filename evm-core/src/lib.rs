//! evm-core: Earned Value Management engine.
//!
//! Everything here is a synchronous, stateless computation over a task slice
//! and an explicit as-of instant. Callers supply "now"; nothing reads the
//! wall clock.

pub mod error;
pub mod format;
pub mod metrics;
pub mod project;
pub mod rag;
pub mod task;
pub mod time;
pub mod trend;

pub use error::EvmError;
pub use format::{format_currency, format_index, format_percentage};
pub use metrics::{calculate, earned_value_of, planned_value_at, EvmMetrics};
pub use project::{Project, ProjectOverview, TaskDraft};
pub use rag::{classify, IndexKind, RagStatus, RagThresholds};
pub use task::Task;
pub use trend::{generate_trend, EvmTrendData, DEFAULT_TREND_DAYS, MAX_TREND_DAYS};
