//! Error types for evm-core.
//!
//! The calculation functions never fail. Errors only come from building or
//! mutating a task collection.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EvmError {
    #[error("invalid task {id}: {reason}")]
    InvalidTask { id: String, reason: String },

    #[error("invalid task draft: {0}")]
    InvalidDraft(String),

    #[error("task not found: {0}")]
    TaskNotFound(String),

    #[error("duplicate task id: {0}")]
    DuplicateTaskId(String),
}

impl EvmError {
    pub(crate) fn invalid_task(id: &str, reason: impl Into<String>) -> Self {
        Self::InvalidTask {
            id: id.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, EvmError>;
