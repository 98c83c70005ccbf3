//! Error types for task domain validation and parsing.

use super::{TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task identifier is empty, too long, or contains unsupported
    /// characters.
    #[error("invalid task id '{0}'")]
    InvalidTaskId(String),

    /// The requested state transition is not permitted.
    #[error("invalid state transition for task {task_id}: {from} -> {to}")]
    InvalidStateTransition {
        /// The task whose transition was rejected.
        task_id: TaskId,
        /// The current state.
        from: TaskStatus,
        /// The requested target state.
        to: TaskStatus,
    },

    /// Entering `submitted` requires submission content.
    #[error("task {0} can only become submitted through a submission")]
    SubmissionRequired(TaskId),
}

/// Error returned while parsing task statuses.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
