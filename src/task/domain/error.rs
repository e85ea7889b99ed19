//! Error types for task domain validation.

use thiserror::Error;

/// Errors returned while constructing domain task values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTaskTitle,

    /// The task title exceeds the persisted column width.
    #[error("task title is too long: '{0}'")]
    TaskTitleTooLong(String),

    /// The order value is not a positive integer.
    #[error("invalid task order {0}, expected a positive integer")]
    InvalidOrder(i64),
}
