//! Service-level error taxonomy shared by the board and task services.

use crate::board::{
    domain::{BoardDomainError, BoardId, ColumnId},
    ports::BoardDirectoryError,
};
use crate::task::{
    domain::{TaskDomainError, TaskId},
    ports::TaskStoreError,
};
use thiserror::Error;

/// Result type for board and task service operations.
pub type TaskBoardResult<T> = Result<T, TaskBoardError>;

/// Errors returned by the board and task services.
///
/// A failed operation leaves every stored order as it was before the call.
#[derive(Debug, Error)]
pub enum TaskBoardError {
    /// The board does not exist.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The column does not exist or does not belong to the addressed board.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The task does not exist or does not belong to the addressed board.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),

    /// The requested position lies beyond the end of the destination column.
    #[error("invalid position {requested}, the column accepts positions 1 to {max}")]
    InvalidPosition {
        /// Position supplied by the caller.
        requested: i64,
        /// Highest position the column accepts.
        max: i64,
    },

    /// The storage transaction was aborted by a concurrent modification.
    #[error("operation aborted by a concurrent modification")]
    Conflict,

    /// Task value validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),

    /// Board value validation failed.
    #[error(transparent)]
    BoardDomain(#[from] BoardDomainError),

    /// Task store failure.
    #[error(transparent)]
    Store(TaskStoreError),

    /// Board directory failure.
    #[error(transparent)]
    Directory(BoardDirectoryError),
}

impl TaskBoardError {
    /// Returns `true` for the board, column and task not-found variants.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::BoardNotFound(_) | Self::ColumnNotFound(_) | Self::TaskNotFound(_)
        )
    }

    /// Returns `true` when repeating the operation may succeed.
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Conflict)
    }
}

impl From<TaskStoreError> for TaskBoardError {
    fn from(err: TaskStoreError) -> Self {
        match err {
            TaskStoreError::Conflict => Self::Conflict,
            TaskStoreError::NotFound(id) => Self::TaskNotFound(id),
            TaskStoreError::ColumnNotFound(id) => Self::ColumnNotFound(id),
            other @ (TaskStoreError::DuplicateTask(_) | TaskStoreError::Persistence(_)) => {
                Self::Store(other)
            }
        }
    }
}

impl From<BoardDirectoryError> for TaskBoardError {
    fn from(err: BoardDirectoryError) -> Self {
        match err {
            BoardDirectoryError::NotFound(id) => Self::BoardNotFound(id),
            other @ (BoardDirectoryError::DuplicateBoard(_)
            | BoardDirectoryError::Persistence(_)) => Self::Directory(other),
        }
    }
}
