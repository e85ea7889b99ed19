//! Directory port for board and column lookup.

use crate::board::domain::{Board, BoardId, Column, ColumnId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board directory operations.
pub type BoardDirectoryResult<T> = Result<T, BoardDirectoryError>;

/// Board persistence and lookup contract.
#[async_trait]
pub trait BoardDirectory: Send + Sync {
    /// Stores a new board together with its columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDirectoryError::DuplicateBoard`] when the board ID
    /// already exists.
    async fn store(&self, board: &Board) -> BoardDirectoryResult<()>;

    /// Persists a board's name and update timestamp.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDirectoryError::NotFound`] when the board does not
    /// exist.
    async fn update(&self, board: &Board) -> BoardDirectoryResult<()>;

    /// Removes a board and its columns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDirectoryError::NotFound`] when the board does not
    /// exist.
    async fn delete(&self, id: BoardId) -> BoardDirectoryResult<()>;

    /// Finds a board by identifier.
    ///
    /// Returns `None` when the board does not exist.
    async fn find_by_id(&self, id: BoardId) -> BoardDirectoryResult<Option<Board>>;

    /// Finds a column by identifier regardless of its board.
    ///
    /// Returns `None` when the column does not exist.
    async fn find_column(&self, id: ColumnId) -> BoardDirectoryResult<Option<Column>>;

    /// Returns every board ordered by creation time.
    async fn list(&self) -> BoardDirectoryResult<Vec<Board>>;
}

/// Errors returned by board directory implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardDirectoryError {
    /// A board with the same identifier already exists.
    #[error("duplicate board identifier: {0}")]
    DuplicateBoard(BoardId),

    /// The board was not found.
    #[error("board not found: {0}")]
    NotFound(BoardId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardDirectoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
