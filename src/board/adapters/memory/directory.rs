//! In-memory board directory for tests and embedding.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::{
    domain::{Board, BoardId, Column, ColumnId},
    ports::{BoardDirectory, BoardDirectoryError, BoardDirectoryResult},
};

/// Thread-safe in-memory board directory.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardDirectory {
    state: Arc<RwLock<InMemoryBoardState>>,
}

#[derive(Debug, Default)]
struct InMemoryBoardState {
    boards: HashMap<BoardId, Board>,
    column_index: HashMap<ColumnId, BoardId>,
    insertion_order: Vec<BoardId>,
}

impl InMemoryBoardDirectory {
    /// Creates an empty in-memory directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> BoardDirectoryError {
    BoardDirectoryError::persistence(std::io::Error::other(err.to_string()))
}

#[async_trait]
impl BoardDirectory for InMemoryBoardDirectory {
    async fn store(&self, board: &Board) -> BoardDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        if state.boards.contains_key(&board.id()) {
            return Err(BoardDirectoryError::DuplicateBoard(board.id()));
        }

        for column in board.columns() {
            state.column_index.insert(column.id(), board.id());
        }
        state.boards.insert(board.id(), board.clone());
        state.insertion_order.push(board.id());
        Ok(())
    }

    async fn update(&self, board: &Board) -> BoardDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let stored = state
            .boards
            .get_mut(&board.id())
            .ok_or(BoardDirectoryError::NotFound(board.id()))?;
        *stored = board.clone();
        Ok(())
    }

    async fn delete(&self, id: BoardId) -> BoardDirectoryResult<()> {
        let mut state = self.state.write().map_err(lock_error)?;
        let removed = state
            .boards
            .remove(&id)
            .ok_or(BoardDirectoryError::NotFound(id))?;
        for column in removed.columns() {
            state.column_index.remove(&column.id());
        }
        state.insertion_order.retain(|board_id| *board_id != id);
        Ok(())
    }

    async fn find_by_id(&self, id: BoardId) -> BoardDirectoryResult<Option<Board>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.boards.get(&id).cloned())
    }

    async fn find_column(&self, id: ColumnId) -> BoardDirectoryResult<Option<Column>> {
        let state = self.state.read().map_err(lock_error)?;
        let column = state
            .column_index
            .get(&id)
            .and_then(|board_id| state.boards.get(board_id))
            .and_then(|board| board.column(id))
            .cloned();
        Ok(column)
    }

    async fn list(&self) -> BoardDirectoryResult<Vec<Board>> {
        let state = self.state.read().map_err(lock_error)?;
        let boards = state
            .insertion_order
            .iter()
            .filter_map(|board_id| state.boards.get(board_id))
            .cloned()
            .collect();
        Ok(boards)
    }
}
