//! Board catalogue: creation, lookup, search, rename and cascade delete.

use crate::board::{
    domain::{Board, BoardId, BoardName, Column, ColumnId},
    ports::BoardDirectory,
};
use crate::error::{TaskBoardError, TaskBoardResult};
use crate::task::{
    domain::Task,
    ports::{OrderFilter, TaskStore, TaskTransaction},
};
use mockable::Clock;
use serde::Serialize;
use std::sync::Arc;
use tracing::{info, warn};

/// A column together with its tasks in ascending order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnView {
    /// The column.
    pub column: Column,
    /// Tasks of the column, head first.
    pub tasks: Vec<Task>,
}

/// A board together with its columns and their tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardView {
    /// The board.
    pub board: Board,
    /// Columns in display order.
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// Returns the view of a column by title.
    #[must_use]
    pub fn column(&self, title: &str) -> Option<&ColumnView> {
        self.columns.iter().find(|view| view.column.title() == title)
    }

    fn matches(&self, needle: &str) -> bool {
        contains_folded(self.board.name().as_str(), needle)
            || self
                .columns
                .iter()
                .flat_map(|view| &view.tasks)
                .any(|task| contains_folded(task.title().as_str(), needle))
    }
}

fn contains_folded(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(needle)
}

/// Board catalogue service.
#[derive(Clone)]
pub struct BoardCatalogService<D, S, C>
where
    D: BoardDirectory,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    directory: Arc<D>,
    store: Arc<S>,
    clock: Arc<C>,
}

impl<D, S, C> BoardCatalogService<D, S, C>
where
    D: BoardDirectory,
    S: TaskStore,
    C: Clock + Send + Sync,
{
    /// Creates a new board catalogue service.
    #[must_use]
    pub const fn new(directory: Arc<D>, store: Arc<S>, clock: Arc<C>) -> Self {
        Self {
            directory,
            store,
            clock,
        }
    }

    /// Creates a board with the default column triple.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::BoardDomain`] when the name is blank or too
    /// long.
    pub async fn create_board(&self, name: &str) -> TaskBoardResult<Board> {
        let board = Board::new(BoardName::new(name)?, &*self.clock);
        self.directory.store(&board).await?;
        info!(board_id = %board.id(), name = board.name().as_str(), "created board");
        Ok(board)
    }

    /// Returns a board with its columns and tasks.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::BoardNotFound`] when the board does not
    /// exist.
    pub async fn get_board(&self, board_id: BoardId) -> TaskBoardResult<BoardView> {
        let board = self.board(board_id).await?;
        self.view(board).await
    }

    /// Lists every board, optionally narrowed by a case-insensitive search on
    /// board names and task titles.
    ///
    /// # Errors
    ///
    /// Returns a store or directory error when a lookup fails.
    pub async fn list_boards(&self, search: Option<&str>) -> TaskBoardResult<Vec<BoardView>> {
        let needle = search
            .map(str::trim)
            .filter(|term| !term.is_empty())
            .map(str::to_lowercase);

        let mut views = Vec::new();
        for board in self.directory.list().await? {
            let view = self.view(board).await?;
            if needle.as_deref().is_none_or(|term| view.matches(term)) {
                views.push(view);
            }
        }
        Ok(views)
    }

    /// Renames a board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::BoardNotFound`] when the board does not
    /// exist and [`TaskBoardError::BoardDomain`] when the name is invalid.
    pub async fn rename_board(&self, board_id: BoardId, name: &str) -> TaskBoardResult<Board> {
        let new_name = BoardName::new(name)?;
        let mut board = self.board(board_id).await?;
        board.rename(new_name, &*self.clock);
        self.directory.update(&board).await?;
        info!(board_id = %board_id, name = board.name().as_str(), "renamed board");
        Ok(board)
    }

    /// Deletes a board together with its columns and their tasks.
    ///
    /// The board leaves the directory first, so its columns stop resolving
    /// before the tasks are purged. A failed directory delete leaves both the
    /// board and its tasks untouched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::BoardNotFound`] when the board does not
    /// exist.
    pub async fn delete_board(&self, board_id: BoardId) -> TaskBoardResult<()> {
        let board = self.board(board_id).await?;
        let column_ids: Vec<_> = board.columns().iter().map(Column::id).collect();

        self.directory.delete(board_id).await?;
        let removed_tasks = self
            .store
            .transaction(move |tx: &mut dyn TaskTransaction| -> TaskBoardResult<u64> {
                Ok(tx.delete_tasks_in_columns(&column_ids)?)
            })
            .await
            .inspect_err(|err| {
                warn!(board_id = %board_id, error = %err, "board deleted but task purge failed");
            })?;

        info!(board_id = %board_id, removed_tasks, "deleted board");
        Ok(())
    }

    async fn board(&self, board_id: BoardId) -> TaskBoardResult<Board> {
        self.directory
            .find_by_id(board_id)
            .await?
            .ok_or(TaskBoardError::BoardNotFound(board_id))
    }

    async fn view(&self, board: Board) -> TaskBoardResult<BoardView> {
        let column_ids: Vec<ColumnId> = board.columns().iter().map(Column::id).collect();
        let task_lists = self
            .store
            .transaction(
                move |tx: &mut dyn TaskTransaction| -> TaskBoardResult<Vec<Vec<Task>>> {
                    column_ids
                        .iter()
                        .map(|id| Ok(tx.list_tasks_in_column(*id, OrderFilter::All)?))
                        .collect()
                },
            )
            .await?;

        let columns = board
            .columns()
            .iter()
            .cloned()
            .zip(task_lists)
            .map(|(column, tasks)| ColumnView { column, tasks })
            .collect();
        Ok(BoardView { board, columns })
    }
}
