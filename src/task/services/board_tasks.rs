//! Board-scoped task operations.
//!
//! Every call checks that the addressed board exists and that the columns and
//! tasks it names belong to that board before the ordering engine runs.

use super::ordering::{TaskEdit, TaskOrderingService};
use crate::board::{
    domain::{Board, BoardId, ColumnId},
    ports::BoardDirectory,
};
use crate::error::{TaskBoardError, TaskBoardResult};
use crate::task::{
    domain::{Task, TaskId, TaskTitle},
    ports::TaskStore,
};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Acknowledgement text returned after a successful move.
pub const TASK_MOVED_MESSAGE: &str = "Task moved successfully";

/// Request payload for moving a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoveTaskRequest {
    /// Destination column, which must belong to the addressed board.
    pub new_column_id: ColumnId,
    /// Requested 1-based slot in the destination column.
    pub new_position: i64,
}

/// Request payload for creating a task.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskRequest {
    /// Column receiving the task.
    pub column_id: ColumnId,
    /// Task title.
    pub title: String,
    /// Optional task description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Request payload for editing a task.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskRequest {
    /// Replacement title.
    #[serde(default)]
    pub title: Option<String>,
    /// Replacement description. An empty string clears it.
    #[serde(default)]
    pub description: Option<String>,
}

/// Acknowledgement returned by [`BoardTaskService::move_task`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveAcknowledgement {
    /// Human-readable confirmation.
    pub message: String,
}

impl Default for MoveAcknowledgement {
    fn default() -> Self {
        Self {
            message: TASK_MOVED_MESSAGE.to_owned(),
        }
    }
}

/// Board-scoped facade over [`TaskOrderingService`].
#[derive(Clone)]
pub struct BoardTaskService<S, D, C>
where
    S: TaskStore,
    D: BoardDirectory,
    C: Clock + Send + Sync + 'static,
{
    ordering: TaskOrderingService<S, D, C>,
    directory: Arc<D>,
}

impl<S, D, C> BoardTaskService<S, D, C>
where
    S: TaskStore,
    D: BoardDirectory,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new board task service.
    #[must_use]
    pub fn new(store: Arc<S>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            ordering: TaskOrderingService::new(store, Arc::clone(&directory), clock),
            directory,
        }
    }

    /// Returns the underlying ordering engine.
    #[must_use]
    pub const fn ordering(&self) -> &TaskOrderingService<S, D, C> {
        &self.ordering
    }

    /// Moves a task within or between the columns of one board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::BoardNotFound`],
    /// [`TaskBoardError::ColumnNotFound`] or [`TaskBoardError::TaskNotFound`]
    /// when an identifier is unknown or belongs to another board, and
    /// [`TaskBoardError::InvalidPosition`] when the position lies beyond the
    /// destination's tail.
    pub async fn move_task(
        &self,
        board_id: BoardId,
        task_id: TaskId,
        request: MoveTaskRequest,
    ) -> TaskBoardResult<MoveAcknowledgement> {
        let board = self.board(board_id).await?;
        ensure_column(&board, request.new_column_id)?;
        self.board_task(&board, task_id).await?;

        self.ordering
            .move_task(task_id, request.new_column_id, request.new_position)
            .await?;
        Ok(MoveAcknowledgement::default())
    }

    /// Creates a task at the tail of a column on the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::BoardNotFound`] or
    /// [`TaskBoardError::ColumnNotFound`] for unknown targets and
    /// [`TaskBoardError::Domain`] when the title is blank.
    pub async fn create_task(
        &self,
        board_id: BoardId,
        request: CreateTaskRequest,
    ) -> TaskBoardResult<Task> {
        let board = self.board(board_id).await?;
        ensure_column(&board, request.column_id)?;
        let title = TaskTitle::new(request.title)?;

        self.ordering
            .create_task(request.column_id, title, request.description)
            .await
    }

    /// Edits a task on the board.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::BoardNotFound`] or
    /// [`TaskBoardError::TaskNotFound`] for unknown targets and
    /// [`TaskBoardError::Domain`] when a provided title is blank.
    pub async fn update_task(
        &self,
        board_id: BoardId,
        task_id: TaskId,
        request: UpdateTaskRequest,
    ) -> TaskBoardResult<Task> {
        let board = self.board(board_id).await?;
        let title = request.title.map(TaskTitle::new).transpose()?;
        self.board_task(&board, task_id).await?;

        self.ordering
            .update_task(
                task_id,
                TaskEdit {
                    title,
                    description: request.description,
                },
            )
            .await
    }

    /// Deletes a task on the board and returns it.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::BoardNotFound`] or
    /// [`TaskBoardError::TaskNotFound`] for unknown targets.
    pub async fn delete_task(&self, board_id: BoardId, task_id: TaskId) -> TaskBoardResult<Task> {
        let board = self.board(board_id).await?;
        self.board_task(&board, task_id).await?;
        self.ordering.delete_task(task_id).await
    }

    async fn board(&self, board_id: BoardId) -> TaskBoardResult<Board> {
        self.directory
            .find_by_id(board_id)
            .await?
            .ok_or(TaskBoardError::BoardNotFound(board_id))
    }

    async fn board_task(&self, board: &Board, task_id: TaskId) -> TaskBoardResult<Task> {
        let task = self.ordering.task(task_id).await?;
        if board.has_column(task.column_id()) {
            Ok(task)
        } else {
            Err(TaskBoardError::TaskNotFound(task_id))
        }
    }
}

fn ensure_column(board: &Board, column_id: ColumnId) -> TaskBoardResult<()> {
    if board.has_column(column_id) {
        Ok(())
    } else {
        Err(TaskBoardError::ColumnNotFound(column_id))
    }
}
