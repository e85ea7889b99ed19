//! Application services for task placement and board-scoped task operations.

mod board_tasks;
mod ordering;
pub mod placement;

pub use board_tasks::{
    BoardTaskService, CreateTaskRequest, MoveAcknowledgement, MoveTaskRequest, TASK_MOVED_MESSAGE,
    UpdateTaskRequest,
};
pub use ordering::{TaskEdit, TaskOrderingService};
