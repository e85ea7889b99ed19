//! Ordering engine: task placement under create, move and delete.
//!
//! Every operation runs its reads and writes inside one store transaction so
//! that the affected columns are dense again when the transaction commits.

use super::placement::{Displacement, plan_move};
use crate::board::{domain::ColumnId, ports::BoardDirectory};
use crate::error::{TaskBoardError, TaskBoardResult};
use crate::task::{
    domain::{Task, TaskId, TaskOrder, TaskTitle},
    ports::{OrderFilter, TaskStore, TaskTransaction},
};
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// Field edits applied by [`TaskOrderingService::update_task`].
///
/// `None` leaves the field unchanged. An empty description clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskEdit {
    /// Replacement title.
    pub title: Option<TaskTitle>,
    /// Replacement description.
    pub description: Option<String>,
}

/// Task ordering service.
///
/// Owns no locks of its own. Concurrent callers are serialized, or rejected
/// with [`TaskBoardError::Conflict`], by the store's transactions.
#[derive(Clone)]
pub struct TaskOrderingService<S, D, C>
where
    S: TaskStore,
    D: BoardDirectory,
    C: Clock + Send + Sync + 'static,
{
    store: Arc<S>,
    directory: Arc<D>,
    clock: Arc<C>,
}

impl<S, D, C> TaskOrderingService<S, D, C>
where
    S: TaskStore,
    D: BoardDirectory,
    C: Clock + Send + Sync + 'static,
{
    /// Creates a new ordering service.
    #[must_use]
    pub const fn new(store: Arc<S>, directory: Arc<D>, clock: Arc<C>) -> Self {
        Self {
            store,
            directory,
            clock,
        }
    }

    /// Retrieves a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not exist.
    pub async fn task(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        self.store
            .find_task(task_id)
            .await?
            .ok_or(TaskBoardError::TaskNotFound(task_id))
    }

    /// Lists a column's tasks in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::ColumnNotFound`] when the column does not
    /// exist.
    pub async fn list_column(&self, column_id: ColumnId) -> TaskBoardResult<Vec<Task>> {
        self.require_column(column_id).await?;
        Ok(self
            .store
            .list_tasks_in_column(column_id, OrderFilter::All)
            .await?)
    }

    /// Appends a new task to the tail of `column_id`.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::ColumnNotFound`] when the column does not
    /// exist, or a store error when the insert fails.
    pub async fn create_task(
        &self,
        column_id: ColumnId,
        title: TaskTitle,
        description: Option<String>,
    ) -> TaskBoardResult<Task> {
        self.require_column(column_id).await?;
        let clock = Arc::clone(&self.clock);

        let task = self
            .store
            .transaction(move |tx: &mut dyn TaskTransaction| -> TaskBoardResult<Task> {
                let count = tx.count_tasks_in_column(column_id)?;
                let order = TaskOrder::after_count(count)?;
                let task = Task::new(column_id, title, description, order, clock.as_ref());
                tx.insert_task(&task)?;
                Ok(task)
            })
            .await?;

        info!(
            task_id = %task.id(),
            column_id = %column_id,
            order = task.order().value(),
            "created task"
        );
        Ok(task)
    }

    /// Moves a task to `position` within `destination`.
    ///
    /// Positions below 1 are treated as 1. The tail slot is always reachable
    /// by asking for one past the current count.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] or
    /// [`TaskBoardError::ColumnNotFound`] for unknown identifiers,
    /// [`TaskBoardError::InvalidPosition`] when `position` lies beyond the
    /// tail, and [`TaskBoardError::Conflict`] when a concurrent writer won.
    pub async fn move_task(
        &self,
        task_id: TaskId,
        destination: ColumnId,
        position: i64,
    ) -> TaskBoardResult<Task> {
        self.require_column(destination).await?;
        let clock = Arc::clone(&self.clock);

        self.store
            .transaction(move |tx: &mut dyn TaskTransaction| -> TaskBoardResult<Task> {
                let mut task = tx
                    .find_task(task_id)?
                    .ok_or(TaskBoardError::TaskNotFound(task_id))?;
                let count = tx.count_tasks_in_column(destination)?;
                let plan = plan_move(&task, destination, position, count)?;

                if plan.is_noop(&task) {
                    debug!(
                        task_id = %task_id,
                        order = task.order().value(),
                        "task already in place"
                    );
                    return Ok(task);
                }

                let from_column = task.column_id();
                let from_order = task.order();
                let shifted = apply_displacements(tx, &plan.displacements)?;
                task.place(plan.destination, plan.order, clock.as_ref());
                tx.update_task(&task)?;

                info!(
                    task_id = %task_id,
                    from_column = %from_column,
                    from = from_order.value(),
                    to_column = %plan.destination,
                    to = plan.order.value(),
                    shifted,
                    "moved task"
                );
                Ok(task)
            })
            .await
    }

    /// Edits a task's title and description without affecting its placement.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not exist.
    pub async fn update_task(&self, task_id: TaskId, edit: TaskEdit) -> TaskBoardResult<Task> {
        let clock = Arc::clone(&self.clock);

        let task = self
            .store
            .transaction(move |tx: &mut dyn TaskTransaction| -> TaskBoardResult<Task> {
                let mut task = tx
                    .find_task(task_id)?
                    .ok_or(TaskBoardError::TaskNotFound(task_id))?;
                let TaskEdit { title, description } = edit;
                if let Some(new_title) = title {
                    task.rename(new_title, clock.as_ref());
                }
                if let Some(new_description) = description {
                    task.describe(Some(new_description), clock.as_ref());
                }
                tx.update_task(&task)?;
                Ok(task)
            })
            .await?;

        debug!(task_id = %task_id, "updated task");
        Ok(task)
    }

    /// Deletes a task and closes the gap it leaves in its column.
    ///
    /// Returns the task as it was before deletion.
    ///
    /// # Errors
    ///
    /// Returns [`TaskBoardError::TaskNotFound`] when the task does not exist.
    pub async fn delete_task(&self, task_id: TaskId) -> TaskBoardResult<Task> {
        let (task, shifted) = self
            .store
            .transaction(move |tx: &mut dyn TaskTransaction| -> TaskBoardResult<(Task, u64)> {
                let task = tx
                    .find_task(task_id)?
                    .ok_or(TaskBoardError::TaskNotFound(task_id))?;
                tx.delete_task(task_id)?;
                let shifted = apply_displacements(
                    tx,
                    &[Displacement::close_gap(task.column_id(), task.order())],
                )?;
                Ok((task, shifted))
            })
            .await?;

        info!(
            task_id = %task_id,
            column_id = %task.column_id(),
            order = task.order().value(),
            shifted,
            "deleted task"
        );
        Ok(task)
    }

    async fn require_column(&self, column_id: ColumnId) -> TaskBoardResult<()> {
        self.directory
            .find_column(column_id)
            .await?
            .map(|_| ())
            .ok_or(TaskBoardError::ColumnNotFound(column_id))
    }
}

/// Applies each displacement in turn and returns the number of shifted tasks.
fn apply_displacements(
    tx: &mut dyn TaskTransaction,
    displacements: &[Displacement],
) -> TaskBoardResult<u64> {
    let mut shifted = 0;
    for displacement in displacements {
        let ids: Vec<TaskId> = tx
            .list_tasks_in_column(displacement.column_id, displacement.filter)?
            .iter()
            .map(Task::id)
            .collect();
        shifted += tx.shift_orders(&ids, displacement.delta)?;
    }
    Ok(shifted)
}
