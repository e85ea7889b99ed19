//! Store port for task persistence and transactional reordering.

use crate::board::domain::ColumnId;
use crate::task::domain::{Task, TaskId, TaskOrder};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task store operations.
pub type TaskStoreResult<T> = Result<T, TaskStoreError>;

/// One end of an order range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderBound {
    /// The bound value itself is part of the range.
    Inclusive(TaskOrder),
    /// The bound value itself is excluded from the range.
    Exclusive(TaskOrder),
}

impl OrderBound {
    const fn admits_from_below(self, order: TaskOrder) -> bool {
        match self {
            Self::Inclusive(bound) => order.value() >= bound.value(),
            Self::Exclusive(bound) => order.value() > bound.value(),
        }
    }

    const fn admits_from_above(self, order: TaskOrder) -> bool {
        match self {
            Self::Inclusive(bound) => order.value() <= bound.value(),
            Self::Exclusive(bound) => order.value() < bound.value(),
        }
    }
}

/// Order predicate applied when listing a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderFilter {
    /// Every task in the column.
    All,
    /// Tasks whose order is at or above the lower bound.
    From(OrderBound),
    /// Tasks whose order lies between both bounds.
    Between {
        /// Lower end of the range.
        lower: OrderBound,
        /// Upper end of the range.
        upper: OrderBound,
    },
}

impl OrderFilter {
    /// Tasks strictly after `order`.
    #[must_use]
    pub const fn greater_than(order: TaskOrder) -> Self {
        Self::From(OrderBound::Exclusive(order))
    }

    /// Tasks at `order` or after it.
    #[must_use]
    pub const fn at_least(order: TaskOrder) -> Self {
        Self::From(OrderBound::Inclusive(order))
    }

    /// Returns the lower end of the range, if bounded below.
    #[must_use]
    pub const fn lower(self) -> Option<OrderBound> {
        match self {
            Self::All => None,
            Self::From(lower) | Self::Between { lower, .. } => Some(lower),
        }
    }

    /// Returns the upper end of the range, if bounded above.
    #[must_use]
    pub const fn upper(self) -> Option<OrderBound> {
        match self {
            Self::All | Self::From(_) => None,
            Self::Between { upper, .. } => Some(upper),
        }
    }

    /// Returns `true` when `order` satisfies the filter.
    #[must_use]
    pub const fn matches(self, order: TaskOrder) -> bool {
        match self {
            Self::All => true,
            Self::From(lower) => lower.admits_from_below(order),
            Self::Between { lower, upper } => {
                lower.admits_from_below(order) && upper.admits_from_above(order)
            }
        }
    }
}

/// Synchronous view of the store inside an open transaction.
///
/// Every read observes the writes issued earlier in the same transaction.
pub trait TaskTransaction {
    /// Finds a task by identifier.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the lookup fails.
    fn find_task(&mut self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Counts the tasks in a column.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the count fails.
    fn count_tasks_in_column(&mut self, column_id: ColumnId) -> TaskStoreResult<u64>;

    /// Lists the tasks of a column matching `filter`, in ascending order.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the query fails.
    fn list_tasks_in_column(
        &mut self,
        column_id: ColumnId,
        filter: OrderFilter,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Inserts a new task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::DuplicateTask`] when the ID already exists.
    fn insert_task(&mut self, task: &Task) -> TaskStoreResult<()>;

    /// Persists every field of an existing task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    fn update_task(&mut self, task: &Task) -> TaskStoreResult<()>;

    /// Removes a task.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError::NotFound`] when the task does not exist.
    fn delete_task(&mut self, id: TaskId) -> TaskStoreResult<()>;

    /// Adds `delta` to the order of every listed task and returns the number
    /// of rows touched.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the update fails.
    fn shift_orders(&mut self, ids: &[TaskId], delta: i64) -> TaskStoreResult<u64>;

    /// Removes every task owned by the given columns and returns the number
    /// of rows removed.
    ///
    /// # Errors
    ///
    /// Returns [`TaskStoreError`] when the delete fails.
    fn delete_tasks_in_columns(&mut self, column_ids: &[ColumnId]) -> TaskStoreResult<u64>;
}

/// Task persistence contract.
///
/// Standalone reads each observe a committed state. Multi-step
/// read-modify-write sequences go through [`TaskStore::transaction`].
#[async_trait]
pub trait TaskStore: Send + Sync {
    /// Finds a task by identifier.
    ///
    /// Returns `None` when the task does not exist.
    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>>;

    /// Counts the tasks in a column.
    async fn count_tasks_in_column(&self, column_id: ColumnId) -> TaskStoreResult<u64>;

    /// Lists the tasks of a column matching `filter`, in ascending order.
    async fn list_tasks_in_column(
        &self,
        column_id: ColumnId,
        filter: OrderFilter,
    ) -> TaskStoreResult<Vec<Task>>;

    /// Runs `work` inside one atomic transaction.
    ///
    /// The transaction commits when `work` returns `Ok` and rolls back every
    /// write otherwise. Concurrent transactions touching the same rows are
    /// either serialized or rejected with [`TaskStoreError::Conflict`].
    ///
    /// # Errors
    ///
    /// Returns the error produced by `work`, or a [`TaskStoreError`]
    /// converted into `E` when the transaction cannot be opened or committed.
    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static;
}

/// Errors returned by task store implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskStoreError {
    /// A task with the same identifier already exists.
    #[error("duplicate task identifier: {0}")]
    DuplicateTask(TaskId),

    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// The referenced column does not exist.
    #[error("column not found: {0}")]
    ColumnNotFound(ColumnId),

    /// The transaction was aborted by a concurrent modification.
    #[error("transaction aborted by a concurrent modification")]
    Conflict,

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
