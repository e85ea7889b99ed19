//! In-memory task store for tests and embedding.
//!
//! Transactions are serialized behind the state lock and applied to a staged
//! copy of the task map, which replaces the live map only on commit.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::board::domain::ColumnId;
use crate::task::{
    domain::{Task, TaskId},
    ports::{OrderFilter, TaskStore, TaskStoreError, TaskStoreResult, TaskTransaction},
};

/// Thread-safe in-memory task store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryTaskStore {
    state: Arc<RwLock<HashMap<TaskId, Task>>>,
}

impl InMemoryTaskStore {
    /// Creates an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn lock_error(err: impl ToString) -> TaskStoreError {
    TaskStoreError::persistence(std::io::Error::other(err.to_string()))
}

fn column_tasks(
    tasks: &HashMap<TaskId, Task>,
    column_id: ColumnId,
    filter: OrderFilter,
) -> Vec<Task> {
    let mut matching: Vec<Task> = tasks
        .values()
        .filter(|task| task.column_id() == column_id && filter.matches(task.order()))
        .cloned()
        .collect();
    matching.sort_by_key(|task| (task.order(), task.id()));
    matching
}

#[async_trait]
impl TaskStore for InMemoryTaskStore {
    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(state.get(&id).cloned())
    }

    async fn count_tasks_in_column(&self, column_id: ColumnId) -> TaskStoreResult<u64> {
        let state = self.state.read().map_err(lock_error)?;
        let count = state
            .values()
            .filter(|task| task.column_id() == column_id)
            .count();
        u64::try_from(count).map_err(TaskStoreError::persistence)
    }

    async fn list_tasks_in_column(
        &self,
        column_id: ColumnId,
        filter: OrderFilter,
    ) -> TaskStoreResult<Vec<Task>> {
        let state = self.state.read().map_err(lock_error)?;
        Ok(column_tasks(&state, column_id, filter))
    }

    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static,
    {
        let mut state = self.state.write().map_err(lock_error)?;
        let mut staged = StagedTransaction {
            tasks: state.clone(),
        };
        let output = work(&mut staged)?;
        *state = staged.tasks;
        Ok(output)
    }
}

/// Working copy mutated by a single in-memory transaction.
struct StagedTransaction {
    tasks: HashMap<TaskId, Task>,
}

impl TaskTransaction for StagedTransaction {
    fn find_task(&mut self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        Ok(self.tasks.get(&id).cloned())
    }

    fn count_tasks_in_column(&mut self, column_id: ColumnId) -> TaskStoreResult<u64> {
        let count = self
            .tasks
            .values()
            .filter(|task| task.column_id() == column_id)
            .count();
        u64::try_from(count).map_err(TaskStoreError::persistence)
    }

    fn list_tasks_in_column(
        &mut self,
        column_id: ColumnId,
        filter: OrderFilter,
    ) -> TaskStoreResult<Vec<Task>> {
        Ok(column_tasks(&self.tasks, column_id, filter))
    }

    fn insert_task(&mut self, task: &Task) -> TaskStoreResult<()> {
        if self.tasks.contains_key(&task.id()) {
            return Err(TaskStoreError::DuplicateTask(task.id()));
        }
        self.tasks.insert(task.id(), task.clone());
        Ok(())
    }

    fn update_task(&mut self, task: &Task) -> TaskStoreResult<()> {
        let stored = self
            .tasks
            .get_mut(&task.id())
            .ok_or(TaskStoreError::NotFound(task.id()))?;
        *stored = task.clone();
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> TaskStoreResult<()> {
        self.tasks
            .remove(&id)
            .map(|_| ())
            .ok_or(TaskStoreError::NotFound(id))
    }

    fn shift_orders(&mut self, ids: &[TaskId], delta: i64) -> TaskStoreResult<u64> {
        let mut shifted = 0_u64;
        for id in ids {
            let Some(task) = self.tasks.get_mut(id) else {
                continue;
            };
            task.shift_order(delta).map_err(TaskStoreError::persistence)?;
            shifted += 1;
        }
        Ok(shifted)
    }

    fn delete_tasks_in_columns(&mut self, column_ids: &[ColumnId]) -> TaskStoreResult<u64> {
        let before = self.tasks.len();
        self.tasks
            .retain(|_, task| !column_ids.contains(&task.column_id()));
        u64::try_from(before - self.tasks.len()).map_err(TaskStoreError::persistence)
    }
}
