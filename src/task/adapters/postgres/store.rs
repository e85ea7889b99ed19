//! `PostgreSQL` store implementation for task persistence.
//!
//! Transactions run at `SERIALIZABLE` isolation on a pooled connection inside
//! `spawn_blocking`. The `(column_id, position)` uniqueness constraint is
//! deferred to commit so batch shifts may pass through intermediate states.

use super::{
    models::{NewTaskRow, TaskChangeset, TaskRow},
    schema::tasks,
};
use crate::board::domain::ColumnId;
use crate::config::PgPool;
use crate::task::{
    domain::{PersistedTaskData, Task, TaskId, TaskOrder, TaskTitle},
    ports::{OrderBound, OrderFilter, TaskStore, TaskStoreError, TaskStoreResult, TaskTransaction},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind, Error as DieselError};

const TASK_PRIMARY_KEY: &str = "tasks_pkey";
const COLUMN_POSITION_CONSTRAINT: &str = "tasks_column_position_unique";
const DEADLOCK_MESSAGE: &str = "deadlock detected";

/// `PostgreSQL`-backed task store.
#[derive(Debug, Clone)]
pub struct PostgresTaskStore {
    pool: PgPool,
}

impl PostgresTaskStore {
    /// Creates a new store from a `PostgreSQL` connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> TaskStoreResult<T>
    where
        F: FnOnce(&mut PgConnection) -> TaskStoreResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            f(&mut connection)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

#[async_trait]
impl TaskStore for PostgresTaskStore {
    async fn find_task(&self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        self.run_blocking(move |connection| PgTaskTransaction { connection }.find_task(id))
            .await
    }

    async fn count_tasks_in_column(&self, column_id: ColumnId) -> TaskStoreResult<u64> {
        self.run_blocking(move |connection| {
            PgTaskTransaction { connection }.count_tasks_in_column(column_id)
        })
        .await
    }

    async fn list_tasks_in_column(
        &self,
        column_id: ColumnId,
        filter: OrderFilter,
    ) -> TaskStoreResult<Vec<Task>> {
        self.run_blocking(move |connection| {
            PgTaskTransaction { connection }.list_tasks_in_column(column_id, filter)
        })
        .await
    }

    async fn transaction<T, E, F>(&self, work: F) -> Result<T, E>
    where
        F: FnOnce(&mut dyn TaskTransaction) -> Result<T, E> + Send + 'static,
        T: Send + 'static,
        E: From<TaskStoreError> + Send + 'static,
    {
        let pool = self.pool.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = pool.get().map_err(TaskStoreError::persistence)?;
            connection
                .build_transaction()
                .serializable()
                .run(|conn| {
                    work(&mut PgTaskTransaction { connection: conn })
                        .map_err(TransactionFailure::Work)
                })
                .map_err(TransactionFailure::into_error)
        })
        .await
        .map_err(TaskStoreError::persistence)?
    }
}

/// Outcome of a failed Diesel transaction: either the caller's work failed or
/// the database rejected the transaction itself (typically at commit).
enum TransactionFailure<E> {
    Work(E),
    Database(DieselError),
}

impl<E> From<DieselError> for TransactionFailure<E> {
    fn from(err: DieselError) -> Self {
        Self::Database(err)
    }
}

impl<E: From<TaskStoreError>> TransactionFailure<E> {
    fn into_error(self) -> E {
        match self {
            Self::Work(err) => err,
            Self::Database(err) => E::from(map_diesel_error(err)),
        }
    }
}

/// Statement set bound to one connection, used both inside explicit
/// transactions and for standalone reads.
struct PgTaskTransaction<'c> {
    connection: &'c mut PgConnection,
}

impl TaskTransaction for PgTaskTransaction<'_> {
    fn find_task(&mut self, id: TaskId) -> TaskStoreResult<Option<Task>> {
        let row = tasks::table
            .find(id.into_inner())
            .select(TaskRow::as_select())
            .first::<TaskRow>(self.connection)
            .optional()
            .map_err(map_diesel_error)?;
        row.map(row_to_task).transpose()
    }

    fn count_tasks_in_column(&mut self, column_id: ColumnId) -> TaskStoreResult<u64> {
        let count = tasks::table
            .filter(tasks::column_id.eq(column_id.into_inner()))
            .count()
            .get_result::<i64>(self.connection)
            .map_err(map_diesel_error)?;
        u64::try_from(count).map_err(TaskStoreError::persistence)
    }

    fn list_tasks_in_column(
        &mut self,
        column_id: ColumnId,
        filter: OrderFilter,
    ) -> TaskStoreResult<Vec<Task>> {
        let mut query = tasks::table
            .filter(tasks::column_id.eq(column_id.into_inner()))
            .select(TaskRow::as_select())
            .into_boxed();

        if let Some(lower) = filter.lower() {
            query = match lower {
                OrderBound::Inclusive(order) => query.filter(tasks::position.ge(order.value())),
                OrderBound::Exclusive(order) => query.filter(tasks::position.gt(order.value())),
            };
        }
        if let Some(upper) = filter.upper() {
            query = match upper {
                OrderBound::Inclusive(order) => query.filter(tasks::position.le(order.value())),
                OrderBound::Exclusive(order) => query.filter(tasks::position.lt(order.value())),
            };
        }

        query
            .order((tasks::position.asc(), tasks::id.asc()))
            .load::<TaskRow>(self.connection)
            .map_err(map_diesel_error)?
            .into_iter()
            .map(row_to_task)
            .collect()
    }

    fn insert_task(&mut self, task: &Task) -> TaskStoreResult<()> {
        diesel::insert_into(tasks::table)
            .values(&to_new_row(task))
            .execute(self.connection)
            .map_err(|err| map_write_error(err, task))?;
        Ok(())
    }

    fn update_task(&mut self, task: &Task) -> TaskStoreResult<()> {
        let updated_count = diesel::update(tasks::table.find(task.id().into_inner()))
            .set(&to_changeset(task))
            .execute(self.connection)
            .map_err(|err| map_write_error(err, task))?;

        if updated_count == 0 {
            return Err(TaskStoreError::NotFound(task.id()));
        }
        Ok(())
    }

    fn delete_task(&mut self, id: TaskId) -> TaskStoreResult<()> {
        let deleted_count = diesel::delete(tasks::table.find(id.into_inner()))
            .execute(self.connection)
            .map_err(map_diesel_error)?;

        if deleted_count == 0 {
            return Err(TaskStoreError::NotFound(id));
        }
        Ok(())
    }

    fn shift_orders(&mut self, ids: &[TaskId], delta: i64) -> TaskStoreResult<u64> {
        if ids.is_empty() {
            return Ok(0);
        }
        let task_ids: Vec<uuid::Uuid> = ids.iter().map(|id| id.into_inner()).collect();
        let shifted = diesel::update(tasks::table.filter(tasks::id.eq_any(task_ids)))
            .set(tasks::position.eq(tasks::position + delta))
            .execute(self.connection)
            .map_err(map_diesel_error)?;
        u64::try_from(shifted).map_err(TaskStoreError::persistence)
    }

    fn delete_tasks_in_columns(&mut self, column_ids: &[ColumnId]) -> TaskStoreResult<u64> {
        if column_ids.is_empty() {
            return Ok(0);
        }
        let columns: Vec<uuid::Uuid> = column_ids.iter().map(|id| id.into_inner()).collect();
        let deleted = diesel::delete(tasks::table.filter(tasks::column_id.eq_any(columns)))
            .execute(self.connection)
            .map_err(map_diesel_error)?;
        u64::try_from(deleted).map_err(TaskStoreError::persistence)
    }
}

fn to_new_row(task: &Task) -> NewTaskRow {
    NewTaskRow {
        id: task.id().into_inner(),
        column_id: task.column_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        position: task.order().value(),
        created_at: task.created_at(),
        updated_at: task.updated_at(),
    }
}

fn to_changeset(task: &Task) -> TaskChangeset {
    TaskChangeset {
        column_id: task.column_id().into_inner(),
        title: task.title().as_str().to_owned(),
        description: task.description().map(str::to_owned),
        position: task.order().value(),
        updated_at: task.updated_at(),
    }
}

fn row_to_task(row: TaskRow) -> TaskStoreResult<Task> {
    let TaskRow {
        id,
        column_id,
        title: persisted_title,
        description,
        position,
        created_at,
        updated_at,
    } = row;

    let title = TaskTitle::new(persisted_title).map_err(TaskStoreError::persistence)?;
    let order = TaskOrder::new(position).map_err(TaskStoreError::persistence)?;

    Ok(Task::from_persisted(PersistedTaskData {
        id: TaskId::from_uuid(id),
        column_id: ColumnId::from_uuid(column_id),
        title,
        description,
        order,
        created_at,
        updated_at,
    }))
}

fn map_write_error(err: DieselError, task: &Task) -> TaskStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_constraint(info.as_ref(), TASK_PRIMARY_KEY) =>
        {
            TaskStoreError::DuplicateTask(task.id())
        }
        DieselError::DatabaseError(DatabaseErrorKind::ForeignKeyViolation, _) => {
            TaskStoreError::ColumnNotFound(task.column_id())
        }
        _ => map_diesel_error(err),
    }
}

fn map_diesel_error(err: DieselError) -> TaskStoreError {
    match err {
        DieselError::DatabaseError(DatabaseErrorKind::SerializationFailure, _) => {
            TaskStoreError::Conflict
        }
        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, ref info)
            if is_constraint(info.as_ref(), COLUMN_POSITION_CONSTRAINT) =>
        {
            TaskStoreError::Conflict
        }
        DieselError::DatabaseError(DatabaseErrorKind::Unknown, ref info)
            if info.message().starts_with(DEADLOCK_MESSAGE) =>
        {
            TaskStoreError::Conflict
        }
        _ => TaskStoreError::persistence(err),
    }
}

fn is_constraint(info: &dyn DatabaseErrorInformation, name: &str) -> bool {
    info.constraint_name()
        .is_some_and(|constraint| constraint == name)
}
