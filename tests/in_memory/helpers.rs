//! Shared test helpers for in-memory integration tests.

use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::{
        adapters::memory::InMemoryBoardDirectory,
        domain::{Board, ColumnId},
        services::BoardCatalogService,
    },
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{Task, TaskTitle},
        services::{BoardTaskService, TaskOrderingService},
    },
};

/// Ordering engine wired to in-memory adapters.
pub type Ordering = TaskOrderingService<InMemoryTaskStore, InMemoryBoardDirectory, DefaultClock>;

/// Request layer wired to in-memory adapters.
pub type BoardTasks = BoardTaskService<InMemoryTaskStore, InMemoryBoardDirectory, DefaultClock>;

/// Board catalogue wired to in-memory adapters.
pub type Catalog = BoardCatalogService<InMemoryBoardDirectory, InMemoryTaskStore, DefaultClock>;

/// Services sharing one pair of in-memory adapters.
pub struct App {
    pub catalog: Catalog,
    pub ordering: Ordering,
    pub board_tasks: BoardTasks,
}

/// Provides services over fresh in-memory adapters.
#[fixture]
pub fn app() -> App {
    let directory = Arc::new(InMemoryBoardDirectory::new());
    let store = Arc::new(InMemoryTaskStore::new());
    let clock = Arc::new(DefaultClock);
    App {
        catalog: BoardCatalogService::new(
            Arc::clone(&directory),
            Arc::clone(&store),
            Arc::clone(&clock),
        ),
        ordering: TaskOrderingService::new(
            Arc::clone(&store),
            Arc::clone(&directory),
            Arc::clone(&clock),
        ),
        board_tasks: BoardTaskService::new(store, directory, clock),
    }
}

/// The three default columns of a board.
pub struct Columns {
    pub todo: ColumnId,
    pub doing: ColumnId,
    pub done: ColumnId,
}

/// Returns the default columns of `board`.
///
/// # Errors
///
/// Returns an error when the board does not carry three columns.
pub fn columns(board: &Board) -> eyre::Result<Columns> {
    let [todo, doing, done] = board.columns() else {
        eyre::bail!("expected three columns, found {}", board.columns().len());
    };
    Ok(Columns {
        todo: todo.id(),
        doing: doing.id(),
        done: done.id(),
    })
}

impl App {
    /// Creates a board and returns it with its columns.
    ///
    /// # Errors
    ///
    /// Returns an error when the board cannot be created.
    pub async fn board(&self, name: &str) -> eyre::Result<(Board, Columns)> {
        let board = self.catalog.create_board(name).await?;
        let board_columns = columns(&board)?;
        Ok((board, board_columns))
    }

    /// Appends tasks with the given titles to a column, in order.
    ///
    /// # Errors
    ///
    /// Returns an error when a task cannot be created.
    pub async fn seed(&self, column_id: ColumnId, titles: &[&str]) -> eyre::Result<Vec<Task>> {
        let mut created = Vec::with_capacity(titles.len());
        for title in titles {
            let task = self
                .ordering
                .create_task(column_id, TaskTitle::new(*title)?, None)
                .await?;
            created.push(task);
        }
        Ok(created)
    }

    /// Returns the titles of a column, head first.
    ///
    /// # Errors
    ///
    /// Returns an error when the column cannot be listed or is not dense.
    pub async fn titles(&self, column_id: ColumnId) -> eyre::Result<Vec<String>> {
        let tasks = self.ordering.list_column(column_id).await?;
        assert_dense(&tasks)?;
        Ok(tasks
            .iter()
            .map(|task| task.title().as_str().to_owned())
            .collect())
    }
}

/// Fails unless the orders of `tasks` are exactly `1..=N` in list order.
///
/// # Errors
///
/// Returns an error describing the first out-of-place order.
pub fn assert_dense(tasks: &[Task]) -> eyre::Result<()> {
    for (expected, task) in (1_i64..).zip(tasks) {
        if task.order().value() != expected {
            eyre::bail!(
                "task '{}' has order {}, expected {expected}",
                task.title(),
                task.order()
            );
        }
    }
    Ok(())
}

/// Returns the identifier of the task at `index`.
///
/// # Errors
///
/// Returns an error when `index` is out of range.
pub fn id_at(tasks: &[Task], index: usize) -> eyre::Result<taskboard::task::domain::TaskId> {
    tasks
        .get(index)
        .map(Task::id)
        .ok_or_else(|| eyre::eyre!("no seeded task at index {index}"))
}
