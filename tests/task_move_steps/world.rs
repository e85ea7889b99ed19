//! Shared world state for task ordering BDD scenarios.

use std::collections::HashMap;
use std::sync::Arc;

use mockable::DefaultClock;
use rstest::fixture;
use taskboard::{
    board::{
        adapters::memory::InMemoryBoardDirectory,
        domain::{Board, ColumnId},
        services::BoardCatalogService,
    },
    error::TaskBoardError,
    task::{
        adapters::memory::InMemoryTaskStore,
        domain::{Task, TaskId},
        services::{BoardTaskService, MoveAcknowledgement},
    },
};

/// Request-layer service used by the BDD world.
pub type TestBoardTasks =
    BoardTaskService<InMemoryTaskStore, InMemoryBoardDirectory, DefaultClock>;

/// Catalogue service used by the BDD world.
pub type TestCatalog = BoardCatalogService<InMemoryBoardDirectory, InMemoryTaskStore, DefaultClock>;

/// Scenario world for task ordering behaviour tests.
pub struct TaskMoveWorld {
    pub catalog: TestCatalog,
    pub board_tasks: TestBoardTasks,
    pub board: Option<Board>,
    pub tasks_by_title: HashMap<String, TaskId>,
    pub last_move_result: Option<Result<MoveAcknowledgement, TaskBoardError>>,
    pub last_created_task: Option<Task>,
}

impl TaskMoveWorld {
    /// Creates a world backed by empty in-memory adapters.
    #[must_use]
    pub fn new() -> Self {
        let directory = Arc::new(InMemoryBoardDirectory::new());
        let store = Arc::new(InMemoryTaskStore::new());
        let clock = Arc::new(DefaultClock);
        Self {
            catalog: BoardCatalogService::new(
                Arc::clone(&directory),
                Arc::clone(&store),
                Arc::clone(&clock),
            ),
            board_tasks: BoardTaskService::new(store, directory, clock),
            board: None,
            tasks_by_title: HashMap::new(),
            last_move_result: None,
            last_created_task: None,
        }
    }

    /// Returns the scenario board.
    ///
    /// # Errors
    ///
    /// Returns an error when no board has been created yet.
    pub fn board(&self) -> Result<&Board, eyre::Report> {
        self.board
            .as_ref()
            .ok_or_else(|| eyre::eyre!("missing board in scenario world"))
    }

    /// Resolves a column of the scenario board by title.
    ///
    /// # Errors
    ///
    /// Returns an error when the board has no column with that title.
    pub fn column(&self, title: &str) -> Result<ColumnId, eyre::Report> {
        self.board()?
            .columns()
            .iter()
            .find(|column| column.title() == title)
            .map(taskboard::board::domain::Column::id)
            .ok_or_else(|| eyre::eyre!("board has no column titled '{title}'"))
    }

    /// Resolves a previously created task by title.
    ///
    /// # Errors
    ///
    /// Returns an error when no task with that title was created.
    pub fn task(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks_by_title
            .get(title)
            .copied()
            .ok_or_else(|| eyre::eyre!("no task titled '{title}' in scenario world"))
    }
}

impl Default for TaskMoveWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> TaskMoveWorld {
    TaskMoveWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}

/// Splits a comma-separated title list, ignoring blanks.
#[must_use]
pub fn title_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .map(str::to_owned)
        .collect()
}
