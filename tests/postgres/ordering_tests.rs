//! Ordering engine scenarios against `PostgreSQL`.

use std::sync::Arc;

use super::helpers::TestDatabase;
use pg_embedded_setup_unpriv::{TestCluster, test_support::shared_test_cluster};
use rstest::rstest;
use taskboard::{
    board::domain::{Board, ColumnId},
    error::TaskBoardError,
    task::{
        domain::{Task, TaskTitle},
        ports::TaskStore,
        services::{CreateTaskRequest, MoveTaskRequest},
    },
};

async fn seed_board(db: &TestDatabase, name: &str) -> eyre::Result<(Board, Vec<ColumnId>)> {
    let board = db.catalog()?.create_board(name).await?;
    let columns = board.columns().iter().map(|c| c.id()).collect();
    Ok((board, columns))
}

async fn seed(db: &TestDatabase, column: ColumnId, titles: &[&str]) -> eyre::Result<Vec<Task>> {
    let ordering = db.ordering()?;
    let mut created = Vec::new();
    for title in titles {
        created.push(ordering.create_task(column, TaskTitle::new(*title)?, None).await?);
    }
    Ok(created)
}

async fn layout(db: &TestDatabase, column: ColumnId) -> eyre::Result<Vec<(String, i64)>> {
    Ok(db
        .ordering()?
        .list_column(column)
        .await?
        .iter()
        .map(|t| (t.title().as_str().to_owned(), t.order().value()))
        .collect())
}

fn pairs(expected: &[(&str, i64)]) -> Vec<(String, i64)> {
    expected
        .iter()
        .map(|(title, order)| ((*title).to_owned(), *order))
        .collect()
}

fn column(columns: &[ColumnId], index: usize) -> eyre::Result<ColumnId> {
    columns
        .get(index)
        .copied()
        .ok_or_else(|| eyre::eyre!("missing column {index}"))
}

#[rstest]
fn same_and_cross_column_moves_keep_columns_dense(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster)?;
    db.run(async {
        let (board, columns) = seed_board(&db, "Moves").await?;
        let (todo, doing) = (column(&columns, 0)?, column(&columns, 1)?);
        let todo_tasks = seed(&db, todo, &["X", "Y", "Z"]).await?;
        seed(&db, doing, &["P"]).await?;
        let service = db.board_tasks()?;
        let id = |index: usize| {
            todo_tasks
                .get(index)
                .map(Task::id)
                .ok_or_else(|| eyre::eyre!("missing task {index}"))
        };

        service
            .move_task(
                board.id(),
                id(2)?,
                MoveTaskRequest {
                    new_column_id: todo,
                    new_position: 1,
                },
            )
            .await?;
        assert_eq!(layout(&db, todo).await?, pairs(&[("Z", 1), ("X", 2), ("Y", 3)]));

        service
            .move_task(
                board.id(),
                id(0)?,
                MoveTaskRequest {
                    new_column_id: doing,
                    new_position: 1,
                },
            )
            .await?;
        assert_eq!(layout(&db, todo).await?, pairs(&[("Z", 1), ("Y", 2)]));
        assert_eq!(layout(&db, doing).await?, pairs(&[("X", 1), ("P", 2)]));
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn create_and_delete_keep_column_dense(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster)?;
    db.run(async {
        let (board, columns) = seed_board(&db, "Lifecycle").await?;
        let todo = column(&columns, 0)?;
        let tasks = seed(&db, todo, &["X", "Y"]).await?;
        let service = db.board_tasks()?;

        let created = service
            .create_task(
                board.id(),
                CreateTaskRequest {
                    column_id: todo,
                    title: "W".to_owned(),
                    description: Some("appended".to_owned()),
                },
            )
            .await?;
        let first = tasks.first().map(Task::id).ok_or_else(|| eyre::eyre!("no task"))?;
        service.delete_task(board.id(), first).await?;

        assert_eq!(created.order().value(), 3);
        assert_eq!(layout(&db, todo).await?, pairs(&[("Y", 1), ("W", 2)]));
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn concurrent_moves_never_duplicate_orders(
    shared_test_cluster: &'static TestCluster,
) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster)?;
    db.run(async {
        let (_, columns) = seed_board(&db, "Contended").await?;
        let (todo, doing) = (column(&columns, 0)?, column(&columns, 1)?);
        let sources = seed(&db, todo, &["a", "b", "c", "d", "e", "f"]).await?;
        seed(&db, doing, &["p"]).await?;
        let ordering = Arc::new(db.ordering()?);

        let handles: Vec<_> = sources
            .iter()
            .map(Task::id)
            .map(|task_id| {
                let engine = Arc::clone(&ordering);
                tokio::spawn(async move {
                    loop {
                        match engine.move_task(task_id, doing, 1).await {
                            Err(err) if err.is_retryable() => {}
                            other => break other,
                        }
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.await??;
        }

        let orders: Vec<i64> = layout(&db, doing).await?.into_iter().map(|(_, o)| o).collect();
        assert_eq!(orders, (1..=7).collect::<Vec<i64>>());
        assert!(layout(&db, todo).await?.is_empty());
        Ok::<(), eyre::Report>(())
    })
}

#[rstest]
fn deleting_board_cascades_to_tasks(shared_test_cluster: &'static TestCluster) -> eyre::Result<()> {
    let db = TestDatabase::create(shared_test_cluster)?;
    db.run(async {
        let (board, columns) = seed_board(&db, "Cascade").await?;
        let todo = column(&columns, 0)?;
        seed(&db, todo, &["a", "b"]).await?;
        let catalog = db.catalog()?;

        catalog.delete_board(board.id()).await?;

        assert!(matches!(
            catalog.get_board(board.id()).await,
            Err(TaskBoardError::BoardNotFound(_))
        ));
        assert!(catalog.list_boards(None).await?.is_empty());
        let (store, _) = db.adapters()?;
        assert_eq!(store.count_tasks_in_column(todo).await?, 0);
        Ok::<(), eyre::Report>(())
    })
}
