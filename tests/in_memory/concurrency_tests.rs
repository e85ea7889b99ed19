//! Concurrent operations against one column.

use std::sync::Arc;

use super::helpers::{App, app, assert_dense};
use rstest::rstest;
use taskboard::task::domain::{Task, TaskTitle};

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_moves_into_one_column_stay_dense(app: App) -> eyre::Result<()> {
    let (_, columns) = app.board("Contended").await?;
    let sources = app
        .seed(columns.todo, &["a", "b", "c", "d", "e", "f", "g", "h"])
        .await?;
    app.seed(columns.doing, &["p", "q"]).await?;
    let ordering = Arc::new(app.ordering);

    let handles: Vec<_> = sources
        .iter()
        .map(Task::id)
        .map(|task_id| {
            let engine = Arc::clone(&ordering);
            tokio::spawn(async move { engine.move_task(task_id, columns.doing, 1).await })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let doing = ordering.list_column(columns.doing).await?;
    assert_eq!(doing.len(), 10);
    assert_dense(&doing)?;
    assert!(ordering.list_column(columns.todo).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_creates_get_distinct_orders(app: App) -> eyre::Result<()> {
    let (_, columns) = app.board("Busy").await?;
    let ordering = Arc::new(app.ordering);

    let handles: Vec<_> = (0..16)
        .map(|index| {
            let engine = Arc::clone(&ordering);
            tokio::spawn(async move {
                let title = TaskTitle::new(format!("task {index}"))?;
                let created = engine.create_task(columns.done, title, None).await?;
                Ok::<_, eyre::Report>(created)
            })
        })
        .collect();
    for handle in handles {
        handle.await??;
    }

    let done = ordering.list_column(columns.done).await?;
    assert_eq!(done.len(), 16);
    assert_dense(&done)?;
    Ok(())
}
