//! Board catalogue flows across services.

use super::helpers::{App, app};
use rstest::rstest;
use serde_json::json;
use taskboard::error::TaskBoardError;

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn search_matches_board_names_and_task_titles(app: App) -> eyre::Result<()> {
    let (_, groceries) = app.board("Groceries").await?;
    let (_, chores) = app.board("Chores").await?;
    app.seed(groceries.todo, &["Buy milk"]).await?;
    app.seed(chores.done, &["Fix the MILK frother"]).await?;

    let by_task: Vec<String> = app
        .catalog
        .list_boards(Some("milk"))
        .await?
        .iter()
        .map(|view| view.board.name().as_str().to_owned())
        .collect();
    let by_name = app.catalog.list_boards(Some("GROC")).await?;

    assert_eq!(by_task, ["Groceries", "Chores"]);
    assert_eq!(by_name.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleted_board_takes_its_tasks_along(app: App) -> eyre::Result<()> {
    let (board, columns) = app.board("Temporary").await?;
    app.seed(columns.todo, &["a", "b"]).await?;
    app.seed(columns.done, &["c"]).await?;

    app.catalog.delete_board(board.id()).await?;

    assert!(matches!(
        app.catalog.get_board(board.id()).await,
        Err(TaskBoardError::BoardNotFound(_))
    ));
    assert!(matches!(
        app.ordering.list_column(columns.todo).await,
        Err(TaskBoardError::ColumnNotFound(_))
    ));
    assert!(app.catalog.list_boards(None).await?.is_empty());
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_view_serializes_columns_and_tasks(app: App) -> eyre::Result<()> {
    let (board, columns) = app.board("Serialized").await?;
    app.seed(columns.doing, &["Only task"]).await?;

    let view = app.catalog.get_board(board.id()).await?;
    let json = serde_json::to_value(&view)?;

    let field = |pointer: &str| json.pointer(pointer).cloned();

    assert_eq!(field("/board/name"), Some(json!("Serialized")));
    assert_eq!(field("/columns/1/column/title"), Some(json!("In Progress")));
    assert_eq!(field("/columns/1/tasks/0/title"), Some(json!("Only task")));
    assert_eq!(field("/columns/1/tasks/0/order"), Some(json!(1)));
    Ok(())
}
