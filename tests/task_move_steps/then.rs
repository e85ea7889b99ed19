//! Then steps for task ordering BDD scenarios.

use super::world::{TaskMoveWorld, run_async, title_list};
use rstest_bdd_macros::then;
use taskboard::{error::TaskBoardError, task::services::TASK_MOVED_MESSAGE};

#[then("the move is acknowledged")]
fn move_acknowledged(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_move_result
        .as_ref()
        .ok_or_else(|| eyre::eyre!("missing move result in scenario world"))?;
    let ack = result
        .as_ref()
        .map_err(|err| eyre::eyre!("unexpected move failure: {err}"))?;
    if ack.message != TASK_MOVED_MESSAGE {
        return Err(eyre::eyre!("unexpected acknowledgement '{}'", ack.message));
    }
    Ok(())
}

#[then("the move is rejected as an invalid position")]
fn move_rejected(world: &TaskMoveWorld) -> Result<(), eyre::Report> {
    match world.last_move_result.as_ref() {
        Some(Err(TaskBoardError::InvalidPosition { .. })) => Ok(()),
        Some(Err(err)) => Err(eyre::eyre!("expected invalid position, got: {err}")),
        Some(Ok(_)) => Err(eyre::eyre!("expected the move to be rejected")),
        None => Err(eyre::eyre!("missing move result in scenario world")),
    }
}

#[then(r#"column "{column}" lists "{titles}""#)]
fn column_lists(world: &TaskMoveWorld, column: String, titles: String) -> Result<(), eyre::Report> {
    let column_id = world.column(&column)?;
    let tasks = run_async(world.board_tasks.ordering().list_column(column_id))
        .map_err(|err| eyre::eyre!("list column failed: {err}"))?;

    let actual: Vec<String> = tasks
        .iter()
        .map(|task| task.title().as_str().to_owned())
        .collect();
    let expected = title_list(&titles);
    if actual != expected {
        return Err(eyre::eyre!("column '{column}' holds {actual:?}, expected {expected:?}"));
    }
    for (expected_order, task) in (1_i64..).zip(&tasks) {
        if task.order().value() != expected_order {
            return Err(eyre::eyre!(
                "task '{}' has order {}, expected {expected_order}",
                task.title(),
                task.order()
            ));
        }
    }
    Ok(())
}

#[then(r#"task "{title}" has order {order:i64}"#)]
fn task_has_order(world: &TaskMoveWorld, title: String, order: i64) -> Result<(), eyre::Report> {
    let task = world
        .last_created_task
        .as_ref()
        .filter(|task| task.title().as_str() == title)
        .ok_or_else(|| eyre::eyre!("no created task titled '{title}'"))?;
    if task.order().value() != order {
        return Err(eyre::eyre!(
            "task '{title}' has order {}, expected {order}",
            task.order()
        ));
    }
    Ok(())
}
