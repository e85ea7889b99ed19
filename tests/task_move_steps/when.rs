//! When steps for task ordering BDD scenarios.

use super::world::{TaskMoveWorld, run_async};
use eyre::WrapErr;
use rstest_bdd_macros::when;
use taskboard::task::services::{CreateTaskRequest, MoveTaskRequest};

#[when(r#"task "{title}" is moved to column "{column}" at position {position:i64}"#)]
fn move_task(
    world: &mut TaskMoveWorld,
    title: String,
    column: String,
    position: i64,
) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let task_id = world.task(&title)?;
    let request = MoveTaskRequest {
        new_column_id: world.column(&column)?,
        new_position: position,
    };
    world.last_move_result = Some(run_async(
        world.board_tasks.move_task(board_id, task_id, request),
    ));
    Ok(())
}

#[when(r#"a task "{title}" is created in column "{column}""#)]
fn create_task(world: &mut TaskMoveWorld, title: String, column: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let request = CreateTaskRequest {
        column_id: world.column(&column)?,
        title: title.clone(),
        description: None,
    };
    let task = run_async(world.board_tasks.create_task(board_id, request))
        .wrap_err("create task in scenario")?;
    world.tasks_by_title.insert(title, task.id());
    world.last_created_task = Some(task);
    Ok(())
}

#[when(r#"task "{title}" is deleted"#)]
fn delete_task(world: &mut TaskMoveWorld, title: String) -> Result<(), eyre::Report> {
    let board_id = world.board()?.id();
    let task_id = world.task(&title)?;
    run_async(world.board_tasks.delete_task(board_id, task_id))
        .wrap_err("delete task in scenario")?;
    world.tasks_by_title.remove(&title);
    Ok(())
}
