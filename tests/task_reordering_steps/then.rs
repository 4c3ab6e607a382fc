//! Then steps for task reordering BDD scenarios.

use super::world::{ReorderWorld, run_async, titles};
use eyre::{ensure, eyre};
use kanban::task::ports::TaskRepositoryError;
use kanban::task::services::TaskServiceError;
use rstest_bdd_macros::then;

#[then(r#"section "{section}" lists "{tasks}""#)]
fn section_lists(
    world: &ReorderWorld,
    section: String,
    tasks: String,
) -> Result<(), eyre::Report> {
    let id = world.section(&section)?;
    let detail = run_async(world.state.boards.board_detail(world.actor()?, world.board()?))?;
    let column = detail
        .sections
        .into_iter()
        .find(|candidate| candidate.section.id() == id)
        .ok_or_else(|| eyre!("section {section:?} missing from board"))?;

    let actual: Vec<(&str, u32)> = column
        .tasks
        .iter()
        .map(|task| (task.title(), task.position().value()))
        .collect();
    let expected: Vec<(&str, u32)> = titles(&tasks).into_iter().zip(0_u32..).collect();
    ensure!(
        actual == expected,
        "section {section:?}: expected {expected:?}, found {actual:?}"
    );
    Ok(())
}

#[then("the reorder fails because a task was not found")]
fn reorder_fails_not_found(world: &ReorderWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre!("no reorder result in scenario world"))?;
    ensure!(
        matches!(
            result,
            Err(TaskServiceError::Repository(TaskRepositoryError::NotFound(_)))
        ),
        "expected a missing task error, got {result:?}"
    );
    Ok(())
}

#[then("the reorder fails because a task was left out")]
fn reorder_fails_incomplete(world: &ReorderWorld) -> Result<(), eyre::Report> {
    let result = world
        .last_result
        .as_ref()
        .ok_or_else(|| eyre!("no reorder result in scenario world"))?;
    ensure!(
        matches!(
            result,
            Err(TaskServiceError::Repository(TaskRepositoryError::IncompleteOrder { .. }))
        ),
        "expected an incomplete order error, got {result:?}"
    );
    Ok(())
}
