//! When steps for task reordering BDD scenarios.

use super::world::{ReorderWorld, run_async};
use eyre::{WrapErr, eyre};
use kanban::task::domain::TaskId;
use kanban::task::services::TaskMove;
use rstest_bdd_macros::when;

fn send(world: &mut ReorderWorld, request: TaskMove) -> Result<(), eyre::Report> {
    let result = run_async(world.state.tasks.update_positions(
        world.actor()?,
        world.board()?,
        &request,
    ));
    world.last_move = Some(request);
    world.last_result = Some(result);
    Ok(())
}

fn insert_at(list: &mut Vec<TaskId>, index: usize, task: TaskId) -> Result<(), eyre::Report> {
    if index > list.len() {
        return Err(eyre!("position {index} is past the end of the section"));
    }
    list.insert(index, task);
    Ok(())
}

#[when(r#"task "{task}" is dragged to position {index:usize} within "{section}""#)]
fn drag_within(
    world: &mut ReorderWorld,
    task: String,
    index: usize,
    section: String,
) -> Result<(), eyre::Report> {
    let moved = world.task(&task)?;
    let mut order: Vec<TaskId> = world
        .order(&section)?
        .into_iter()
        .filter(|id| *id != moved)
        .collect();
    insert_at(&mut order, index, moved)?;
    let id = world.section(&section)?;
    send(
        world,
        TaskMove {
            resource_section: id,
            resource: order.clone(),
            destination_section: id,
            destination: order,
        },
    )
}

#[when(r#"task "{task}" is dragged from "{from}" to position {index:usize} of "{to}""#)]
fn drag_across(
    world: &mut ReorderWorld,
    task: String,
    from: String,
    index: usize,
    to: String,
) -> Result<(), eyre::Report> {
    let moved = world.task(&task)?;
    let resource: Vec<TaskId> = world
        .order(&from)?
        .into_iter()
        .filter(|id| *id != moved)
        .collect();
    let mut destination = world.order(&to)?;
    insert_at(&mut destination, index, moved)?;
    let request = TaskMove {
        resource_section: world.section(&from)?,
        resource,
        destination_section: world.section(&to)?,
        destination,
    };
    send(world, request)
}

#[when("the same move is sent again")]
fn repeat_move(world: &mut ReorderWorld) -> Result<(), eyre::Report> {
    let request = world
        .last_move
        .clone()
        .ok_or_else(|| eyre!("no earlier move in scenario world"))?;
    send(world, request)
}

#[when(r#"task "{task}" is deleted"#)]
fn delete_task(world: &mut ReorderWorld, task: String) -> Result<(), eyre::Report> {
    let id = world.task(&task)?;
    run_async(
        world
            .state
            .tasks
            .delete_task(world.actor()?, world.board()?, id),
    )
    .wrap_err("delete scenario task")
}

#[when(r#"section "{section}" is reordered with an unknown task first"#)]
fn reorder_with_unknown(world: &mut ReorderWorld, section: String) -> Result<(), eyre::Report> {
    let id = world.section(&section)?;
    let mut order = world.order(&section)?;
    order.reverse();
    order.insert(0, TaskId::new());
    send(
        world,
        TaskMove {
            resource_section: id,
            resource: Vec::new(),
            destination_section: id,
            destination: order,
        },
    )
}

#[when(r#"section "{section}" is reordered without task "{task}""#)]
fn reorder_without(
    world: &mut ReorderWorld,
    section: String,
    task: String,
) -> Result<(), eyre::Report> {
    let id = world.section(&section)?;
    let left_out = world.task(&task)?;
    let mut order: Vec<TaskId> = world
        .order(&section)?
        .into_iter()
        .filter(|candidate| *candidate != left_out)
        .collect();
    order.reverse();
    send(
        world,
        TaskMove {
            resource_section: id,
            resource: Vec::new(),
            destination_section: id,
            destination: order,
        },
    )
}
