//! Given steps for task reordering BDD scenarios.

use super::world::{ReorderWorld, run_async, titles};
use eyre::WrapErr;
use kanban::task::domain::TaskChanges;
use kanban::task::services::CreateTaskRequest;
use rstest_bdd_macros::given;

#[given(r#"section "{name}" holding "{tasks}""#)]
fn section_holding(
    world: &mut ReorderWorld,
    name: String,
    tasks: String,
) -> Result<(), eyre::Report> {
    if world.admin.is_none() {
        let admin = run_async(world.state.users.ensure_admin("scenario_admin"))
            .wrap_err("seed scenario admin")?;
        world.admin = Some(admin);
    }
    let actor = world.actor()?;
    let board = match world.board {
        Some(board) => board,
        None => {
            let created = run_async(world.state.boards.create_board(actor))
                .wrap_err("create scenario board")?;
            world.board = Some(created.id());
            created.id()
        }
    };

    let section = run_async(world.state.sections.create_section(actor, board))
        .wrap_err("create scenario section")?;
    world.sections.insert(name, section.id());

    for title in titles(&tasks) {
        let created = run_async(world.state.tasks.create_task(
            actor,
            board,
            CreateTaskRequest::new(section.id()),
        ))
        .wrap_err("create scenario task")?;
        let changes = TaskChanges {
            title: Some(title.to_owned()),
            ..TaskChanges::default()
        };
        run_async(
            world
                .state
                .tasks
                .update_task(actor, board, created.task.id(), changes),
        )
        .wrap_err("title scenario task")?;
        world.tasks.insert(title.to_owned(), created.task.id());
    }
    Ok(())
}
