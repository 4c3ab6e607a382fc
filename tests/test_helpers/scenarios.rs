//! Behaviour every storage backend must show.

use super::{Workspace, dense};
use eyre::{Result, ensure, eyre};
use kanban::board::services::BoardServiceError;
use kanban::task::domain::TaskId;
use kanban::task::ports::TaskRepositoryError;
use kanban::task::services::{CreateTaskRequest, TaskMove, TaskServiceError};

/// `[T1, T2, T3]`, drag T3 to the top.
pub async fn drag_within_section(workspace: &Workspace) -> Result<()> {
    let seeded = workspace.seed_board(&[&["T1", "T2", "T3"]]).await?;
    let todo = seeded.section(0)?;
    let [t1, t2, t3] = <[TaskId; 3]>::try_from(seeded.tasks_of(0)?)?;

    let request = TaskMove {
        resource_section: todo,
        resource: vec![t3, t1, t2],
        destination_section: todo,
        destination: vec![t3, t1, t2],
    };
    workspace.drag(seeded.board.id(), &request).await?;

    let column = workspace.column(seeded.board.id(), todo).await?;
    ensure!(column == dense(&["T3", "T1", "T2"]), "unexpected order {column:?}");
    Ok(())
}

/// T2 from A `[T1, T2, T3]` to the top of B `[U1]`.
pub async fn drag_across_sections(workspace: &Workspace) -> Result<()> {
    let seeded = workspace
        .seed_board(&[&["T1", "T2", "T3"], &["U1"]])
        .await?;
    let (a, b) = (seeded.section(0)?, seeded.section(1)?);
    let [t1, t2, t3] = <[TaskId; 3]>::try_from(seeded.tasks_of(0)?)?;
    let [u1] = <[TaskId; 1]>::try_from(seeded.tasks_of(1)?)?;

    let request = TaskMove {
        resource_section: a,
        resource: vec![t1, t3],
        destination_section: b,
        destination: vec![t2, u1],
    };
    workspace.drag(seeded.board.id(), &request).await?;
    workspace.drag(seeded.board.id(), &request).await?;

    let source = workspace.column(seeded.board.id(), a).await?;
    let target = workspace.column(seeded.board.id(), b).await?;
    ensure!(source == dense(&["T1", "T3"]), "unexpected source {source:?}");
    ensure!(target == dense(&["T2", "U1"]), "unexpected target {target:?}");
    Ok(())
}

/// A reorder naming a task that does not exist writes nothing.
pub async fn failed_reorder_rolls_back(workspace: &Workspace) -> Result<()> {
    let seeded = workspace.seed_board(&[&["T1", "T2"]]).await?;
    let todo = seeded.section(0)?;
    let [t1, t2] = <[TaskId; 2]>::try_from(seeded.tasks_of(0)?)?;
    let ghost = TaskId::new();

    let result = workspace
        .state
        .tasks
        .update_positions(
            workspace.admin.as_actor(),
            seeded.board.id(),
            &TaskMove {
                resource_section: todo,
                resource: vec![],
                destination_section: todo,
                destination: vec![t2, ghost, t1],
            },
        )
        .await;

    ensure!(
        matches!(
            result,
            Err(TaskServiceError::Repository(TaskRepositoryError::NotFound(id))) if id == ghost
        ),
        "expected missing task error, got {result:?}"
    );
    let column = workspace.column(seeded.board.id(), todo).await?;
    ensure!(column == dense(&["T1", "T2"]), "order changed: {column:?}");
    Ok(())
}

/// Reorders that leave a task out or pull one in from another section
/// write nothing.
pub async fn reorder_must_match_membership(workspace: &Workspace) -> Result<()> {
    let seeded = workspace
        .seed_board(&[&["T1", "T2", "T3"], &["U1"]])
        .await?;
    let todo = seeded.section(0)?;
    let [t1, _, t3] = <[TaskId; 3]>::try_from(seeded.tasks_of(0)?)?;
    let [u1] = <[TaskId; 1]>::try_from(seeded.tasks_of(1)?)?;
    let within = |destination: Vec<TaskId>| TaskMove {
        resource_section: todo,
        resource: vec![],
        destination_section: todo,
        destination,
    };

    let omitted = workspace
        .state
        .tasks
        .update_positions(workspace.admin.as_actor(), seeded.board.id(), &within(vec![t3, t1]))
        .await;
    ensure!(
        matches!(
            omitted,
            Err(TaskServiceError::Repository(TaskRepositoryError::IncompleteOrder {
                listed: 2,
                present: 3
            }))
        ),
        "expected incomplete order error, got {omitted:?}"
    );

    let foreign = workspace
        .state
        .tasks
        .update_positions(
            workspace.admin.as_actor(),
            seeded.board.id(),
            &within(vec![u1, t3, t1]),
        )
        .await;
    ensure!(
        matches!(
            foreign,
            Err(TaskServiceError::Repository(TaskRepositoryError::ForeignTask(id))) if id == u1
        ),
        "expected foreign task error, got {foreign:?}"
    );

    let column = workspace.column(seeded.board.id(), todo).await?;
    ensure!(column == dense(&["T1", "T2", "T3"]), "order changed: {column:?}");
    let other = workspace.column(seeded.board.id(), seeded.section(1)?).await?;
    ensure!(other == dense(&["U1"]), "other section changed: {other:?}");
    Ok(())
}

/// Creates racing on one section and one sidebar still get dense positions.
pub async fn concurrent_creates_stay_dense(workspace: &Workspace) -> Result<()> {
    let actor = workspace.admin.as_actor();
    let seeded = workspace.seed_board(&[&[]]).await?;
    let (board, todo) = (seeded.board.id(), seeded.section(0)?);

    let tasks = &workspace.state.tasks;
    let add_task = || tasks.create_task(actor, board, CreateTaskRequest::new(todo));
    let (first, second, third, fourth) =
        tokio::join!(add_task(), add_task(), add_task(), add_task());
    for created in [first, second, third, fourth] {
        created?;
    }
    let column: Vec<u32> = workspace
        .column(board, todo)
        .await?
        .into_iter()
        .map(|(_, position)| position)
        .collect();
    ensure!(column == vec![0, 1, 2, 3], "task positions not dense: {column:?}");

    let sections = &workspace.state.sections;
    let add_section = || sections.create_section(actor, board);
    let (first_section, second_section, third_section) =
        tokio::join!(add_section(), add_section(), add_section());
    for created in [first_section, second_section, third_section] {
        created?;
    }
    let detail = workspace.state.boards.board_detail(actor, board).await?;
    let columns: Vec<u32> = detail
        .sections
        .iter()
        .map(|column| column.section.position().value())
        .collect();
    ensure!(columns == vec![0, 1, 2, 3], "section positions not dense: {columns:?}");

    let member = workspace.member.as_actor();
    let boards = &workspace.state.boards;
    let add_board = || boards.create_board(member);
    let (first_board, second_board, third_board) =
        tokio::join!(add_board(), add_board(), add_board());
    for created in [first_board, second_board, third_board] {
        created?;
    }
    let sidebar: Vec<u32> = boards
        .list_boards(member)
        .await?
        .iter()
        .map(|listed| listed.position().value())
        .collect();
    ensure!(sidebar == vec![0, 1, 2], "board positions not dense: {sidebar:?}");
    Ok(())
}

/// Deleting the middle of three tasks leaves `{0, 1}` in order.
pub async fn delete_renumbers_siblings(workspace: &Workspace) -> Result<()> {
    let seeded = workspace.seed_board(&[&["T1", "T2", "T3"]]).await?;
    let todo = seeded.section(0)?;
    let middle = seeded
        .tasks_of(0)?
        .get(1)
        .copied()
        .ok_or_else(|| eyre!("middle task missing"))?;

    workspace
        .state
        .tasks
        .delete_task(workspace.admin.as_actor(), seeded.board.id(), middle)
        .await?;

    let column = workspace.column(seeded.board.id(), todo).await?;
    ensure!(column == dense(&["T1", "T3"]), "unexpected order {column:?}");
    Ok(())
}

/// Reordering the sidebar persists the new board positions.
pub async fn sidebar_reorder(workspace: &Workspace) -> Result<()> {
    let actor = workspace.member.as_actor();
    let boards = &workspace.state.boards;
    let mut ids = Vec::new();
    for _ in 0..3 {
        ids.push(boards.create_board(actor).await?.id());
    }
    ids.reverse();

    boards.reorder_boards(actor, &ids).await?;

    let listed = boards.list_boards(actor).await?;
    let order: Vec<_> = listed.iter().map(|board| board.id()).collect();
    let positions: Vec<u32> = listed.iter().map(|board| board.position().value()).collect();
    ensure!(order == ids, "unexpected sidebar order");
    ensure!(positions == vec![0, 1, 2], "positions not dense: {positions:?}");
    Ok(())
}

/// Deleting a board removes its sections and tasks.
pub async fn board_delete_cascades(workspace: &Workspace) -> Result<()> {
    let actor = workspace.admin.as_actor();
    let seeded = workspace.seed_board(&[&["T1"], &["U1", "U2"]]).await?;

    workspace
        .state
        .boards
        .delete_board(actor, seeded.board.id())
        .await?;

    let detail = workspace
        .state
        .boards
        .board_detail(actor, seeded.board.id())
        .await;
    ensure!(
        matches!(detail, Err(BoardServiceError::BoardNotFound(id)) if id == seeded.board.id()),
        "board still readable"
    );
    let assigned = workspace.state.tasks.assigned_tasks(actor).await?;
    ensure!(assigned.is_empty(), "orphaned tasks listed");
    Ok(())
}
