//! Service orchestration tests for boards.

use std::sync::Arc;

use crate::board::{
    adapters::memory::{InMemoryBoardRepository, InMemorySectionRepository},
    domain::{BoardChanges, BoardId},
    ports::BoardRepositoryError,
    services::{BoardService, BoardServiceError, SectionService},
};
use crate::ordering::Position;
use crate::task::{
    adapters::memory::InMemoryTaskRepository, domain::Task, ports::TaskRepository,
};
use crate::user::domain::{Actor, Role, UserId};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

type Boards = BoardService<
    InMemoryBoardRepository,
    InMemorySectionRepository,
    InMemoryTaskRepository,
    DefaultClock,
>;
type Sections = SectionService<
    InMemoryBoardRepository,
    InMemorySectionRepository,
    InMemoryTaskRepository,
    DefaultClock,
>;

struct Harness {
    boards: Boards,
    sections: Sections,
    tasks: Arc<InMemoryTaskRepository>,
    owner: Actor,
}

#[fixture]
fn harness() -> Harness {
    let board_repo = Arc::new(InMemoryBoardRepository::new());
    let section_repo = Arc::new(InMemorySectionRepository::new());
    let task_repo = Arc::new(InMemoryTaskRepository::new());
    let clock = Arc::new(DefaultClock);
    Harness {
        boards: BoardService::new(
            Arc::clone(&board_repo),
            Arc::clone(&section_repo),
            Arc::clone(&task_repo),
            Arc::clone(&clock),
        ),
        sections: SectionService::new(board_repo, section_repo, Arc::clone(&task_repo), clock),
        tasks: task_repo,
        owner: Actor::new(UserId::new(), Role::Assignee),
    }
}

fn positions(boards: &[crate::board::domain::Board]) -> Vec<u32> {
    boards.iter().map(|board| board.position().value()).collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn boards_are_appended_to_the_sidebar(harness: Harness) {
    for _ in 0..3 {
        harness
            .boards
            .create_board(harness.owner)
            .await
            .expect("board creation should succeed");
    }

    let listed = harness
        .boards
        .list_boards(harness.owner)
        .await
        .expect("listing should succeed");
    assert_eq!(positions(&listed), vec![0, 1, 2]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn favourites_keep_sidebar_order(harness: Harness) {
    let mut ids = Vec::new();
    for _ in 0..3 {
        let board = harness
            .boards
            .create_board(harness.owner)
            .await
            .expect("board creation should succeed");
        ids.push(board.id());
    }
    for id in [ids[2], ids[0]] {
        harness
            .boards
            .update_board(
                harness.owner,
                id,
                BoardChanges {
                    favourite: Some(true),
                    ..BoardChanges::default()
                },
            )
            .await
            .expect("update should succeed");
    }

    let favourites: Vec<BoardId> = harness
        .boards
        .list_favourites(harness.owner)
        .await
        .expect("listing should succeed")
        .iter()
        .map(crate::board::domain::Board::id)
        .collect();
    assert_eq!(favourites, vec![ids[0], ids[2]]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn other_users_cannot_read_a_board(harness: Harness) {
    let board = harness
        .boards
        .create_board(harness.owner)
        .await
        .expect("board creation should succeed");
    let stranger = Actor::new(UserId::new(), Role::Assignee);

    let result = harness.boards.board_detail(stranger, board.id()).await;
    assert!(matches!(result, Err(BoardServiceError::Forbidden(id)) if id == board.id()));

    let admin = Actor::new(UserId::new(), Role::Admin);
    harness
        .boards
        .board_detail(admin, board.id())
        .await
        .expect("admins may read any board");
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn board_detail_orders_sections_and_tasks(harness: Harness) {
    let board = harness
        .boards
        .create_board(harness.owner)
        .await
        .expect("board creation should succeed");
    let first = harness
        .sections
        .create_section(harness.owner, board.id())
        .await
        .expect("section creation should succeed");
    let second = harness
        .sections
        .create_section(harness.owner, board.id())
        .await
        .expect("section creation should succeed");
    for index in [1_u32, 0] {
        let task = Task::new(second.id(), Position::new(index), None, &DefaultClock);
        harness.tasks.store(&task).await.expect("store task");
    }

    let detail = harness
        .boards
        .board_detail(harness.owner, board.id())
        .await
        .expect("detail should load");

    let section_ids: Vec<_> = detail.sections.iter().map(|s| s.section.id()).collect();
    assert_eq!(section_ids, vec![first.id(), second.id()]);
    let task_positions: Vec<u32> = detail.sections[1]
        .tasks
        .iter()
        .map(|task| task.position().value())
        .collect();
    assert_eq!(task_positions, vec![0, 1]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn deleting_a_board_cascades_and_renumbers(harness: Harness) {
    let mut ids = Vec::new();
    for _ in 0..3 {
        let board = harness
            .boards
            .create_board(harness.owner)
            .await
            .expect("board creation should succeed");
        ids.push(board.id());
    }
    let section = harness
        .sections
        .create_section(harness.owner, ids[1])
        .await
        .expect("section creation should succeed");
    let task = Task::new(section.id(), Position::FIRST, None, &DefaultClock);
    harness.tasks.store(&task).await.expect("store task");

    harness
        .boards
        .delete_board(harness.owner, ids[1])
        .await
        .expect("delete should succeed");

    let remaining = harness
        .boards
        .list_boards(harness.owner)
        .await
        .expect("listing should succeed");
    let remaining_ids: Vec<BoardId> = remaining.iter().map(|board| board.id()).collect();
    assert_eq!(remaining_ids, vec![ids[0], ids[2]]);
    assert_eq!(positions(&remaining), vec![0, 1]);
    assert_eq!(
        harness.tasks.find_by_id(task.id()).await.expect("lookup"),
        None
    );
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_boards_rewrites_positions(harness: Harness) {
    let mut ids = Vec::new();
    for _ in 0..3 {
        let board = harness
            .boards
            .create_board(harness.owner)
            .await
            .expect("board creation should succeed");
        ids.push(board.id());
    }
    let reordered = vec![ids[2], ids[0], ids[1]];

    harness
        .boards
        .reorder_boards(harness.owner, &reordered)
        .await
        .expect("reorder should succeed");

    let listed: Vec<BoardId> = harness
        .boards
        .list_boards(harness.owner)
        .await
        .expect("listing should succeed")
        .iter()
        .map(|board| board.id())
        .collect();
    assert_eq!(listed, reordered);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_boards_rejects_foreign_boards(harness: Harness) {
    let mine = harness
        .boards
        .create_board(harness.owner)
        .await
        .expect("board creation should succeed");
    let stranger = Actor::new(UserId::new(), Role::Assignee);
    let theirs = harness
        .boards
        .create_board(stranger)
        .await
        .expect("board creation should succeed");

    let result = harness
        .boards
        .reorder_boards(harness.owner, &[theirs.id(), mine.id()])
        .await;

    assert!(matches!(result, Err(BoardServiceError::Forbidden(id)) if id == theirs.id()));
    let untouched = harness
        .boards
        .list_boards(stranger)
        .await
        .expect("listing should succeed");
    assert_eq!(positions(&untouched), vec![0]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_boards_rejects_duplicates(harness: Harness) {
    let board = harness
        .boards
        .create_board(harness.owner)
        .await
        .expect("board creation should succeed");

    let result = harness
        .boards
        .reorder_boards(harness.owner, &[board.id(), board.id()])
        .await;
    assert!(matches!(result, Err(BoardServiceError::Ordering(_))));
}

#[rstest]
#[case::omits_a_board(&[2, 0])]
#[case::single_board(&[1])]
#[case::empty_list(&[])]
#[tokio::test(flavor = "multi_thread")]
async fn reorder_boards_requires_the_whole_sidebar(harness: Harness, #[case] picks: &[usize]) {
    let mut ids = Vec::new();
    for _ in 0..3 {
        let board = harness
            .boards
            .create_board(harness.owner)
            .await
            .expect("board creation should succeed");
        ids.push(board.id());
    }
    let partial: Vec<BoardId> = picks.iter().filter_map(|&pick| ids.get(pick).copied()).collect();

    let result = harness.boards.reorder_boards(harness.owner, &partial).await;

    assert!(matches!(
        result,
        Err(BoardServiceError::Repository(BoardRepositoryError::IncompleteOrder { present: 3, .. }))
    ));
    let listed = harness
        .boards
        .list_boards(harness.owner)
        .await
        .expect("listing should succeed");
    assert_eq!(listed.iter().map(|board| board.id()).collect::<Vec<_>>(), ids);
    assert_eq!(positions(&listed), vec![0, 1, 2]);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn concurrent_board_creates_get_distinct_positions(harness: Harness) {
    let mut creates = tokio::task::JoinSet::new();
    for _ in 0..8 {
        let boards = harness.boards.clone();
        let owner = harness.owner;
        creates.spawn(async move { boards.create_board(owner).await });
    }
    while let Some(joined) = creates.join_next().await {
        joined.expect("create task should join").expect("create should succeed");
    }

    let listed = harness
        .boards
        .list_boards(harness.owner)
        .await
        .expect("listing should succeed");
    assert_eq!(positions(&listed), (0..8).collect::<Vec<u32>>());
}
