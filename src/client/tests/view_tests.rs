//! Tests for optimistic drops against a mocked API.

use super::{column, drag, titles};
use crate::board::domain::BoardId;
use crate::client::{
    BoardCard, BoardView, ClientError, DropOutcome, MockBoardApi, SidebarView,
};
use crate::user::domain::UserId;
use std::sync::Arc;

fn rejected() -> ClientError {
    ClientError::Status {
        status: 404,
        body: r#"{"message":"Task not found"}"#.to_owned(),
    }
}

fn boards(titles: &[&str]) -> Vec<BoardCard> {
    titles
        .iter()
        .map(|title| BoardCard {
            id: BoardId::new(),
            title: (*title).to_owned(),
            icon: String::new(),
        })
        .collect()
}

#[tokio::test]
async fn accepted_task_drop_is_committed() {
    let board = BoardId::new();
    let columns = vec![column("Todo", &["a", "b"]), column("Done", &["c"])];
    let (todo, done) = (columns[0].id, columns[1].id);
    let mut api = MockBoardApi::new();
    api.expect_update_task_positions()
        .times(1)
        .withf(move |id, update| {
            *id == board
                && update.resource_section_id == todo
                && update.destination_section_id == done
                && update.resource_list.len() == 1
                && update.destination_list.len() == 2
        })
        .returning(|_, _| Ok(()));
    let mut view = BoardView::new(Arc::new(api), board, columns);

    let outcome = view
        .drop_task(&drag((todo, 0), Some((done, 0))))
        .await
        .expect("drop accepted");

    assert_eq!(outcome, DropOutcome::Committed);
    assert!(!view.is_saving());
    assert_eq!(titles(&view.columns()[0]), vec!["b"]);
    assert_eq!(titles(&view.columns()[1]), vec!["a", "c"]);
}

#[tokio::test]
async fn rejected_task_drop_reverts_and_reports() {
    let board = BoardId::new();
    let columns = vec![column("Todo", &["a", "b"]), column("Done", &["c"])];
    let (todo, done) = (columns[0].id, columns[1].id);
    let original = columns.clone();
    let mut api = MockBoardApi::new();
    api.expect_update_task_positions()
        .times(1)
        .returning(|_, _| Err(rejected()));
    let mut view = BoardView::new(Arc::new(api), board, columns);

    let err = view
        .drop_task(&drag((todo, 1), Some((done, 1))))
        .await
        .expect_err("server rejects the order");

    assert!(matches!(err, ClientError::Status { status: 404, .. }));
    assert_eq!(view.columns(), original.as_slice());
}

#[tokio::test]
async fn drop_without_destination_makes_no_call() {
    let columns = vec![column("Todo", &["a"])];
    let todo = columns[0].id;
    let mut view = BoardView::new(Arc::new(MockBoardApi::new()), BoardId::new(), columns);

    let outcome = view
        .drop_task(&drag((todo, 0), None))
        .await
        .expect("nothing to do");

    assert_eq!(outcome, DropOutcome::Ignored);
}

#[tokio::test]
async fn staged_drop_is_visible_until_settled() {
    let columns = vec![column("Todo", &["a", "b", "c"])];
    let todo = columns[0].id;
    let mut view = BoardView::new(Arc::new(MockBoardApi::new()), BoardId::new(), columns);

    let update = view
        .stage_task_drop(&drag((todo, 2), Some((todo, 0))))
        .expect("plan")
        .expect("drop has a destination");

    assert!(view.is_saving());
    assert_eq!(update.destination_list.len(), 3);
    assert_eq!(titles(&view.columns()[0]), vec!["c", "a", "b"]);

    view.settle(Err(rejected())).expect_err("rejection passes through");

    assert!(!view.is_saving());
    assert_eq!(titles(&view.columns()[0]), vec!["a", "b", "c"]);
}

#[tokio::test]
async fn section_drop_sends_new_column_order() {
    let board = BoardId::new();
    let columns = vec![column("Todo", &[]), column("Doing", &[]), column("Done", &[])];
    let expected = vec![columns[2].id, columns[0].id, columns[1].id];
    let mut api = MockBoardApi::new();
    api.expect_update_section_positions()
        .times(1)
        .withf(move |id, sections| *id == board && sections == expected.as_slice())
        .returning(|_, _| Ok(()));
    let mut view = BoardView::new(Arc::new(api), board, columns);

    view.drop_section(&drag((board, 2), Some((board, 0))))
        .await
        .expect("drop accepted");

    let order: Vec<&str> = view.columns().iter().map(|c| c.title.as_str()).collect();
    assert_eq!(order, vec!["Done", "Todo", "Doing"]);
}

#[tokio::test]
async fn rejected_board_drop_restores_sidebar() {
    let owner = UserId::new();
    let initial = boards(&["Work", "Home"]);
    let mut api = MockBoardApi::new();
    api.expect_update_board_positions()
        .times(1)
        .returning(|_| Err(rejected()));
    let mut sidebar = SidebarView::new(Arc::new(api), initial.clone());

    sidebar
        .drop_board(&drag((owner, 0), Some((owner, 1))))
        .await
        .expect_err("server rejects the order");

    assert_eq!(sidebar.boards(), initial.as_slice());
}

#[tokio::test]
async fn accepted_board_drop_is_committed() {
    let owner = UserId::new();
    let initial = boards(&["Work", "Home", "Hobby"]);
    let expected = vec![initial[1].id, initial[2].id, initial[0].id];
    let mut api = MockBoardApi::new();
    api.expect_update_board_positions()
        .times(1)
        .withf(move |ids| ids == expected.as_slice())
        .returning(|_| Ok(()));
    let mut sidebar = SidebarView::new(Arc::new(api), initial);

    sidebar
        .drop_board(&drag((owner, 0), Some((owner, 2))))
        .await
        .expect("drop accepted");

    let order: Vec<&str> = sidebar.boards().iter().map(|b| b.title.as_str()).collect();
    assert_eq!(order, vec!["Home", "Hobby", "Work"]);
}
