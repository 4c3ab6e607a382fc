//! The HTTP client adapter driven against a live server.

mod test_helpers;

use eyre::{Result, WrapErr, ensure, eyre};
use kanban::api::{self, Repositories};
use kanban::board::domain::BoardId;
use kanban::client::{
    BoardCard, BoardEditor, BoardView, ClientError, Column, DragEnd, DragLocation, HttpBoardApi,
    SidebarView, TaskCard,
};
use kanban::user::domain::UserId;
use rstest::rstest;
use std::sync::Arc;
use std::time::Duration;
use test_helpers::{Seeded, Workspace};
use tokio::net::TcpListener;

struct Server {
    workspace: Workspace,
    base_url: String,
}

impl Server {
    async fn start() -> Result<Self> {
        let workspace = Workspace::new(Repositories::in_memory()).await?;
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let app = api::router(workspace.state.clone());
        tokio::spawn(async move { axum::serve(listener, app).await });
        Ok(Self {
            workspace,
            base_url: format!("http://{addr}"),
        })
    }

    fn client(&self, user: UserId) -> Arc<HttpBoardApi> {
        Arc::new(HttpBoardApi::new(
            reqwest::Client::new(),
            self.base_url.clone(),
            user,
        ))
    }

    async fn columns(&self, seeded: &Seeded) -> Result<Vec<Column>> {
        let detail = self
            .workspace
            .state
            .boards
            .board_detail(self.workspace.admin.as_actor(), seeded.board.id())
            .await?;
        Ok(detail
            .sections
            .into_iter()
            .map(|column| Column {
                id: column.section.id(),
                title: column.section.title().to_owned(),
                tasks: column
                    .tasks
                    .iter()
                    .map(|task| TaskCard {
                        id: task.id(),
                        title: task.title().to_owned(),
                    })
                    .collect(),
            })
            .collect())
    }
}

fn titles(column: Option<&Column>) -> Vec<&str> {
    column
        .map(|found| found.tasks.iter().map(|task| task.title.as_str()).collect())
        .unwrap_or_default()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn committed_drop_matches_server_order() -> Result<()> {
    let server = Server::start().await?;
    let seeded = server
        .workspace
        .seed_board(&[&["T1", "T2", "T3"], &["U1"]])
        .await?;
    let (a, b) = (seeded.section(0)?, seeded.section(1)?);
    let api = server.client(server.workspace.admin.id());
    let mut view = BoardView::new(api, seeded.board.id(), server.columns(&seeded).await?);

    view.drop_task(&DragEnd {
        source: DragLocation { parent: a, index: 1 },
        destination: Some(DragLocation { parent: b, index: 0 }),
    })
    .await
    .wrap_err("drop task")?;

    let stored = server.columns(&seeded).await?;
    ensure!(view.columns() == stored.as_slice(), "client and server disagree");
    ensure!(titles(stored.first()) == vec!["T1", "T3"], "source column");
    ensure!(titles(stored.get(1)) == vec!["T2", "U1"], "destination column");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rejected_drop_reverts_local_columns() -> Result<()> {
    let server = Server::start().await?;
    let seeded = server.workspace.seed_board(&[&["T1", "T2"]]).await?;
    let todo = seeded.section(0)?;
    let mut columns = server.columns(&seeded).await?;
    columns
        .first_mut()
        .ok_or_else(|| eyre!("seeded column missing"))?
        .tasks
        .push(TaskCard {
            id: kanban::task::domain::TaskId::new(),
            title: "stale".to_owned(),
        });
    let local = columns.clone();
    let api = server.client(server.workspace.admin.id());
    let mut view = BoardView::new(api, seeded.board.id(), columns);

    let result = view
        .drop_task(&DragEnd {
            source: DragLocation {
                parent: todo,
                index: 2,
            },
            destination: Some(DragLocation {
                parent: todo,
                index: 0,
            }),
        })
        .await;

    ensure!(
        matches!(result, Err(ClientError::Status { status: 404, .. })),
        "expected 404, got {result:?}"
    );
    ensure!(view.columns() == local.as_slice(), "local columns not reverted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn sidebar_reorder_over_http() -> Result<()> {
    let server = Server::start().await?;
    let member = &server.workspace.member;
    let boards = &server.workspace.state.boards;
    let mut cards = Vec::new();
    for _ in 0..2 {
        let board = boards.create_board(member.as_actor()).await?;
        cards.push(BoardCard {
            id: board.id(),
            title: board.title().to_owned(),
            icon: board.icon().to_owned(),
        });
    }
    let expected: Vec<BoardId> = cards.iter().rev().map(|card| card.id).collect();
    let mut sidebar = SidebarView::new(server.client(member.id()), cards);

    sidebar
        .drop_board(&DragEnd {
            source: DragLocation {
                parent: member.id(),
                index: 0,
            },
            destination: Some(DragLocation {
                parent: member.id(),
                index: 1,
            }),
        })
        .await
        .wrap_err("drop board")?;

    let stored: Vec<BoardId> = boards
        .list_boards(member.as_actor())
        .await?
        .iter()
        .map(|board| board.id())
        .collect();
    ensure!(stored == expected, "sidebar order not persisted");
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn autosave_writes_last_title() -> Result<()> {
    let server = Server::start().await?;
    let admin = &server.workspace.admin;
    let board = server
        .workspace
        .state
        .boards
        .create_board(admin.as_actor())
        .await?;
    let mut editor = BoardEditor::with_delay(
        server.client(admin.id()),
        board.id(),
        Duration::from_millis(20),
    );

    editor.edit_title("Road");
    editor.edit_title("Roadmap");
    editor.flush().await;

    let detail = server
        .workspace
        .state
        .boards
        .board_detail(admin.as_actor(), board.id())
        .await?;
    ensure!(
        detail.board.title() == "Roadmap",
        "title was {:?}",
        detail.board.title()
    );
    Ok(())
}
