//! Shared fixtures for the kanban integration tests.

pub mod scenarios;

use eyre::{Result, WrapErr, eyre};
use kanban::api::{AppState, Repositories};
use kanban::board::domain::{Board, BoardId, Section, SectionId};
use kanban::task::domain::{TaskChanges, TaskId};
use kanban::task::services::{CreateTaskRequest, TaskMove};
use kanban::user::domain::User;
use kanban::user::services::CreateUserRequest;
use uuid::Uuid;

/// Services wired to one store, with an admin and a member account.
pub struct Workspace {
    pub state: AppState,
    pub admin: User,
    pub member: User,
}

/// A board created by [`Workspace::seed_board`].
pub struct Seeded {
    pub board: Board,
    pub sections: Vec<Section>,
    pub tasks: Vec<Vec<TaskId>>,
}

impl Seeded {
    /// Section at `index`.
    pub fn section(&self, index: usize) -> Result<SectionId> {
        self.sections
            .get(index)
            .map(Section::id)
            .ok_or_else(|| eyre!("no section at index {index}"))
    }

    /// Task ids of the section at `index`, in creation order.
    pub fn tasks_of(&self, index: usize) -> Result<&[TaskId]> {
        self.tasks
            .get(index)
            .map(Vec::as_slice)
            .ok_or_else(|| eyre!("no tasks seeded at index {index}"))
    }
}

/// Returns a username that does not collide across test runs.
pub fn unique_name(prefix: &str) -> String {
    format!("{prefix}_{}", Uuid::new_v4().simple())
}

impl Workspace {
    /// Wires services to `repositories` and seeds two accounts.
    pub async fn new(repositories: Repositories) -> Result<Self> {
        let state = AppState::new(repositories);
        let admin = state
            .users
            .ensure_admin(&unique_name("admin"))
            .await
            .wrap_err("seed admin")?;
        let member = state
            .users
            .create_user(
                admin.as_actor(),
                CreateUserRequest::new(unique_name("member")),
            )
            .await
            .wrap_err("seed member")?;
        Ok(Self {
            state,
            admin,
            member,
        })
    }

    /// Creates an admin-owned board with one section per entry in `layout`,
    /// each holding tasks with the given titles.
    pub async fn seed_board(&self, layout: &[&[&str]]) -> Result<Seeded> {
        let actor = self.admin.as_actor();
        let board = self.state.boards.create_board(actor).await?;
        let mut sections = Vec::with_capacity(layout.len());
        let mut tasks = Vec::with_capacity(layout.len());
        for titles in layout {
            let section = self
                .state
                .sections
                .create_section(actor, board.id())
                .await?;
            let mut ids = Vec::with_capacity(titles.len());
            for title in *titles {
                let created = self
                    .state
                    .tasks
                    .create_task(actor, board.id(), CreateTaskRequest::new(section.id()))
                    .await?;
                let changes = TaskChanges {
                    title: Some((*title).to_owned()),
                    ..TaskChanges::default()
                };
                self.state
                    .tasks
                    .update_task(actor, board.id(), created.task.id(), changes)
                    .await?;
                ids.push(created.task.id());
            }
            sections.push(section);
            tasks.push(ids);
        }
        Ok(Seeded {
            board,
            sections,
            tasks,
        })
    }

    /// Titles and positions of a section's tasks in stored order.
    pub async fn column(&self, board: BoardId, section: SectionId) -> Result<Vec<(String, u32)>> {
        let detail = self
            .state
            .boards
            .board_detail(self.admin.as_actor(), board)
            .await?;
        let column = detail
            .sections
            .into_iter()
            .find(|candidate| candidate.section.id() == section)
            .ok_or_else(|| eyre!("section {section} missing from board {board}"))?;
        Ok(column
            .tasks
            .iter()
            .map(|task| (task.title().to_owned(), task.position().value()))
            .collect())
    }

    /// Sends one drag as the admin.
    pub async fn drag(&self, board: BoardId, request: &TaskMove) -> Result<()> {
        self.state
            .tasks
            .update_positions(self.admin.as_actor(), board, request)
            .await
            .wrap_err("update task positions")
    }
}

/// Builds `(title, position)` pairs numbered from zero.
pub fn dense(titles: &[&str]) -> Vec<(String, u32)> {
    titles
        .iter()
        .zip(0_u32..)
        .map(|(title, position)| ((*title).to_owned(), position))
        .collect()
}
