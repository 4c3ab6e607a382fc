//! Shared world state for task reordering BDD scenarios.

use eyre::eyre;
use kanban::api::{AppState, Repositories};
use kanban::board::domain::{BoardId, SectionId};
use kanban::task::domain::TaskId;
use kanban::task::services::{TaskMove, TaskServiceError};
use kanban::user::domain::{Actor, User};
use rstest::fixture;
use std::collections::HashMap;

/// Scenario world for task reordering behaviour tests.
pub struct ReorderWorld {
    pub state: AppState,
    pub admin: Option<User>,
    pub board: Option<BoardId>,
    pub sections: HashMap<String, SectionId>,
    pub tasks: HashMap<String, TaskId>,
    pub last_move: Option<TaskMove>,
    pub last_result: Option<Result<(), TaskServiceError>>,
}

impl ReorderWorld {
    /// Creates a world over an empty in-memory store.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: AppState::new(Repositories::in_memory()),
            admin: None,
            board: None,
            sections: HashMap::new(),
            tasks: HashMap::new(),
            last_move: None,
            last_result: None,
        }
    }

    /// The acting admin.
    pub fn actor(&self) -> Result<Actor, eyre::Report> {
        self.admin
            .as_ref()
            .map(User::as_actor)
            .ok_or_else(|| eyre!("no admin in scenario world"))
    }

    /// The scenario board.
    pub fn board(&self) -> Result<BoardId, eyre::Report> {
        self.board.ok_or_else(|| eyre!("no board in scenario world"))
    }

    /// Looks up a section by its scenario name.
    pub fn section(&self, name: &str) -> Result<SectionId, eyre::Report> {
        self.sections
            .get(name)
            .copied()
            .ok_or_else(|| eyre!("unknown section {name:?}"))
    }

    /// Looks up a task by its title.
    pub fn task(&self, title: &str) -> Result<TaskId, eyre::Report> {
        self.tasks
            .get(title)
            .copied()
            .ok_or_else(|| eyre!("unknown task {title:?}"))
    }

    /// Current task order of a section, as task ids.
    pub fn order(&self, section: &str) -> Result<Vec<TaskId>, eyre::Report> {
        let id = self.section(section)?;
        let detail = run_async(self.state.boards.board_detail(self.actor()?, self.board()?))?;
        let column = detail
            .sections
            .into_iter()
            .find(|candidate| candidate.section.id() == id)
            .ok_or_else(|| eyre!("section {section:?} missing from board"))?;
        Ok(column.tasks.iter().map(|task| task.id()).collect())
    }
}

impl Default for ReorderWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> ReorderWorld {
    ReorderWorld::default()
}

/// Splits a comma-separated list of titles.
pub fn titles(list: &str) -> Vec<&str> {
    list.split(',')
        .map(str::trim)
        .filter(|title| !title.is_empty())
        .collect()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
