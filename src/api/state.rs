//! Shared handler state: the services behind every route.

use crate::board::{
    adapters::{
        memory::{InMemoryBoardRepository, InMemorySectionRepository},
        postgres::{PostgresBoardRepository, PostgresSectionRepository},
    },
    ports::{BoardRepository, SectionRepository},
    services::{BoardService, SectionService},
};
use crate::persistence::PgPool;
use crate::task::{
    adapters::{memory::InMemoryTaskRepository, postgres::PostgresTaskRepository},
    ports::TaskRepository,
    services::TaskService,
};
use crate::user::{
    adapters::{memory::InMemoryUserRepository, postgres::PostgresUserRepository},
    ports::UserRepository,
    services::UserAccountService,
};
use mockable::DefaultClock;
use std::sync::Arc;

/// User service as wired into the API.
pub type Users = UserAccountService<dyn UserRepository, DefaultClock>;

/// Board service as wired into the API.
pub type Boards =
    BoardService<dyn BoardRepository, dyn SectionRepository, dyn TaskRepository, DefaultClock>;

/// Section service as wired into the API.
pub type Sections =
    SectionService<dyn BoardRepository, dyn SectionRepository, dyn TaskRepository, DefaultClock>;

/// Task service as wired into the API.
pub type Tasks = TaskService<
    dyn BoardRepository,
    dyn SectionRepository,
    dyn TaskRepository,
    dyn UserRepository,
    DefaultClock,
>;

/// One repository per aggregate, all backed by the same store.
#[derive(Clone)]
pub struct Repositories {
    /// User accounts.
    pub users: Arc<dyn UserRepository>,
    /// Boards.
    pub boards: Arc<dyn BoardRepository>,
    /// Sections.
    pub sections: Arc<dyn SectionRepository>,
    /// Tasks.
    pub tasks: Arc<dyn TaskRepository>,
}

impl Repositories {
    /// Process-local repositories; contents are lost on exit.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            users: Arc::new(InMemoryUserRepository::new()),
            boards: Arc::new(InMemoryBoardRepository::new()),
            sections: Arc::new(InMemorySectionRepository::new()),
            tasks: Arc::new(InMemoryTaskRepository::new()),
        }
    }

    /// `PostgreSQL` repositories sharing one pool.
    #[must_use]
    pub fn postgres(pool: &PgPool) -> Self {
        Self {
            users: Arc::new(PostgresUserRepository::new(pool.clone())),
            boards: Arc::new(PostgresBoardRepository::new(pool.clone())),
            sections: Arc::new(PostgresSectionRepository::new(pool.clone())),
            tasks: Arc::new(PostgresTaskRepository::new(pool.clone())),
        }
    }
}

/// Shared application dependencies.
#[derive(Clone)]
pub struct AppState {
    /// User accounts and identity lookup.
    pub users: Users,
    /// Boards and the sidebar.
    pub boards: Boards,
    /// Sections within boards.
    pub sections: Sections,
    /// Tasks within sections.
    pub tasks: Tasks,
    /// Clock for response timestamps.
    pub clock: Arc<DefaultClock>,
}

impl AppState {
    /// Wires every service to `repositories` and the system clock.
    #[must_use]
    pub fn new(repositories: Repositories) -> Self {
        let Repositories {
            users,
            boards,
            sections,
            tasks,
        } = repositories;
        let clock = Arc::new(DefaultClock);
        Self {
            users: UserAccountService::new(Arc::clone(&users), Arc::clone(&clock)),
            boards: BoardService::new(
                Arc::clone(&boards),
                Arc::clone(&sections),
                Arc::clone(&tasks),
                Arc::clone(&clock),
            ),
            sections: SectionService::new(
                Arc::clone(&boards),
                Arc::clone(&sections),
                Arc::clone(&tasks),
                Arc::clone(&clock),
            ),
            tasks: TaskService::new(boards, sections, tasks, users, Arc::clone(&clock)),
            clock,
        }
    }
}
