//! Repository port for task persistence and ordering.

use crate::board::domain::SectionId;
use crate::ordering::{OrderingError, PlanMismatch, PositionPlan};
use crate::task::domain::{Task, TaskId};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for task repository operations.
pub type TaskRepositoryResult<T> = Result<T, TaskRepositoryError>;

/// Task persistence contract.
#[async_trait]
pub trait TaskRepository: Send + Sync {
    /// Stores a task exactly as given, position included.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::Persistence`] when the write fails.
    async fn store(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Stores a new task at the end of its section.
    ///
    /// Counting the section and inserting happen atomically, so concurrent
    /// appends to one section receive distinct positions. Returns the task
    /// with its assigned position.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::SectionFull`] when no position is left,
    /// or [`TaskRepositoryError::Persistence`] when the write fails.
    async fn append(&self, task: Task) -> TaskRepositoryResult<Task>;

    /// Persists changes to an existing task's title, content, assignee, and
    /// timestamps. Section and position are left to
    /// [`TaskRepository::apply_positions`].
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn update(&self, task: &Task) -> TaskRepositoryResult<()>;

    /// Finds a task by identifier.
    async fn find_by_id(&self, id: TaskId) -> TaskRepositoryResult<Option<Task>>;

    /// Returns the section's tasks ordered by position.
    async fn list_by_section(&self, section: SectionId) -> TaskRepositoryResult<Vec<Task>>;

    /// Returns tasks assigned to `assignee`, most recently updated first.
    async fn list_by_assignee(&self, assignee: UserId) -> TaskRepositoryResult<Vec<Task>>;

    /// Deletes a task and closes the gap in its section in one atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when the task does not exist.
    async fn delete(&self, id: TaskId) -> TaskRepositoryResult<()>;

    /// Deletes every task in `section`, returning how many were removed.
    async fn delete_by_section(&self, section: SectionId) -> TaskRepositoryResult<u64>;

    /// Applies every assignment of `plan` atomically.
    ///
    /// The plan must list every task currently held by the sections it
    /// names, and nothing else.
    ///
    /// # Errors
    ///
    /// Returns [`TaskRepositoryError::NotFound`] when a listed task is
    /// missing, [`TaskRepositoryError::ForeignTask`] when one sits in another
    /// section, or [`TaskRepositoryError::IncompleteOrder`] when a task of
    /// the named sections is left out. Nothing is written on error.
    async fn apply_positions(&self, plan: &PositionPlan<TaskId, SectionId>)
    -> TaskRepositoryResult<()>;
}

/// Errors returned by task repository implementations.
#[derive(Debug, Clone, Error)]
pub enum TaskRepositoryError {
    /// The task was not found.
    #[error("task not found: {0}")]
    NotFound(TaskId),

    /// A reorder listed a task held by a section it does not name.
    #[error("task {0} is not in the reordered sections")]
    ForeignTask(TaskId),

    /// A reorder omitted tasks held by the sections it names.
    #[error("reorder lists {listed} tasks but the sections hold {present}")]
    IncompleteOrder {
        /// Tasks listed by the reorder.
        listed: usize,
        /// Tasks currently held by the named sections.
        present: usize,
    },

    /// The section has no free position left.
    #[error(transparent)]
    SectionFull(#[from] OrderingError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl TaskRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<PlanMismatch<TaskId>> for TaskRepositoryError {
    fn from(mismatch: PlanMismatch<TaskId>) -> Self {
        match mismatch {
            PlanMismatch::Missing(id) => Self::NotFound(id),
            PlanMismatch::Foreign(id) => Self::ForeignTask(id),
            PlanMismatch::Incomplete { listed, present } => {
                Self::IncompleteOrder { listed, present }
            }
        }
    }
}
