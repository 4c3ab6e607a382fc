//! Service-level errors for task operations.

use crate::board::domain::{BoardId, SectionId};
use crate::board::ports::BoardRepositoryError;
use crate::ordering::OrderingError;
use crate::task::domain::TaskId;
use crate::task::ports::TaskRepositoryError;
use crate::user::domain::UserId;
use crate::user::ports::UserRepositoryError;
use thiserror::Error;

/// Service-level errors for task operations.
#[derive(Debug, Error)]
pub enum TaskServiceError {
    /// The submitted order is invalid.
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    /// The board in the request path does not exist.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),
    /// A referenced section does not exist.
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),
    /// A referenced section belongs to another board.
    #[error("section {section} does not belong to board {board}")]
    SectionOutsideBoard {
        /// Offending section.
        section: SectionId,
        /// Board addressed by the request.
        board: BoardId,
    },
    /// The task does not exist on the addressed board.
    #[error("task not found: {0}")]
    TaskNotFound(TaskId),
    /// The requested assignee does not exist.
    #[error("unknown assignee: {0}")]
    UnknownAssignee(UserId),
    /// The caller is neither the task's assignee nor an admin.
    #[error("access denied: not authorized for task {0}")]
    Forbidden(TaskId),
    /// Task repository operation failed.
    #[error(transparent)]
    Repository(#[from] TaskRepositoryError),
    /// Board or section lookup failed.
    #[error(transparent)]
    BoardRepository(#[from] BoardRepositoryError),
    /// Assignee lookup failed.
    #[error(transparent)]
    UserRepository(#[from] UserRepositoryError),
}

/// Result type for task service operations.
pub type TaskServiceResult<T> = Result<T, TaskServiceError>;
