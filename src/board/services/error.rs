//! Service-level errors shared by board and section operations.

use crate::board::domain::{BoardDomainError, BoardId, SectionId};
use crate::board::ports::BoardRepositoryError;
use crate::ordering::OrderingError;
use crate::task::ports::TaskRepositoryError;
use thiserror::Error;

/// Service-level errors for board and section operations.
#[derive(Debug, Error)]
pub enum BoardServiceError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] BoardDomainError),
    /// The submitted order is invalid.
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    /// The board does not exist.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),
    /// The section does not exist on the addressed board.
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),
    /// A section listed in a reorder belongs to another board.
    #[error("section {section} does not belong to board {board}")]
    SectionOutsideBoard {
        /// Offending section.
        section: SectionId,
        /// Board addressed by the request.
        board: BoardId,
    },
    /// The caller neither owns the board nor is an admin.
    #[error("access denied: not authorized for board {0}")]
    Forbidden(BoardId),
    /// Board or section repository operation failed.
    #[error(transparent)]
    Repository(#[from] BoardRepositoryError),
    /// Cascading task removal failed.
    #[error(transparent)]
    TaskRepository(#[from] TaskRepositoryError),
}

/// Result type for board and section service operations.
pub type BoardServiceResult<T> = Result<T, BoardServiceError>;
