//! Repository ports for board and section persistence.

use crate::board::domain::{Board, BoardId, Section, SectionId};
use crate::ordering::{OrderingError, PlanMismatch, PositionPlan};
use crate::user::domain::UserId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for board and section repository operations.
pub type BoardRepositoryResult<T> = Result<T, BoardRepositoryError>;

/// Board persistence contract.
#[async_trait]
pub trait BoardRepository: Send + Sync {
    /// Stores a board exactly as given, position included.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the write fails.
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Stores a new board at the end of its owner's sidebar, atomically with
    /// counting the sidebar. Returns the board with its assigned position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NoFreePosition`] or
    /// [`BoardRepositoryError::Persistence`].
    async fn append(&self, board: Board) -> BoardRepositoryResult<Board>;

    /// Persists changes to an existing board's fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] when the board does not
    /// exist.
    async fn update(&self, board: &Board) -> BoardRepositoryResult<()>;

    /// Finds a board by identifier.
    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>>;

    /// Returns the owner's boards ordered by position.
    async fn list_by_owner(&self, owner: UserId) -> BoardRepositoryResult<Vec<Board>>;

    /// Deletes a board and closes the gap in its owner's sidebar in one
    /// atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] when the board does not
    /// exist.
    async fn delete(&self, id: BoardId) -> BoardRepositoryResult<()>;

    /// Applies every assignment of `plan` atomically.
    ///
    /// The plan must list every board the named owners hold, and nothing
    /// else.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::BoardNotFound`] for a missing board,
    /// [`BoardRepositoryError::ForeignBoard`] for a board of another owner,
    /// or [`BoardRepositoryError::IncompleteOrder`] when a board is left
    /// out. Nothing is written on error.
    async fn apply_positions(
        &self,
        plan: &PositionPlan<BoardId, UserId>,
    ) -> BoardRepositoryResult<()>;
}

/// Section persistence contract.
#[async_trait]
pub trait SectionRepository: Send + Sync {
    /// Stores a section exactly as given, position included.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::Persistence`] when the write fails.
    async fn store(&self, section: &Section) -> BoardRepositoryResult<()>;

    /// Stores a new section at the end of its board, atomically with
    /// counting the board's sections. Returns the section with its assigned
    /// position.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::NoFreePosition`] or
    /// [`BoardRepositoryError::Persistence`].
    async fn append(&self, section: Section) -> BoardRepositoryResult<Section>;

    /// Persists changes to an existing section's fields.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::SectionNotFound`] when the section does
    /// not exist.
    async fn update(&self, section: &Section) -> BoardRepositoryResult<()>;

    /// Finds a section by identifier.
    async fn find_by_id(&self, id: SectionId) -> BoardRepositoryResult<Option<Section>>;

    /// Returns the board's sections ordered by position.
    async fn list_by_board(&self, board: BoardId) -> BoardRepositoryResult<Vec<Section>>;

    /// Deletes a section record and closes the gap among the board's
    /// remaining sections in one atomic step. Tasks are left to the caller.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::SectionNotFound`] when the section does
    /// not exist.
    async fn delete(&self, id: SectionId) -> BoardRepositoryResult<()>;

    /// Applies every assignment of `plan` atomically.
    ///
    /// The plan must list every section the named boards hold, and nothing
    /// else.
    ///
    /// # Errors
    ///
    /// Returns [`BoardRepositoryError::SectionNotFound`] for a missing
    /// section, [`BoardRepositoryError::ForeignSection`] for a section of
    /// another board, or [`BoardRepositoryError::IncompleteOrder`] when a
    /// section is left out. Nothing is written on error.
    async fn apply_positions(
        &self,
        plan: &PositionPlan<SectionId, BoardId>,
    ) -> BoardRepositoryResult<()>;
}

/// Errors returned by board and section repository implementations.
#[derive(Debug, Clone, Error)]
pub enum BoardRepositoryError {
    /// The board was not found.
    #[error("board not found: {0}")]
    BoardNotFound(BoardId),

    /// The section was not found.
    #[error("section not found: {0}")]
    SectionNotFound(SectionId),

    /// A reorder listed a board owned by someone else.
    #[error("board {0} is not in the reordered sidebar")]
    ForeignBoard(BoardId),

    /// A reorder listed a section of another board.
    #[error("section {0} is not on the reordered board")]
    ForeignSection(SectionId),

    /// A reorder omitted records held by the parent it names.
    #[error("reorder lists {listed} items but the parent holds {present}")]
    IncompleteOrder {
        /// Records listed by the reorder.
        listed: usize,
        /// Records currently held by the parent.
        present: usize,
    },

    /// The parent has no free position left.
    #[error(transparent)]
    NoFreePosition(#[from] OrderingError),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl BoardRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}

impl From<PlanMismatch<BoardId>> for BoardRepositoryError {
    fn from(mismatch: PlanMismatch<BoardId>) -> Self {
        match mismatch {
            PlanMismatch::Missing(id) => Self::BoardNotFound(id),
            PlanMismatch::Foreign(id) => Self::ForeignBoard(id),
            PlanMismatch::Incomplete { listed, present } => {
                Self::IncompleteOrder { listed, present }
            }
        }
    }
}

impl From<PlanMismatch<SectionId>> for BoardRepositoryError {
    fn from(mismatch: PlanMismatch<SectionId>) -> Self {
        match mismatch {
            PlanMismatch::Missing(id) => Self::SectionNotFound(id),
            PlanMismatch::Foreign(id) => Self::ForeignSection(id),
            PlanMismatch::Incomplete { listed, present } => {
                Self::IncompleteOrder { listed, present }
            }
        }
    }
}
