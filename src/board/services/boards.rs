//! Board orchestration: sidebar ordering, detail views, and cascading delete.

use super::{BoardServiceError, BoardServiceResult};
use crate::board::{
    domain::{Board, BoardChanges, BoardId, Section},
    ports::{BoardRepository, SectionRepository},
};
use crate::ordering::{Position, PositionPlan};
use crate::task::{domain::Task, ports::TaskRepository};
use crate::user::domain::Actor;
use mockable::Clock;
use std::sync::Arc;
use tracing::{debug, info};

/// A board with its ordered sections and their ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardDetail {
    /// The board itself.
    pub board: Board,
    /// Sections ordered by position.
    pub sections: Vec<SectionDetail>,
}

/// A section with its ordered tasks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionDetail {
    /// The section itself.
    pub section: Section,
    /// Tasks ordered by position.
    pub tasks: Vec<Task>,
}

/// Board orchestration service.
pub struct BoardService<B, S, T, C>
where
    B: BoardRepository + ?Sized,
    S: SectionRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    boards: Arc<B>,
    sections: Arc<S>,
    tasks: Arc<T>,
    clock: Arc<C>,
}

impl<B, S, T, C> Clone for BoardService<B, S, T, C>
where
    B: BoardRepository + ?Sized,
    S: SectionRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    fn clone(&self) -> Self {
        Self {
            boards: Arc::clone(&self.boards),
            sections: Arc::clone(&self.sections),
            tasks: Arc::clone(&self.tasks),
            clock: Arc::clone(&self.clock),
        }
    }
}

impl<B, S, T, C> BoardService<B, S, T, C>
where
    B: BoardRepository + ?Sized,
    S: SectionRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new board service.
    #[must_use]
    pub const fn new(boards: Arc<B>, sections: Arc<S>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            boards,
            sections,
            tasks,
            clock,
        }
    }

    /// Creates a board with default fields at the end of the caller's
    /// sidebar.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when the sidebar is full or
    /// persistence fails.
    pub async fn create_board(&self, actor: Actor) -> BoardServiceResult<Board> {
        let draft = Board::new(actor.id(), Position::FIRST, &*self.clock);
        let board = self.boards.append(draft).await?;
        info!(
            board_id = %board.id(),
            owner = %actor.id(),
            position = %board.position(),
            "created board"
        );
        Ok(board)
    }

    /// Returns the caller's boards in sidebar order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when lookup fails.
    pub async fn list_boards(&self, actor: Actor) -> BoardServiceResult<Vec<Board>> {
        let boards = self.boards.list_by_owner(actor.id()).await?;
        debug!(owner = %actor.id(), count = boards.len(), "listed boards");
        Ok(boards)
    }

    /// Returns the caller's favourite boards in sidebar order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Repository`] when lookup fails.
    pub async fn list_favourites(&self, actor: Actor) -> BoardServiceResult<Vec<Board>> {
        let boards = self.boards.list_by_owner(actor.id()).await?;
        Ok(boards.into_iter().filter(Board::favourite).collect())
    }

    /// Returns a board with its sections and tasks, both in position order.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`],
    /// [`BoardServiceError::Forbidden`], or a repository error.
    pub async fn board_detail(
        &self,
        actor: Actor,
        id: BoardId,
    ) -> BoardServiceResult<BoardDetail> {
        let board = self.accessible_board(actor, id).await?;
        let sections = self.sections.list_by_board(id).await?;
        let mut details = Vec::with_capacity(sections.len());
        for section in sections {
            let tasks = self.tasks.list_by_section(section.id()).await?;
            details.push(SectionDetail { section, tasks });
        }
        Ok(BoardDetail {
            board,
            sections: details,
        })
    }

    /// Applies a partial update to a board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`],
    /// [`BoardServiceError::Forbidden`], [`BoardServiceError::Domain`] for an
    /// invalid icon, or a repository error.
    pub async fn update_board(
        &self,
        actor: Actor,
        id: BoardId,
        changes: BoardChanges,
    ) -> BoardServiceResult<Board> {
        let mut board = self.accessible_board(actor, id).await?;
        board.apply(changes, &*self.clock)?;
        self.boards.update(&board).await?;
        info!(board_id = %id, "updated board");
        Ok(board)
    }

    /// Deletes a board with its sections and tasks. The repository closes the
    /// gap in the owner's sidebar.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`],
    /// [`BoardServiceError::Forbidden`], or a repository error.
    pub async fn delete_board(&self, actor: Actor, id: BoardId) -> BoardServiceResult<()> {
        let board = self.accessible_board(actor, id).await?;
        let mut removed_tasks = 0_u64;
        let sections = self.sections.list_by_board(id).await?;
        for section in &sections {
            removed_tasks += self.tasks.delete_by_section(section.id()).await?;
            self.sections.delete(section.id()).await?;
        }
        self.boards.delete(id).await?;
        info!(
            board_id = %id,
            owner = %board.owner(),
            sections = sections.len(),
            tasks = removed_tasks,
            "deleted board"
        );
        Ok(())
    }

    /// Rewrites the caller's sidebar order to match `ordered`, which must
    /// list every board the caller owns.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Ordering`] for duplicate identifiers,
    /// [`BoardServiceError::BoardNotFound`] for unknown boards,
    /// [`BoardServiceError::Forbidden`] for boards owned by someone else,
    /// [`BoardServiceError::Repository`] when an owned board is left out, or
    /// another repository error. Nothing is written on error.
    pub async fn reorder_boards(
        &self,
        actor: Actor,
        ordered: &[BoardId],
    ) -> BoardServiceResult<()> {
        let plan = PositionPlan::renumber(actor.id(), ordered)?;
        for id in ordered {
            let board = self
                .boards
                .find_by_id(*id)
                .await?
                .ok_or(BoardServiceError::BoardNotFound(*id))?;
            if board.owner() != actor.id() {
                return Err(BoardServiceError::Forbidden(*id));
            }
        }
        self.boards.apply_positions(&plan).await?;
        info!(owner = %actor.id(), count = plan.len(), "reordered boards");
        Ok(())
    }

    async fn accessible_board(&self, actor: Actor, id: BoardId) -> BoardServiceResult<Board> {
        let board = self
            .boards
            .find_by_id(id)
            .await?
            .ok_or(BoardServiceError::BoardNotFound(id))?;
        if !board.is_accessible_by(actor) {
            return Err(BoardServiceError::Forbidden(id));
        }
        Ok(board)
    }
}
