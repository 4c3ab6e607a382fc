//! Section orchestration: creation, renaming, deletion, and column ordering.

use super::{BoardServiceError, BoardServiceResult};
use crate::board::{
    domain::{Board, BoardId, Section, SectionId},
    ports::{BoardRepository, SectionRepository},
};
use crate::ordering::{Position, PositionPlan};
use crate::task::ports::TaskRepository;
use crate::user::domain::Actor;
use mockable::Clock;
use std::sync::Arc;
use tracing::info;

/// Section orchestration service.
pub struct SectionService<B, S, T, C>
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

impl<B, S, T, C> Clone for SectionService<B, S, T, C>
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

impl<B, S, T, C> SectionService<B, S, T, C>
where
    B: BoardRepository + ?Sized,
    S: SectionRepository + ?Sized,
    T: TaskRepository + ?Sized,
    C: Clock + Send + Sync,
{
    /// Creates a new section service.
    #[must_use]
    pub const fn new(boards: Arc<B>, sections: Arc<S>, tasks: Arc<T>, clock: Arc<C>) -> Self {
        Self {
            boards,
            sections,
            tasks,
            clock,
        }
    }

    /// Appends an untitled section to the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`],
    /// [`BoardServiceError::Forbidden`], or a repository error.
    pub async fn create_section(
        &self,
        actor: Actor,
        board: BoardId,
    ) -> BoardServiceResult<Section> {
        self.accessible_board(actor, board).await?;
        let draft = Section::new(board, Position::FIRST, &*self.clock);
        let section = self.sections.append(draft).await?;
        info!(section_id = %section.id(), board_id = %board, "created section");
        Ok(section)
    }

    /// Renames a section.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`],
    /// [`BoardServiceError::SectionNotFound`],
    /// [`BoardServiceError::Forbidden`], or a repository error.
    pub async fn rename_section(
        &self,
        actor: Actor,
        board: BoardId,
        id: SectionId,
        title: impl Into<String> + Send,
    ) -> BoardServiceResult<Section> {
        self.accessible_board(actor, board).await?;
        let mut section = self.section_on_board(board, id).await?;
        section.rename(title, &*self.clock);
        self.sections.update(&section).await?;
        info!(section_id = %id, "renamed section");
        Ok(section)
    }

    /// Deletes a section with its tasks, then renumbers the board's
    /// remaining sections.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::BoardNotFound`],
    /// [`BoardServiceError::SectionNotFound`],
    /// [`BoardServiceError::Forbidden`], or a repository error.
    pub async fn delete_section(
        &self,
        actor: Actor,
        board: BoardId,
        id: SectionId,
    ) -> BoardServiceResult<()> {
        self.accessible_board(actor, board).await?;
        self.section_on_board(board, id).await?;
        let removed_tasks = self.tasks.delete_by_section(id).await?;
        self.sections.delete(id).await?;
        info!(section_id = %id, board_id = %board, tasks = removed_tasks, "deleted section");
        Ok(())
    }

    /// Rewrites the board's column order to match `ordered`, which must list
    /// every section of the board.
    ///
    /// # Errors
    ///
    /// Returns [`BoardServiceError::Ordering`] for duplicate identifiers,
    /// [`BoardServiceError::SectionNotFound`] for unknown sections,
    /// [`BoardServiceError::SectionOutsideBoard`] for sections on another
    /// board, [`BoardServiceError::Repository`] when a section is left out,
    /// or another repository error. Nothing is written on error.
    pub async fn reorder_sections(
        &self,
        actor: Actor,
        board: BoardId,
        ordered: &[SectionId],
    ) -> BoardServiceResult<()> {
        self.accessible_board(actor, board).await?;
        let plan = PositionPlan::renumber(board, ordered)?;
        for id in ordered {
            let section = self
                .sections
                .find_by_id(*id)
                .await?
                .ok_or(BoardServiceError::SectionNotFound(*id))?;
            if section.board() != board {
                return Err(BoardServiceError::SectionOutsideBoard {
                    section: *id,
                    board,
                });
            }
        }
        self.sections.apply_positions(&plan).await?;
        info!(board_id = %board, count = plan.len(), "reordered sections");
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

    async fn section_on_board(
        &self,
        board: BoardId,
        id: SectionId,
    ) -> BoardServiceResult<Section> {
        self.sections
            .find_by_id(id)
            .await?
            .filter(|section| section.board() == board)
            .ok_or(BoardServiceError::SectionNotFound(id))
    }
}
