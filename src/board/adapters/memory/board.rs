//! In-memory repository for boards.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{count, lock_error};
use crate::board::{
    domain::{Board, BoardId},
    ports::{BoardRepository, BoardRepositoryError, BoardRepositoryResult},
};
use crate::ordering::{Position, PositionPlan};
use crate::user::domain::UserId;

/// Thread-safe in-memory board repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryBoardRepository {
    boards: Arc<RwLock<HashMap<BoardId, Board>>>,
}

impl InMemoryBoardRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BoardRepository for InMemoryBoardRepository {
    async fn store(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut boards = self.boards.write().map_err(lock_error)?;
        boards.insert(board.id(), board.clone());
        Ok(())
    }

    async fn append(&self, mut board: Board) -> BoardRepositoryResult<Board> {
        let mut boards = self.boards.write().map_err(lock_error)?;
        let owner = board.owner();
        let existing = count(boards.values().filter(|held| held.owner() == owner).count())?;
        board.reposition(owner, Position::append_after(existing)?);
        boards.insert(board.id(), board.clone());
        Ok(board)
    }

    async fn update(&self, board: &Board) -> BoardRepositoryResult<()> {
        let mut boards = self.boards.write().map_err(lock_error)?;
        let slot = boards
            .get_mut(&board.id())
            .ok_or(BoardRepositoryError::BoardNotFound(board.id()))?;
        // Position is owned by `apply_positions`.
        let mut updated = board.clone();
        updated.reposition(slot.owner(), slot.position());
        *slot = updated;
        Ok(())
    }

    async fn find_by_id(&self, id: BoardId) -> BoardRepositoryResult<Option<Board>> {
        let boards = self.boards.read().map_err(lock_error)?;
        Ok(boards.get(&id).cloned())
    }

    async fn list_by_owner(&self, owner: UserId) -> BoardRepositoryResult<Vec<Board>> {
        let boards = self.boards.read().map_err(lock_error)?;
        let mut owned: Vec<Board> = boards
            .values()
            .filter(|board| board.owner() == owner)
            .cloned()
            .collect();
        owned.sort_by_key(Board::position);
        Ok(owned)
    }

    async fn delete(&self, id: BoardId) -> BoardRepositoryResult<()> {
        let mut boards = self.boards.write().map_err(lock_error)?;
        let removed = boards
            .remove(&id)
            .ok_or(BoardRepositoryError::BoardNotFound(id))?;
        let mut sidebar: Vec<(Position, BoardId)> = boards
            .values()
            .filter(|board| board.owner() == removed.owner())
            .map(|board| (board.position(), board.id()))
            .collect();
        sidebar.sort_by_key(|&(position, _)| position);
        for (index, (_, board_id)) in sidebar.into_iter().enumerate() {
            let position = Position::from_index(index)?;
            if let Some(board) = boards.get_mut(&board_id) {
                board.reposition(removed.owner(), position);
            }
        }
        Ok(())
    }

    async fn apply_positions(
        &self,
        plan: &PositionPlan<BoardId, UserId>,
    ) -> BoardRepositoryResult<()> {
        let mut boards = self.boards.write().map_err(lock_error)?;
        let present = boards
            .values()
            .filter(|board| plan.parents().contains(&board.owner()))
            .count();
        plan.verify(|id| boards.get(&id).map(Board::owner), present)?;
        for assignment in plan.assignments() {
            if let Some(board) = boards.get_mut(&assignment.id) {
                board.reposition(assignment.parent, assignment.position);
            }
        }
        Ok(())
    }
}
