//! In-memory repository for sections.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::{count, lock_error};
use crate::board::{
    domain::{BoardId, Section, SectionId},
    ports::{BoardRepositoryError, BoardRepositoryResult, SectionRepository},
};
use crate::ordering::{Position, PositionPlan};

/// Thread-safe in-memory section repository.
#[derive(Debug, Clone, Default)]
pub struct InMemorySectionRepository {
    sections: Arc<RwLock<HashMap<SectionId, Section>>>,
}

impl InMemorySectionRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SectionRepository for InMemorySectionRepository {
    async fn store(&self, section: &Section) -> BoardRepositoryResult<()> {
        let mut sections = self.sections.write().map_err(lock_error)?;
        sections.insert(section.id(), section.clone());
        Ok(())
    }

    async fn append(&self, mut section: Section) -> BoardRepositoryResult<Section> {
        let mut sections = self.sections.write().map_err(lock_error)?;
        let board = section.board();
        let existing = count(sections.values().filter(|held| held.board() == board).count())?;
        section.reposition(board, Position::append_after(existing)?);
        sections.insert(section.id(), section.clone());
        Ok(section)
    }

    async fn update(&self, section: &Section) -> BoardRepositoryResult<()> {
        let mut sections = self.sections.write().map_err(lock_error)?;
        let slot = sections
            .get_mut(&section.id())
            .ok_or(BoardRepositoryError::SectionNotFound(section.id()))?;
        let mut updated = section.clone();
        updated.reposition(slot.board(), slot.position());
        *slot = updated;
        Ok(())
    }

    async fn find_by_id(&self, id: SectionId) -> BoardRepositoryResult<Option<Section>> {
        let sections = self.sections.read().map_err(lock_error)?;
        Ok(sections.get(&id).cloned())
    }

    async fn list_by_board(&self, board: BoardId) -> BoardRepositoryResult<Vec<Section>> {
        let sections = self.sections.read().map_err(lock_error)?;
        let mut columns: Vec<Section> = sections
            .values()
            .filter(|section| section.board() == board)
            .cloned()
            .collect();
        columns.sort_by_key(Section::position);
        Ok(columns)
    }

    async fn delete(&self, id: SectionId) -> BoardRepositoryResult<()> {
        let mut sections = self.sections.write().map_err(lock_error)?;
        let removed = sections
            .remove(&id)
            .ok_or(BoardRepositoryError::SectionNotFound(id))?;
        let mut columns: Vec<(Position, SectionId)> = sections
            .values()
            .filter(|section| section.board() == removed.board())
            .map(|section| (section.position(), section.id()))
            .collect();
        columns.sort_by_key(|&(position, _)| position);
        for (index, (_, section_id)) in columns.into_iter().enumerate() {
            let position = Position::from_index(index)?;
            if let Some(section) = sections.get_mut(&section_id) {
                section.reposition(removed.board(), position);
            }
        }
        Ok(())
    }

    async fn apply_positions(
        &self,
        plan: &PositionPlan<SectionId, BoardId>,
    ) -> BoardRepositoryResult<()> {
        let mut sections = self.sections.write().map_err(lock_error)?;
        let present = sections
            .values()
            .filter(|section| plan.parents().contains(&section.board()))
            .count();
        plan.verify(|id| sections.get(&id).map(Section::board), present)?;
        for assignment in plan.assignments() {
            if let Some(section) = sections.get_mut(&assignment.id) {
                section.reposition(assignment.parent, assignment.position);
            }
        }
        Ok(())
    }
}
