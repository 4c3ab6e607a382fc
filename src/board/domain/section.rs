//! Section entity: an ordered column of tasks on a board.

use super::{BoardId, SectionId};
use crate::ordering::Position;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A named column on a board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    id: SectionId,
    board: BoardId,
    title: String,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedSectionData {
    /// Persisted section identifier.
    pub id: SectionId,
    /// Parent board.
    pub board: BoardId,
    /// Persisted title.
    pub title: String,
    /// Persisted position within the board.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Section {
    /// Creates an untitled section at `position` on `board`.
    #[must_use]
    pub fn new(board: BoardId, position: Position, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: SectionId::new(),
            board,
            title: String::new(),
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a section from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedSectionData) -> Self {
        Self {
            id: data.id,
            board: data.board,
            title: data.title,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the section identifier.
    #[must_use]
    pub const fn id(&self) -> SectionId {
        self.id
    }

    /// Returns the parent board.
    #[must_use]
    pub const fn board(&self) -> BoardId {
        self.board
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the position within the board.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Renames the section.
    pub fn rename(&mut self, title: impl Into<String>, clock: &impl Clock) {
        self.title = title.into();
        self.updated_at = clock.utc();
    }

    /// Moves the section to `position` on `board`.
    pub const fn reposition(&mut self, board: BoardId, position: Position) {
        self.board = board;
        self.position = position;
    }
}
