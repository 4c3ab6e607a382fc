//! Board aggregate root.

use super::{BoardDomainError, BoardId};
use crate::ordering::Position;
use crate::user::domain::{Actor, UserId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Title given to newly created boards.
pub const DEFAULT_BOARD_TITLE: &str = "Untitled";

/// Description given to newly created boards.
pub const DEFAULT_BOARD_DESCRIPTION: &str = "Add description here";

/// Icon given to newly created boards.
pub const DEFAULT_BOARD_ICON: &str = "📃";

/// Maximum icon length in bytes, matching the `VARCHAR(32)` column.
const MAX_ICON_BYTES: usize = 32;

/// Board aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    id: BoardId,
    owner: UserId,
    title: String,
    description: String,
    icon: String,
    favourite: bool,
    position: Position,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedBoardData {
    /// Persisted board identifier.
    pub id: BoardId,
    /// Owning user.
    pub owner: UserId,
    /// Persisted title.
    pub title: String,
    /// Persisted description.
    pub description: String,
    /// Persisted icon.
    pub icon: String,
    /// Persisted favourite flag.
    pub favourite: bool,
    /// Persisted sidebar position.
    pub position: Position,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a board. `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardChanges {
    /// New title.
    pub title: Option<String>,
    /// New description.
    pub description: Option<String>,
    /// New icon.
    pub icon: Option<String>,
    /// New favourite flag.
    pub favourite: Option<bool>,
}

impl BoardChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.icon.is_none()
            && self.favourite.is_none()
    }
}

impl Board {
    /// Creates a new board with default title, description, and icon.
    #[must_use]
    pub fn new(owner: UserId, position: Position, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            id: BoardId::new(),
            owner,
            title: DEFAULT_BOARD_TITLE.to_owned(),
            description: DEFAULT_BOARD_DESCRIPTION.to_owned(),
            icon: DEFAULT_BOARD_ICON.to_owned(),
            favourite: false,
            position,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a board from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedBoardData) -> Self {
        Self {
            id: data.id,
            owner: data.owner,
            title: data.title,
            description: data.description,
            icon: data.icon,
            favourite: data.favourite,
            position: data.position,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the board identifier.
    #[must_use]
    pub const fn id(&self) -> BoardId {
        self.id
    }

    /// Returns the owning user.
    #[must_use]
    pub const fn owner(&self) -> UserId {
        self.owner
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the description.
    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Returns the icon.
    #[must_use]
    pub fn icon(&self) -> &str {
        &self.icon
    }

    /// Returns `true` when the board is marked favourite.
    #[must_use]
    pub const fn favourite(&self) -> bool {
        self.favourite
    }

    /// Returns the sidebar position.
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

    /// Returns `true` when `actor` owns the board or is an admin.
    #[must_use]
    pub fn is_accessible_by(&self, actor: Actor) -> bool {
        actor.is_admin() || self.owner == actor.id()
    }

    /// Applies a partial update.
    ///
    /// # Errors
    ///
    /// Returns [`BoardDomainError::EmptyIcon`] or
    /// [`BoardDomainError::IconTooLong`] when the new icon is invalid. The
    /// board is left unchanged on error.
    pub fn apply(
        &mut self,
        changes: BoardChanges,
        clock: &impl Clock,
    ) -> Result<(), BoardDomainError> {
        if changes.is_empty() {
            return Ok(());
        }
        let icon = changes.icon.map(validate_icon).transpose()?;

        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(icon) = icon {
            self.icon = icon;
        }
        if let Some(favourite) = changes.favourite {
            self.favourite = favourite;
        }
        self.updated_at = clock.utc();
        Ok(())
    }

    /// Moves the board to a new sidebar position under `owner`.
    pub const fn reposition(&mut self, owner: UserId, position: Position) {
        self.owner = owner;
        self.position = position;
    }
}

fn validate_icon(icon: String) -> Result<String, BoardDomainError> {
    let trimmed = icon.trim();
    if trimmed.is_empty() {
        return Err(BoardDomainError::EmptyIcon);
    }
    if trimmed.len() > MAX_ICON_BYTES {
        return Err(BoardDomainError::IconTooLong(icon));
    }
    Ok(trimmed.to_owned())
}
