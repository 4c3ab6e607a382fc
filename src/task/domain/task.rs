//! Task aggregate root.

use super::TaskId;
use crate::board::domain::SectionId;
use crate::ordering::Position;
use crate::user::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// Task aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    id: TaskId,
    section: SectionId,
    title: String,
    content: String,
    position: Position,
    assignee: Option<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTaskData {
    /// Persisted task identifier.
    pub id: TaskId,
    /// Parent section.
    pub section: SectionId,
    /// Persisted title.
    pub title: String,
    /// Persisted rich-text content.
    pub content: String,
    /// Persisted position within the section.
    pub position: Position,
    /// Persisted assignee, if any.
    pub assignee: Option<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Partial update applied to a task.
///
/// `assignee` distinguishes "leave unchanged" (`None`) from "clear"
/// (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskChanges {
    /// New title.
    pub title: Option<String>,
    /// New content.
    pub content: Option<String>,
    /// New assignee.
    pub assignee: Option<Option<UserId>>,
}

impl TaskChanges {
    /// Returns `true` when no field would change.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.title.is_none() && self.content.is_none() && self.assignee.is_none()
    }

    /// Drops the assignee change, keeping every other field.
    #[must_use]
    pub fn without_assignee(self) -> Self {
        Self {
            assignee: None,
            ..self
        }
    }
}

impl Task {
    /// Creates an empty task appended at `position` in `section`.
    #[must_use]
    pub fn new(
        section: SectionId,
        position: Position,
        assignee: Option<UserId>,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TaskId::new(),
            section,
            title: String::new(),
            content: String::new(),
            position,
            assignee,
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a task from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTaskData) -> Self {
        Self {
            id: data.id,
            section: data.section,
            title: data.title,
            content: data.content,
            position: data.position,
            assignee: data.assignee,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the task identifier.
    #[must_use]
    pub const fn id(&self) -> TaskId {
        self.id
    }

    /// Returns the parent section.
    #[must_use]
    pub const fn section(&self) -> SectionId {
        self.section
    }

    /// Returns the title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the content.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Returns the position within the section.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.position
    }

    /// Returns the assignee.
    #[must_use]
    pub const fn assignee(&self) -> Option<UserId> {
        self.assignee
    }

    /// Returns `true` when `user` is the task's assignee.
    #[must_use]
    pub fn is_assigned_to(&self, user: UserId) -> bool {
        self.assignee == Some(user)
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

    /// Applies a partial update. Empty changes leave the timestamp untouched.
    pub fn apply(&mut self, changes: TaskChanges, clock: &impl Clock) {
        if changes.is_empty() {
            return;
        }
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        if let Some(assignee) = changes.assignee {
            self.assignee = assignee;
        }
        self.updated_at = clock.utc();
    }

    /// Moves the task to `position` in `section`.
    pub const fn reposition(&mut self, section: SectionId, position: Position) {
        self.section = section;
        self.position = position;
    }
}
