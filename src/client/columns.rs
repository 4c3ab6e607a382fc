//! Local mirrors of server lists.

use crate::board::domain::{BoardId, SectionId};
use crate::task::domain::TaskId;
use serde::Deserialize;

/// A task as shown on a board column.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TaskCard {
    /// Task identifier.
    pub id: TaskId,
    /// Title.
    #[serde(default)]
    pub title: String,
}

/// A section and its tasks in display order.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Column {
    /// Section identifier.
    pub id: SectionId,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Tasks in display order.
    #[serde(default)]
    pub tasks: Vec<TaskCard>,
}

impl Column {
    /// Returns the task identifiers in display order.
    #[must_use]
    pub fn task_ids(&self) -> Vec<TaskId> {
        self.tasks.iter().map(|task| task.id).collect()
    }
}

/// A board as shown in the sidebar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct BoardCard {
    /// Board identifier.
    pub id: BoardId,
    /// Title.
    #[serde(default)]
    pub title: String,
    /// Icon.
    #[serde(default)]
    pub icon: String,
}
