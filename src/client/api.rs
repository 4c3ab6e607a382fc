//! Port for the server calls made by the client.

use super::error::ClientError;
use crate::board::domain::{BoardId, SectionId};
use async_trait::async_trait;
use serde::Serialize;
use uuid::Uuid;

#[cfg(test)]
use mockall::automock;

/// An element of an ordered list sent to the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemRef {
    /// Record identifier.
    pub id: Uuid,
}

/// Body of `PUT /boards/{id}/tasks/update-position`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskPositionUpdate {
    /// Source section contents after the drag.
    pub resource_list: Vec<ItemRef>,
    /// Destination section contents after the drag.
    pub destination_list: Vec<ItemRef>,
    /// Section the task was dragged from.
    pub resource_section_id: SectionId,
    /// Section the task was dropped into.
    pub destination_section_id: SectionId,
}

/// Partial board update sent by the autosave editor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BoardPatch {
    /// New title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Server operations the client performs after local changes.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait BoardApi: Send + Sync {
    /// Persists task order after a drag.
    async fn update_task_positions(
        &self,
        board: BoardId,
        update: &TaskPositionUpdate,
    ) -> Result<(), ClientError>;

    /// Persists the section order of a board.
    async fn update_section_positions(
        &self,
        board: BoardId,
        sections: &[SectionId],
    ) -> Result<(), ClientError>;

    /// Persists the caller's board order.
    async fn update_board_positions(&self, boards: &[BoardId]) -> Result<(), ClientError>;

    /// Saves edited board fields.
    async fn update_board(&self, board: BoardId, patch: &BoardPatch) -> Result<(), ClientError>;
}
