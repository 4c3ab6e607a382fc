//! Request and response bodies.
//!
//! Identifiers arrive as strings and are parsed by the handlers so a
//! malformed UUID is reported as a `400` naming the offending field.

use crate::board::domain::{Board, Section};
use crate::board::services::{BoardDetail, SectionDetail};
use crate::task::domain::Task;
use crate::task::services::{AssignedTask, TaskWithSection};
use crate::user::domain::{User, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// An element of a submitted ordered list. Extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OrderedItem {
    /// Item identifier.
    pub id: String,
}

/// Body of `PUT /boards/{board_id}/tasks/update-position`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTaskPositionsRequest {
    /// Remaining order of the section the task left.
    pub resource_list: Vec<OrderedItem>,
    /// New order of the section the task entered.
    pub destination_list: Vec<OrderedItem>,
    /// Section the task left.
    pub resource_section_id: String,
    /// Section the task entered.
    pub destination_section_id: String,
}

/// Body of `POST /boards/{board_id}/tasks`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTaskBody {
    /// Section receiving the task.
    pub section_id: String,
    /// Requested assignee; honoured for admins only.
    #[serde(default)]
    pub assignee: Option<String>,
}

/// Body of `PUT /boards/{board_id}/tasks/{task_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTaskBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New content.
    #[serde(default)]
    pub content: Option<String>,
    /// New assignee; `null` clears it.
    #[serde(default, deserialize_with = "present")]
    pub assignee: Option<Option<String>>,
}

/// Body of `PUT /boards/{board_id}`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBoardBody {
    /// New title.
    #[serde(default)]
    pub title: Option<String>,
    /// New description.
    #[serde(default)]
    pub description: Option<String>,
    /// New icon.
    #[serde(default)]
    pub icon: Option<String>,
    /// New favourite flag.
    #[serde(default)]
    pub favourite: Option<bool>,
}

/// Body of `PUT /boards`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderBoardsBody {
    /// Boards in their new sidebar order.
    pub boards: Vec<OrderedItem>,
}

/// Body of `PUT /boards/{board_id}/sections/update-position`.
#[derive(Debug, Clone, Deserialize)]
pub struct ReorderSectionsBody {
    /// Sections in their new column order.
    pub sections: Vec<OrderedItem>,
}

/// Body of `PUT /boards/{board_id}/sections/{section_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateSectionBody {
    /// New title.
    pub title: String,
}

/// Body of `POST /users`.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateUserBody {
    /// Login name.
    pub username: String,
    /// Role; defaults to `assignee`.
    #[serde(default)]
    pub role: Option<String>,
}

/// Body of `PUT /users/{user_id}`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateUserBody {
    /// New role.
    pub role: String,
}

/// Distinguishes an explicit `null` from an absent field.
fn present<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

/// A user account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    /// User identifier.
    pub id: Uuid,
    /// Login name.
    pub username: String,
    /// Role name.
    pub role: &'static str,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().into_inner(),
            username: user.username().as_str().to_owned(),
            role: user.role().as_str(),
            created_at: user.created_at(),
            updated_at: user.updated_at(),
        }
    }
}

/// A board without its sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardResponse {
    /// Board identifier.
    pub id: Uuid,
    /// Owning user.
    pub owner: Uuid,
    /// Title.
    pub title: String,
    /// Description.
    pub description: String,
    /// Icon.
    pub icon: String,
    /// Favourite flag.
    pub favourite: bool,
    /// Sidebar position.
    pub position: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Board> for BoardResponse {
    fn from(board: &Board) -> Self {
        Self {
            id: board.id().into_inner(),
            owner: board.owner().into_inner(),
            title: board.title().to_owned(),
            description: board.description().to_owned(),
            icon: board.icon().to_owned(),
            favourite: board.favourite(),
            position: board.position().value(),
            created_at: board.created_at(),
            updated_at: board.updated_at(),
        }
    }
}

/// A board with its sections and their tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BoardDetailResponse {
    /// Board fields.
    #[serde(flatten)]
    pub board: BoardResponse,
    /// Sections in column order.
    pub sections: Vec<SectionWithTasksResponse>,
}

impl From<&BoardDetail> for BoardDetailResponse {
    fn from(detail: &BoardDetail) -> Self {
        Self {
            board: BoardResponse::from(&detail.board),
            sections: detail
                .sections
                .iter()
                .map(SectionWithTasksResponse::from)
                .collect(),
        }
    }
}

/// A section without its tasks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SectionResponse {
    /// Section identifier.
    pub id: Uuid,
    /// Parent board.
    pub board: Uuid,
    /// Title.
    pub title: String,
    /// Column position.
    pub position: u32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Section> for SectionResponse {
    fn from(section: &Section) -> Self {
        Self {
            id: section.id().into_inner(),
            board: section.board().into_inner(),
            title: section.title().to_owned(),
            position: section.position().value(),
            created_at: section.created_at(),
            updated_at: section.updated_at(),
        }
    }
}

/// A section with its tasks in position order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectionWithTasksResponse {
    /// Section fields.
    #[serde(flatten)]
    pub section: SectionResponse,
    /// Tasks in position order.
    pub tasks: Vec<TaskResponse>,
}

impl SectionWithTasksResponse {
    /// A freshly created section, which has no tasks yet.
    #[must_use]
    pub fn empty(section: &Section) -> Self {
        Self {
            section: SectionResponse::from(section),
            tasks: Vec::new(),
        }
    }
}

impl From<&SectionDetail> for SectionWithTasksResponse {
    fn from(detail: &SectionDetail) -> Self {
        Self {
            section: SectionResponse::from(&detail.section),
            tasks: detail.tasks.iter().map(TaskResponse::from).collect(),
        }
    }
}

/// Task fields shared by every task representation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaskFields {
    /// Task identifier.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Rich-text content.
    pub content: String,
    /// Position within the section.
    pub position: u32,
    /// Assignee, if any.
    pub assignee: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<&Task> for TaskFields {
    fn from(task: &Task) -> Self {
        Self {
            id: task.id().into_inner(),
            title: task.title().to_owned(),
            content: task.content().to_owned(),
            position: task.position().value(),
            assignee: task.assignee().map(UserId::into_inner),
            created_at: task.created_at(),
            updated_at: task.updated_at(),
        }
    }
}

/// A task referencing its section by identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskResponse {
    /// Task fields.
    #[serde(flatten)]
    pub task: TaskFields,
    /// Parent section.
    pub section: Uuid,
}

impl From<&Task> for TaskResponse {
    fn from(task: &Task) -> Self {
        Self {
            task: TaskFields::from(task),
            section: task.section().into_inner(),
        }
    }
}

/// A task with its section embedded, and its board when listing assigned
/// work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PopulatedTaskResponse {
    /// Task fields.
    #[serde(flatten)]
    pub task: TaskFields,
    /// Parent section.
    pub section: SectionResponse,
    /// The section's board.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub board: Option<BoardResponse>,
}

impl From<&TaskWithSection> for PopulatedTaskResponse {
    fn from(populated: &TaskWithSection) -> Self {
        Self {
            task: TaskFields::from(&populated.task),
            section: SectionResponse::from(&populated.section),
            board: None,
        }
    }
}

impl From<&AssignedTask> for PopulatedTaskResponse {
    fn from(assigned: &AssignedTask) -> Self {
        Self {
            task: TaskFields::from(&assigned.task),
            section: SectionResponse::from(&assigned.section),
            board: Some(BoardResponse::from(&assigned.board)),
        }
    }
}

/// Body of `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusResponse {
    /// Greeting.
    pub message: String,
    /// Always `"online"`.
    pub status: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}

/// Body returned for unknown routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotFoundResponse {
    /// Always `"Not Found"`.
    pub error: String,
    /// Requested path.
    pub path: String,
    /// Server time.
    pub timestamp: DateTime<Utc>,
}
