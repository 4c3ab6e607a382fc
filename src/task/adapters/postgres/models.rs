//! Diesel row models for task persistence.

use super::schema::tasks;
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for task records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = tasks)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct TaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Parent section.
    pub section_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Rich-text content.
    pub content: String,
    /// Position within the section.
    pub position: i32,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for task records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = tasks)]
pub struct NewTaskRow {
    /// Task identifier.
    pub id: uuid::Uuid,
    /// Parent section.
    pub section_id: uuid::Uuid,
    /// Task title.
    pub title: String,
    /// Rich-text content.
    pub content: String,
    /// Position within the section.
    pub position: i32,
    /// Optional assignee.
    pub assignee_id: Option<uuid::Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
