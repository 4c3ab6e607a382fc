//! Diesel row models for board and section persistence.

use super::schema::{boards, sections};
use chrono::{DateTime, Utc};
use diesel::prelude::*;

/// Query result row for board records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = boards)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct BoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Board description.
    pub description: String,
    /// Board icon.
    pub icon: String,
    /// Favourite flag.
    pub favourite: bool,
    /// Sidebar position.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for board records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = boards)]
pub struct NewBoardRow {
    /// Board identifier.
    pub id: uuid::Uuid,
    /// Owning user.
    pub owner_id: uuid::Uuid,
    /// Board title.
    pub title: String,
    /// Board description.
    pub description: String,
    /// Board icon.
    pub icon: String,
    /// Favourite flag.
    pub favourite: bool,
    /// Sidebar position.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Query result row for section records.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = sections)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub struct SectionRow {
    /// Section identifier.
    pub id: uuid::Uuid,
    /// Parent board.
    pub board_id: uuid::Uuid,
    /// Section title.
    pub title: String,
    /// Position within the board.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Insert model for section records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = sections)]
pub struct NewSectionRow {
    /// Section identifier.
    pub id: uuid::Uuid,
    /// Parent board.
    pub board_id: uuid::Uuid,
    /// Section title.
    pub title: String,
    /// Position within the board.
    pub position: i32,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}
