//! Domain model for boards and sections.

mod board;
mod error;
mod ids;
mod section;

pub use board::{
    Board, BoardChanges, DEFAULT_BOARD_DESCRIPTION, DEFAULT_BOARD_ICON, DEFAULT_BOARD_TITLE,
    PersistedBoardData,
};
pub use error::BoardDomainError;
pub use ids::{BoardId, SectionId};
pub use section::{PersistedSectionData, Section};
