//! `PostgreSQL` adapters for board and section persistence.

mod board_repository;
mod models;
mod schema;
mod section_repository;

pub use board_repository::PostgresBoardRepository;
pub use section_repository::PostgresSectionRepository;

use crate::board::ports::BoardRepositoryError;

impl From<diesel::result::Error> for BoardRepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        Self::persistence(err)
    }
}
