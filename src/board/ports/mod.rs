//! Port contracts for boards and sections.

pub mod repository;

pub use repository::{
    BoardRepository, BoardRepositoryError, BoardRepositoryResult, SectionRepository,
};
