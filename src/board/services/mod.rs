//! Application services for boards and sections.

mod boards;
mod error;
mod sections;

pub use boards::{BoardDetail, BoardService, SectionDetail};
pub use error::{BoardServiceError, BoardServiceResult};
pub use sections::SectionService;
