//! In-memory board and section adapters.

mod board;
mod section;

pub use board::InMemoryBoardRepository;
pub use section::InMemorySectionRepository;

use crate::board::ports::BoardRepositoryError;

fn lock_error(err: impl ToString) -> BoardRepositoryError {
    BoardRepositoryError::persistence(std::io::Error::other(err.to_string()))
}

fn count(len: usize) -> Result<u64, BoardRepositoryError> {
    u64::try_from(len).map_err(BoardRepositoryError::persistence)
}
