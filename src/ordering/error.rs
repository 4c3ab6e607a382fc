//! Errors raised while rearranging ordered sequences.

use thiserror::Error;

/// Errors returned by the pure ordering functions.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OrderingError {
    /// An index does not address an element of the sequence.
    #[error("index {index} is out of bounds for a list of {len} items")]
    IndexOutOfBounds {
        /// The offending index.
        index: usize,
        /// Length of the sequence the index was applied to.
        len: usize,
    },

    /// The same identifier was listed more than once in a single plan.
    #[error("item {0} appears more than once")]
    DuplicateItem(String),

    /// The sequence is longer than a position can express.
    #[error("list of {0} items exceeds the maximum position")]
    TooManyItems(usize),
}
