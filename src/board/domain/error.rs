//! Error types for board domain validation.

use thiserror::Error;

/// Errors returned while constructing or changing board values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BoardDomainError {
    /// The icon is empty after trimming.
    #[error("board icon must not be empty")]
    EmptyIcon,

    /// The icon exceeds the storage limit.
    #[error("board icon exceeds 32 bytes: {0}")]
    IconTooLong(String),
}
