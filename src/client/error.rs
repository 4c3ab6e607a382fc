//! Errors surfaced by client operations.

use crate::board::domain::SectionId;
use crate::ordering::OrderingError;
use thiserror::Error;

/// Errors returned by client-side drag handling and API calls.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The drag referenced an index outside the local lists.
    #[error(transparent)]
    Ordering(#[from] OrderingError),
    /// A drag named a column that is not on the board.
    #[error("section {0} is not on this board")]
    UnknownSection(SectionId),
    /// The request could not be sent or its response read.
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    /// The server answered with a non-success status.
    #[error("server returned {status}: {body}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Response body, as text.
        body: String,
    },
}
