//! Zero-based sibling position.

use super::OrderingError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Zero-based index of a record among siblings sharing the same parent.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct Position(u32);

impl Position {
    /// The first slot in a sibling group.
    pub const FIRST: Self = Self(0);

    /// Creates a position from a raw value.
    #[must_use]
    pub const fn new(value: u32) -> Self {
        Self(value)
    }

    /// Returns the position for the element at `index` in a list.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::TooManyItems`] when `index` does not fit the
    /// persisted integer range.
    pub fn from_index(index: usize) -> Result<Self, OrderingError> {
        u32::try_from(index)
            .ok()
            .filter(|value| i32::try_from(*value).is_ok())
            .map(Self)
            .ok_or(OrderingError::TooManyItems(index))
    }

    /// Returns the position that appends after `count` existing siblings.
    ///
    /// # Errors
    ///
    /// Returns [`OrderingError::TooManyItems`] when the sibling group is
    /// already at capacity.
    pub fn append_after(count: u64) -> Result<Self, OrderingError> {
        let index = usize::try_from(count).map_err(|_| OrderingError::TooManyItems(usize::MAX))?;
        Self::from_index(index)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn value(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
