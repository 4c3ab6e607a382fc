//! Splice-style rearrangement of ordered sequences.

use super::{OrderingError, Position};

/// Returns a copy of `items` with the element at `from` moved to `to`.
///
/// Both indices address the sequence as it is before the move, matching the
/// semantics of a drag within a single list: remove at `from`, then insert at
/// `to` in the shortened list.
///
/// # Errors
///
/// Returns [`OrderingError::IndexOutOfBounds`] when either index does not
/// address an element of `items`.
pub fn reorder<T: Clone>(items: &[T], from: usize, to: usize) -> Result<Vec<T>, OrderingError> {
    let len = items.len();
    for index in [from, to] {
        if index >= len {
            return Err(OrderingError::IndexOutOfBounds { index, len });
        }
    }

    let mut reordered = items.to_vec();
    let moved = reordered.remove(from);
    reordered.insert(to, moved);
    Ok(reordered)
}

/// Moves the element at `from` in `source` to index `to` in `destination`.
///
/// Returns the shortened source list and the extended destination list.
/// `to` may equal `destination.len()` to append.
///
/// # Errors
///
/// Returns [`OrderingError::IndexOutOfBounds`] when `from` is outside
/// `source` or `to` is past the end of `destination`.
pub fn move_between<T: Clone>(
    source: &[T],
    destination: &[T],
    from: usize,
    to: usize,
) -> Result<(Vec<T>, Vec<T>), OrderingError> {
    if from >= source.len() {
        return Err(OrderingError::IndexOutOfBounds {
            index: from,
            len: source.len(),
        });
    }
    if to > destination.len() {
        return Err(OrderingError::IndexOutOfBounds {
            index: to,
            len: destination.len(),
        });
    }

    let mut remaining = source.to_vec();
    let moved = remaining.remove(from);
    let mut extended = destination.to_vec();
    extended.insert(to, moved);
    Ok((remaining, extended))
}

/// Returns `true` when `positions` is a permutation of `0..positions.len()`.
#[must_use]
pub fn is_dense(positions: &[Position]) -> bool {
    let mut sorted: Vec<u32> = positions.iter().map(|position| position.value()).collect();
    sorted.sort_unstable();
    sorted
        .iter()
        .enumerate()
        .all(|(index, value)| u32::try_from(index).is_ok_and(|expected| expected == *value))
}
