//! Committed/pending pair for optimistic updates.

/// A value with a last-committed state and an optional pending state.
///
/// Readers see the pending state while a write is in flight. A successful
/// write promotes it with [`Optimistic::commit`]; a failed one discards it
/// with [`Optimistic::revert`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Optimistic<T> {
    committed: T,
    pending: Option<T>,
}

impl<T> Optimistic<T> {
    /// Wraps a value known to match the server.
    #[must_use]
    pub const fn new(committed: T) -> Self {
        Self {
            committed,
            pending: None,
        }
    }

    /// Returns the value to render: pending if present, else committed.
    #[must_use]
    pub fn current(&self) -> &T {
        self.pending.as_ref().unwrap_or(&self.committed)
    }

    /// Returns the last value confirmed by the server.
    #[must_use]
    pub const fn committed(&self) -> &T {
        &self.committed
    }

    /// Returns `true` while a write is in flight.
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Replaces the pending value.
    pub fn stage(&mut self, value: T) {
        self.pending = Some(value);
    }

    /// Promotes the pending value. No-op when nothing is pending.
    pub fn commit(&mut self) {
        if let Some(value) = self.pending.take() {
            self.committed = value;
        }
    }

    /// Drops the pending value.
    pub fn revert(&mut self) {
        self.pending = None;
    }

    /// Replaces both states, e.g. after refetching from the server.
    pub fn reset(&mut self, value: T) {
        self.committed = value;
        self.pending = None;
    }
}
