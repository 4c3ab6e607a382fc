//! Keyed trailing-edge debouncing on the tokio timer.

use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::debug;

/// Quiet period before an autosave is sent.
pub const AUTOSAVE_DELAY: Duration = Duration::from_millis(500);

struct Pending {
    handle: JoinHandle<()>,
    started: Arc<AtomicBool>,
}

/// Runs the last task scheduled for a key once the key has been quiet for
/// the configured delay.
///
/// Scheduling again before the delay elapses cancels the earlier task.
/// A task whose delay has already elapsed is left to finish.
pub struct Debouncer<K> {
    delay: Duration,
    pending: HashMap<K, Pending>,
}

impl<K: Eq + Hash> Debouncer<K> {
    /// Creates a debouncer with the given quiet period.
    #[must_use]
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: HashMap::new(),
        }
    }

    /// Schedules `task` for `key`, cancelling any earlier task for the key
    /// that has not started yet.
    ///
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&mut self, key: K, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let delay = self.delay;
        let started = Arc::new(AtomicBool::new(false));
        let flag = Arc::clone(&started);
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            flag.store(true, Ordering::SeqCst);
            task.await;
        });
        if let Some(previous) = self.pending.insert(key, Pending { handle, started }) {
            cancel_if_waiting(&previous);
        }
    }

    /// Cancels the waiting task for `key`. Returns `true` when one was
    /// cancelled before it started.
    pub fn cancel(&mut self, key: &K) -> bool {
        self.pending
            .remove(key)
            .is_some_and(|previous| cancel_if_waiting(&previous))
    }

    /// Number of tasks that have not finished.
    #[must_use]
    pub fn in_flight(&self) -> usize {
        self.pending
            .values()
            .filter(|pending| !pending.handle.is_finished())
            .count()
    }

    /// Waits for every scheduled task, letting each finish its delay.
    pub async fn flush(&mut self) {
        for (_, pending) in self.pending.drain() {
            if let Err(error) = pending.handle.await {
                debug!(%error, "debounced task did not complete");
            }
        }
    }
}

impl<K> Drop for Debouncer<K> {
    fn drop(&mut self) {
        for pending in self.pending.values() {
            cancel_if_waiting(pending);
        }
    }
}

fn cancel_if_waiting(pending: &Pending) -> bool {
    if pending.started.load(Ordering::SeqCst) {
        return false;
    }
    pending.handle.abort();
    true
}
