use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;

/// Runs at most one delayed task at a time: scheduling a new task cancels the pending one,
/// so a burst of triggers collapses into a single run of the last task.
#[derive(Debug)]
pub struct Debouncer {
    window: Duration,
    pending: Mutex<Option<CancellationToken>>,
    tracker: TaskTracker,
}

impl Debouncer {
    pub fn new(window: Duration, tracker: TaskTracker) -> Self {
        Self {
            window,
            pending: Mutex::new(None),
            tracker,
        }
    }

    pub fn window(&self) -> Duration {
        self.window
    }

    /// Must be called from within a Tokio runtime.
    pub fn schedule<F>(&self, task: F)
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let token = CancellationToken::new();
        if let Some(previous) = self.lock().replace(token.clone()) {
            previous.cancel();
        }
        let window = self.window;
        self.tracker.spawn(async move {
            tokio::select! {
                // A cancelled task never runs, even when its window has also elapsed.
                biased;
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(window) => task.await,
            }
        });
    }

    pub fn cancel(&self) {
        if let Some(pending) = self.lock().take() {
            pending.cancel();
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<CancellationToken>> {
        self.pending.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Drop for Debouncer {
    fn drop(&mut self) {
        self.cancel();
    }
}
