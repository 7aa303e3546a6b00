//! Scoped one-shot timers.
//!
//! A [`DelayedTask`] runs a callback once after a delay unless it is cancelled
//! first. Dropping the handle cancels it, so a timer can never outlive the
//! component that scheduled it.

use std::time::Duration;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

/// Handle to a pending callback.
#[derive(Debug)]
pub struct DelayedTask {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl DelayedTask {
    /// Run `callback` after `delay` on the current tokio runtime.
    pub fn spawn<F>(delay: Duration, callback: F) -> Self
    where
        F: FnOnce() + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let token = cancel.clone();
        let handle = tokio::spawn(async move {
            tokio::select! {
                () = token.cancelled() => {}
                () = tokio::time::sleep(delay) => {
                    if !token.is_cancelled() {
                        callback();
                    }
                }
            }
        });
        Self { cancel, handle }
    }

    pub fn cancel(&self) {
        self.cancel.cancel();
        self.handle.abort();
    }

    /// True once the callback ran or the task was cancelled.
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for DelayedTask {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Holds at most one pending task; scheduling a new one cancels the old.
#[derive(Debug, Default)]
pub struct TaskSlot {
    current: Option<DelayedTask>,
}

impl TaskSlot {
    pub const fn new() -> Self {
        Self { current: None }
    }

    pub fn replace(&mut self, task: DelayedTask) {
        if let Some(old) = self.current.replace(task) {
            old.cancel();
        }
    }

    pub fn cancel(&mut self) {
        if let Some(old) = self.current.take() {
            old.cancel();
        }
    }

    /// Whether a task is scheduled and has not yet fired.
    pub fn is_pending(&self) -> bool {
        self.current.as_ref().is_some_and(|t| !t.is_finished())
    }
}
