use std::fmt::Display;
use std::future::Future;
use std::sync::{Arc, Mutex};

use tokio::sync::watch;
use tokio::task::{AbortHandle, JoinHandle};

use super::sequence::Ticketed;
use super::state::FetchState;

/// One independent unit of fetch-lifecycle state.
///
/// `execute` moves the handle to loading, awaits the request and records its
/// outcome. Every call takes the next sequence number; an outcome whose
/// number is no longer the newest is dropped, so a slow stale response can
/// never overwrite a newer one, and `reset` wins over anything still in
/// flight.
///
/// Clones share the same state.
pub struct FetchHandle<T> {
    state: Arc<Ticketed<FetchState<T>>>,
    task: Arc<Mutex<Option<AbortHandle>>>,
}

impl<T> Clone for FetchHandle<T> {
    fn clone(&self) -> Self {
        Self {
            state: Arc::clone(&self.state),
            task: Arc::clone(&self.task),
        }
    }
}

impl<T: Clone + Send + Sync + 'static> Default for FetchHandle<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> FetchHandle<T> {
    pub fn new() -> Self {
        Self {
            state: Arc::new(Ticketed::new(FetchState::idle())),
            task: Arc::new(Mutex::new(None)),
        }
    }

    pub fn snapshot(&self) -> FetchState<T> {
        self.state.snapshot()
    }

    /// Observe every transition.
    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    /// Run `request` and record its outcome. Returns the state this call
    /// resolved to; when a newer call or a reset has superseded it, that
    /// state is returned but not stored.
    pub async fn execute<F, E>(&self, request: F) -> FetchState<T>
    where
        F: Future<Output = Result<T, E>>,
        E: Display,
    {
        let ticket = self.state.begin(|s| *s = FetchState::loading());
        let outcome = FetchState::from_result(request.await);
        if !self.state.settle(ticket, |s| *s = outcome.clone()) {
            tracing::debug!(ticket, "discarding superseded fetch result");
        }
        outcome
    }

    /// Run `request` on a background task. Starting another spawned fetch,
    /// or calling [`reset`](Self::reset), aborts this one.
    pub fn spawn<F, E>(&self, request: F) -> JoinHandle<()>
    where
        F: Future<Output = Result<T, E>> + Send + 'static,
        E: Display + Send + 'static,
    {
        let ticket = self.state.begin(|s| *s = FetchState::loading());
        let state = Arc::clone(&self.state);
        let handle = tokio::spawn(async move {
            let outcome = FetchState::from_result(request.await);
            state.settle(ticket, |s| *s = outcome);
        });
        let previous = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .replace(handle.abort_handle());
        if let Some(previous) = previous {
            previous.abort();
        }
        handle
    }

    /// Back to idle, synchronously. Requests still in flight can no longer
    /// write.
    pub fn reset(&self) {
        let running = self
            .task
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();
        if let Some(running) = running {
            running.abort();
        }
        self.state.invalidate(|s| *s = FetchState::idle());
    }
}
