use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

/// State published through a watch channel, where every write that starts
/// a request takes a ticket and only the holder of the newest ticket may
/// settle. The ticket counter is only touched while the channel's write lock
/// is held, so checking and writing cannot interleave with another call.
#[derive(Debug)]
pub(crate) struct Ticketed<S> {
    tx: watch::Sender<S>,
    latest: AtomicU64,
}

impl<S: Clone> Ticketed<S> {
    pub(crate) fn new(initial: S) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self {
            tx,
            latest: AtomicU64::new(0),
        }
    }

    /// Issue a new ticket and apply `start` in the same critical section.
    pub(crate) fn begin(&self, start: impl FnOnce(&mut S)) -> u64 {
        let mut ticket = 0;
        self.tx.send_modify(|state| {
            ticket = self.latest.fetch_add(1, Ordering::SeqCst) + 1;
            start(state);
        });
        ticket
    }

    /// Apply `finish` only if `ticket` is still the newest. Returns whether
    /// the state was written.
    pub(crate) fn settle(&self, ticket: u64, finish: impl FnOnce(&mut S)) -> bool {
        self.tx.send_if_modified(|state| {
            if self.latest.load(Ordering::SeqCst) != ticket {
                return false;
            }
            finish(state);
            true
        })
    }

    /// Retire every outstanding ticket and apply `reset`.
    pub(crate) fn invalidate(&self, reset: impl FnOnce(&mut S)) {
        self.tx.send_modify(|state| {
            self.latest.fetch_add(1, Ordering::SeqCst);
            reset(state);
        });
    }

    pub(crate) fn snapshot(&self) -> S {
        self.tx.borrow().clone()
    }

    pub(crate) fn subscribe(&self) -> watch::Receiver<S> {
        self.tx.subscribe()
    }
}
