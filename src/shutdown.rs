//! Lifecycle signalling for the dispatch runtime.
//!
//! A [`ShutdownHandle`] is a cheap, clonable flag shared between a
//! [`Dispatcher`](crate::dispatch::Dispatcher) and its worker task. Hosts
//! embedding the runtime into their own lifecycle management can hold a
//! clone and `wait()` on it.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tokio::sync::Notify;

/// One-way "stop" latch: once signalled, it stays signalled.
#[derive(Clone)]
pub struct ShutdownHandle {
    shutdown: Arc<AtomicBool>,
    notify: Arc<Notify>,
}

impl ShutdownHandle {
    pub fn new() -> Self {
        Self {
            shutdown: Arc::new(AtomicBool::new(false)),
            notify: Arc::new(Notify::new()),
        }
    }

    /// Signal shutdown. Idempotent; only the first call notifies waiters.
    pub fn signal(&self) {
        if !self.shutdown.swap(true, Ordering::SeqCst) {
            tracing::debug!("shutdown signalled");
            self.notify.notify_waiters();
        }
    }

    pub fn is_shutting_down(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Wait until [`signal`](Self::signal) has been called.
    ///
    /// Returns immediately if shutdown was already signalled.
    pub async fn wait(&self) {
        // Subscribe before reading the flag: a signal() landing between the
        // read and the await would otherwise have no subscriber to wake and
        // the notification would be lost.
        let notified = self.notify.notified();
        tokio::pin!(notified);
        notified.as_mut().enable();
        if self.is_shutting_down() {
            return;
        }
        notified.await;
    }
}

impl Default for ShutdownHandle {
    fn default() -> Self {
        Self::new()
    }
}
