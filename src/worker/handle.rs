//! Worker-side scheduling handle.

use std::sync::mpsc::Sender;
use std::thread;
use std::time::Duration;

use parking_lot::Mutex;

use crate::store::Message;

use super::error::WorkerError;

/// Control messages of the worker loop.
pub(crate) enum Inbound<M> {
    Message(M),
    Shutdown,
}

/// Clonable sender that re-enters the worker loop as a fresh top-level
/// dispatch.
///
/// Handed to the init closure of [`StoreWorker::spawn`]; handlers that need
/// deferred follow-ups capture a clone of it. The sender is mutex-wrapped so
/// handles can live inside registered handlers, which are shared.
///
/// [`StoreWorker::spawn`]: super::StoreWorker::spawn
pub struct WorkerHandle<M> {
    tx: Mutex<Sender<Inbound<M>>>,
}

impl<M> Clone for WorkerHandle<M> {
    fn clone(&self) -> Self {
        Self {
            tx: Mutex::new(self.tx.lock().clone()),
        }
    }
}

impl<M: Message> WorkerHandle<M> {
    pub(crate) fn new(tx: Sender<Inbound<M>>) -> Self {
        Self { tx: Mutex::new(tx) }
    }

    /// Post a message to the worker loop.
    pub fn schedule(&self, message: M) -> Result<(), WorkerError> {
        self.tx
            .lock()
            .send(Inbound::Message(message))
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Post a message after a delay, on a timer thread.
    ///
    /// Fires no earlier than `delay`; ordering relative to other deferred
    /// messages is whatever the host scheduler provides. Delivery failure
    /// after the worker is gone is logged, not returned, since the boundary
    /// has no acknowledgement.
    pub fn schedule_after(&self, message: M, delay: Duration) {
        let tx = self.tx.lock().clone();
        thread::spawn(move || {
            thread::sleep(delay);
            if tx.send(Inbound::Message(message)).is_err() {
                tracing::debug!("deferred message dropped; worker is gone");
            }
        });
    }
}
