//! Client-side adapter for a store running on a worker thread.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use parking_lot::Mutex;
use serde::Serialize;

use crate::store::{Message, Store, StoreError};

use super::error::WorkerError;
use super::handle::{Inbound, WorkerHandle};

type OnProps<P> = Arc<Mutex<Option<Box<dyn FnMut(P) + Send>>>>;

/// How often the relay checks for a late-registered callback or shutdown.
const RELAY_POLL: Duration = Duration::from_millis(10);

/// Proxies `schedule` calls to a store on a dedicated worker thread and
/// relays emitted props back to a locally registered callback.
///
/// The adapter performs no equality checking; the store already gated
/// notification on its side before posting. Props are delivered in the
/// order the worker emitted them.
pub struct StoreWorker<P, M> {
    tx: Sender<Inbound<M>>,
    on_props: OnProps<P>,
    shutdown: Arc<AtomicBool>,
    store_thread: Option<JoinHandle<()>>,
    relay_thread: Option<JoinHandle<()>>,
}

impl<P, M> StoreWorker<P, M>
where
    P: Serialize + Clone + Send + 'static,
    M: Message,
{
    /// Start the worker and configure its store.
    ///
    /// `init` runs on the worker thread with a store whose props already
    /// flow back to this adapter, plus a [`WorkerHandle`] for deferred
    /// scheduling. It registers actions, sets the serializer, and may set
    /// the initial state; the resulting notification is relayed like any
    /// other. If `init` fails the worker logs the error and exits, and
    /// later `schedule` calls report [`WorkerError::Disconnected`].
    pub fn spawn<S, F>(init: F) -> Self
    where
        S: Send + 'static,
        F: FnOnce(&mut Store<S, P, M>, WorkerHandle<M>) -> Result<(), StoreError>
            + Send
            + 'static,
    {
        let (message_tx, message_rx) = mpsc::channel::<Inbound<M>>();
        let (props_tx, props_rx) = mpsc::channel::<P>();
        let handle = WorkerHandle::new(message_tx.clone());

        let store_thread = thread::spawn(move || {
            let mut store = Store::<S, P, M>::new();
            store.on_props(move |props: &P| {
                if props_tx.send(props.clone()).is_err() {
                    tracing::debug!("props relay receiver is gone");
                }
            });
            if let Err(err) = init(&mut store, handle) {
                tracing::error!(error = %err, "store worker init failed");
                return;
            }
            while let Ok(inbound) = message_rx.recv() {
                match inbound {
                    Inbound::Message(message) => {
                        // No caller to return to on this side of the boundary.
                        if let Err(err) = store.schedule(message) {
                            tracing::error!(error = %err, "store worker dispatch failed");
                        }
                    }
                    Inbound::Shutdown => break,
                }
            }
        });

        let on_props: OnProps<P> = Arc::new(Mutex::new(None));
        let relay_slot = Arc::clone(&on_props);
        let shutdown = Arc::new(AtomicBool::new(false));
        let relay_shutdown = Arc::clone(&shutdown);

        let relay_thread = thread::spawn(move || {
            'relay: while let Ok(props) = props_rx.recv() {
                // Hold the props until a callback is registered, so
                // notifications emitted during init are not lost.
                loop {
                    {
                        let mut slot = relay_slot.lock();
                        if let Some(callback) = slot.as_mut() {
                            callback(props);
                            break;
                        }
                    }
                    if relay_shutdown.load(Ordering::Relaxed) {
                        tracing::debug!("props dropped; no onprops callback registered");
                        break 'relay;
                    }
                    thread::sleep(RELAY_POLL);
                }
            }
        });

        Self {
            tx: message_tx,
            on_props,
            shutdown,
            store_thread: Some(store_thread),
            relay_thread: Some(relay_thread),
        }
    }

    /// Post one message to the worker, in call order. Does not block and
    /// does not acknowledge receipt.
    pub fn schedule(&self, message: M) -> Result<(), WorkerError> {
        self.tx
            .send(Inbound::Message(message))
            .map_err(|_| WorkerError::Disconnected)
    }

    /// Register the callback invoked for every props payload relayed from
    /// the worker, in receipt order.
    pub fn on_props<F>(&self, callback: F)
    where
        F: FnMut(P) + Send + 'static,
    {
        *self.on_props.lock() = Some(Box::new(callback));
    }
}

impl<P, M> Drop for StoreWorker<P, M> {
    fn drop(&mut self) {
        self.shutdown.store(true, Ordering::Relaxed);
        let _ = self.tx.send(Inbound::Shutdown);
        if let Some(thread) = self.store_thread.take() {
            let _ = thread.join();
        }
        if let Some(thread) = self.relay_thread.take() {
            let _ = thread.join();
        }
    }
}
