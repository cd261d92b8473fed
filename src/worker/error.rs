//! Error type for the cross-thread adapter.

use thiserror::Error;

/// Channel-level failures of the worker boundary.
#[derive(Debug, Error)]
pub enum WorkerError {
    /// The worker thread is gone and the message channel is closed.
    #[error("store worker channel disconnected")]
    Disconnected,
}
