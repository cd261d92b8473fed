//! Cross-thread store adapter.
//!
//! Runs a [`Store`](crate::store::Store) on a dedicated thread and proxies
//! `schedule`/`onprops` across the boundary over mpsc channels. The two
//! sides are fully independent sequential contexts; messages from one side
//! to the other are processed in the order posted.

mod adapter;
mod error;
mod handle;

pub use adapter::StoreWorker;
pub use error::WorkerError;
pub use handle::WorkerHandle;
