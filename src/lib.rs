//! Unidirectional state management with action-keyed dispatch.
//!
//! A [`Store`] owns an application-defined `State`, derives render-ready
//! `Props` from it through a caller-supplied serializer, and notifies a
//! callback only when the derived props actually change. State transitions
//! happen exclusively through registered action handlers, dispatched
//! synchronously by [`Store::schedule`].
//!
//! # Architecture
//!
//! ```text
//! Message ──→ Handler ──→ State ──→ serialize ──→ Props ──→ onprops
//!    ↑                                                        │
//!    └────────────────────── (render / schedule) ─────────────┘
//! ```
//!
//! The [`worker`] module runs the same pipeline on a dedicated thread and
//! relays props back across the boundary, for hosts that keep rendering and
//! state transitions in separate execution contexts.

pub mod store;
pub mod worker;

pub use store::{Message, Store, StoreBuilder, StoreError};
pub use worker::{StoreWorker, WorkerError, WorkerHandle};
