//! Store/dispatcher engine.
//!
//! This module provides the single-threaded core: the state cell, the
//! action registry, and the dispatch loop.
//!
//! - **State**: opaque application model, replaced wholesale on every write
//! - **Props**: JSON-serializable projection of state, compared structurally
//! - **Message**: discriminated payload requesting a state transition
//! - **Handler**: registered function executing one action's logic

mod builder;
mod dispatch;
mod equality;
mod error;
mod message;

pub use builder::StoreBuilder;
pub use dispatch::{Handler, Store};
pub use equality::structural_eq;
pub use error::StoreError;
pub use message::Message;
