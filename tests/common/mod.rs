//! Shared fixtures for store integration tests.

#![allow(dead_code, unused_imports)]

use std::convert::Infallible;
use std::sync::Arc;

use actionstore::{Message, Store};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

/// Collected props notifications, shared with an `on_props` spy.
pub type SpyProps = Arc<Mutex<Vec<CounterProps>>>;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterState {
    pub count: i64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CounterProps {
    pub value: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
pub enum CounterMessage {
    Add { delta: i64 },
    Reset,
    Deferred { delta: i64 },
}

impl Message for CounterMessage {
    fn action(&self) -> &str {
        match self {
            CounterMessage::Add { .. } => "add",
            CounterMessage::Reset => "reset",
            CounterMessage::Deferred { .. } => "deferred",
        }
    }
}

pub type CounterStore = Store<CounterState, CounterProps, CounterMessage>;

pub fn serialize(state: &CounterState) -> Result<CounterProps, Infallible> {
    Ok(CounterProps {
        value: format!("Count is {}", state.count),
    })
}

/// Counter store with `add` and `reset` registered. `deferred` is left
/// unregistered on purpose, for unknown-action coverage.
pub fn counter_store() -> CounterStore {
    let mut store = CounterStore::new();
    store.set_serializer(serialize);
    store.register("add", add_action);
    store.register(
        "reset",
        |_message: &CounterMessage, store: &mut CounterStore| {
            store.set_state(CounterState { count: 0 })
        },
    );
    store
}

pub fn add_action(
    message: &CounterMessage,
    store: &mut CounterStore,
) -> Result<(), actionstore::StoreError> {
    let delta = match message {
        CounterMessage::Add { delta } | CounterMessage::Deferred { delta } => *delta,
        CounterMessage::Reset => 0,
    };
    let count = store.state().map_or(0, |state| state.count);
    store.set_state(CounterState {
        count: count + delta,
    })
}

/// Spy buffer plus a callback that records every notification into it.
pub fn props_spy() -> (SpyProps, impl FnMut(&CounterProps) + Send + 'static) {
    let buffer: SpyProps = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&buffer);
    (buffer, move |props: &CounterProps| {
        sink.lock().push(props.clone());
    })
}

pub fn values(buffer: &SpyProps) -> Vec<String> {
    buffer
        .lock()
        .iter()
        .map(|props| props.value.clone())
        .collect()
}
