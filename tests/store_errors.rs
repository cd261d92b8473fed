mod common;

use common::{counter_store, props_spy, values, CounterMessage, CounterState, CounterStore};

use std::collections::BTreeMap;

use actionstore::{Message, Store, StoreError};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[test]
fn missing_serializer_throws_and_leaves_store_unset() {
    let mut store: CounterStore = Store::new();
    let err = store.set_state(CounterState { count: 1 }).unwrap_err();
    assert!(matches!(err, StoreError::MissingSerializer));
    assert!(store.state().is_none());
    assert!(store.props().is_none());
}

#[test]
fn serializer_failure_leaves_state_untouched() {
    let mut store: CounterStore = Store::new();
    store.set_serializer(|_state: &CounterState| {
        Err::<common::CounterProps, _>(std::io::Error::other("serialize failed"))
    });
    let (spy, callback) = props_spy();
    store.on_props(callback);

    let err = store.set_state(CounterState { count: 1 }).unwrap_err();
    assert!(matches!(err, StoreError::Serialize { .. }));
    assert!(store.state().is_none());
    assert!(store.props().is_none());
    assert!(values(&spy).is_empty());
}

#[test]
fn serializer_failure_keeps_previous_state() {
    let mut store: CounterStore = Store::new();
    store.set_serializer(|state: &CounterState| {
        if state.count > 0 {
            Err(std::io::Error::other("cannot serialize positive counts"))
        } else {
            Ok(common::CounterProps {
                value: format!("Count is {}", state.count),
            })
        }
    });
    store.set_state(CounterState { count: 0 }).unwrap();

    let err = store.set_state(CounterState { count: 1 }).unwrap_err();
    assert!(matches!(err, StoreError::Serialize { .. }));
    assert_eq!(store.state().unwrap().count, 0);
    assert_eq!(store.props().unwrap().value, "Count is 0");
}

/// Placeholder message type for stores that are never dispatched to.
#[allow(dead_code)]
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "lowercase")]
enum Poke {
    Poke,
}

impl Message for Poke {
    fn action(&self) -> &str {
        "poke"
    }
}

#[test]
fn unserializable_props_fail_the_write() {
    // Tuple map keys cannot be represented as JSON object keys.
    let mut store: Store<u8, BTreeMap<(u8, u8), u8>, Poke> = Store::new();
    store.set_serializer(|state: &u8| {
        let mut props = BTreeMap::new();
        props.insert((*state, *state), *state);
        Ok::<_, std::convert::Infallible>(props)
    });
    let err = store.set_state(1).unwrap_err();
    assert!(matches!(err, StoreError::Serialize { .. }));
    assert!(store.state().is_none());
    assert!(store.props().is_none());
}

#[test]
fn unknown_action_throws_and_registered_actions_keep_working() {
    let mut store = counter_store();
    store.set_state(CounterState { count: 0 }).unwrap();

    store.schedule(CounterMessage::Add { delta: 1 }).unwrap();

    let err = store
        .schedule(CounterMessage::Deferred { delta: 1 })
        .unwrap_err();
    assert!(matches!(err, StoreError::UnknownAction(id) if id == "deferred"));
    // The failed dispatch mutated nothing.
    assert_eq!(store.state().unwrap().count, 1);

    store.schedule(CounterMessage::Add { delta: 1 }).unwrap();
    assert_eq!(store.state().unwrap().count, 2);
}

#[test]
fn malformed_transport_payload_throws() {
    let mut store = counter_store();
    assert!(matches!(
        store.on_message(None),
        Err(StoreError::MalformedMessage)
    ));
    assert!(matches!(
        store.on_message(Some(json!(null))),
        Err(StoreError::MalformedMessage)
    ));
    assert!(matches!(
        store.on_message(Some(json!({"delta": 1}))),
        Err(StoreError::MalformedMessage)
    ));
    assert!(store.state().is_none());
}

#[test]
fn handler_error_propagates_verbatim_through_nesting() {
    let mut store = counter_store();
    // `reset` performs a durable write, then a nested dispatch that fails.
    store.register(
        "reset",
        |_message: &CounterMessage, store: &mut CounterStore| {
            store.set_state(CounterState { count: 1 })?;
            store.schedule(CounterMessage::Deferred { delta: 0 })?;
            store.set_state(CounterState { count: 2 })
        },
    );
    store.register(
        "deferred",
        |_message: &CounterMessage, _store: &mut CounterStore| {
            Err(StoreError::handler(std::io::Error::other("boom")))
        },
    );

    let err = store.schedule(CounterMessage::Reset).unwrap_err();
    match err {
        StoreError::Handler(source) => assert_eq!(source.to_string(), "boom"),
        other => panic!("expected Handler, got {other:?}"),
    }
    // Writes made before the failing nested dispatch stay committed.
    assert_eq!(store.state().unwrap().count, 1);
    assert_eq!(store.props().unwrap().value, "Count is 1");
}
