//! The store: state cell, action registry, and synchronous dispatch.

use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use super::equality::structural_eq;
use super::error::StoreError;
use super::message::Message;

/// Registered action handler.
///
/// Handlers receive the message and a mutable reference to the store, which
/// is how they read state, write state, and schedule further messages.
/// Errors (their own, or those of nested `schedule` calls propagated with
/// `?`) travel unchanged to the original caller.
pub type Handler<S, P, M> =
    Arc<dyn Fn(&M, &mut Store<S, P, M>) -> Result<(), StoreError> + Send + Sync>;

type Serializer<S, P> =
    Box<dyn Fn(&S) -> Result<P, Box<dyn std::error::Error + Send + Sync>> + Send>;

type OnProps<P> = Box<dyn FnMut(&P) + Send>;

/// The owning unit of state, props, and dispatch logic.
///
/// `S` is the application state, `P` the JSON-serializable props projection,
/// `M` the message type. State is unset until the first successful write;
/// props are unset until the first successful serialization.
pub struct Store<S, P, M> {
    state: Option<S>,
    props: Option<P>,
    /// Canonical form of the current props, cached for change detection.
    props_value: Option<Value>,
    serializer: Option<Serializer<S, P>>,
    on_props: Option<OnProps<P>>,
    actions: HashMap<String, Handler<S, P, M>>,
}

impl<S, P, M> Default for Store<S, P, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P, M> Store<S, P, M> {
    pub fn new() -> Self {
        Self {
            state: None,
            props: None,
            props_value: None,
            serializer: None,
            on_props: None,
            actions: HashMap::new(),
        }
    }

    /// Current state, or `None` before the first successful write.
    pub fn state(&self) -> Option<&S> {
        self.state.as_ref()
    }

    /// Current props, or `None` before the first successful write.
    pub fn props(&self) -> Option<&P> {
        self.props.as_ref()
    }

    /// Set the state-to-props serializer. Required before any state write.
    pub fn set_serializer<F, E>(&mut self, serializer: F)
    where
        F: Fn(&S) -> Result<P, E> + Send + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.serializer = Some(Box::new(move |state| serializer(state).map_err(Into::into)));
    }

    /// Set the callback invoked synchronously on every props change.
    pub fn on_props<F>(&mut self, callback: F)
    where
        F: FnMut(&P) + Send + 'static,
    {
        self.on_props = Some(Box::new(callback));
    }

    /// Register a handler for an action identifier. Last registration wins.
    pub fn register<F>(&mut self, id: impl Into<String>, handler: F)
    where
        F: Fn(&M, &mut Store<S, P, M>) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        self.actions.insert(id.into(), Arc::new(handler));
    }

    /// Remove a registered action. No-op if the identifier is unknown.
    pub fn unregister(&mut self, id: &str) {
        self.actions.remove(id);
    }
}

impl<S, P, M> Store<S, P, M>
where
    P: Serialize,
{
    /// Replace the state, re-deriving props and notifying on change.
    ///
    /// The write is transactional on the serialize step: if no serializer is
    /// configured, or the serializer fails, or the props cannot be
    /// canonicalized to JSON, neither state nor props advances and no
    /// notification fires.
    pub fn set_state(&mut self, next: S) -> Result<(), StoreError> {
        let serializer = self.serializer.as_ref().ok_or(StoreError::MissingSerializer)?;
        let candidate = serializer(&next).map_err(StoreError::serialize)?;
        let canonical = serde_json::to_value(&candidate).map_err(StoreError::serialize)?;
        self.state = Some(next);
        self.commit_props(candidate, canonical);
        Ok(())
    }

    /// Store new props and notify, unless they are structurally equal to the
    /// current ones. On an equal commit the stored props are not replaced,
    /// preserving referential stability.
    fn commit_props(&mut self, candidate: P, canonical: Value) {
        let changed = match &self.props_value {
            Some(previous) => !structural_eq(previous, &canonical),
            None => true,
        };
        if !changed {
            tracing::trace!("props unchanged; notification suppressed");
            return;
        }
        self.props = Some(candidate);
        self.props_value = Some(canonical);
        if let Some(callback) = self.on_props.as_mut() {
            if let Some(props) = self.props.as_ref() {
                callback(props);
            }
        }
    }
}

impl<S, P, M> Store<S, P, M>
where
    P: Serialize,
    M: Message,
{
    /// Dispatch a message to its registered handler, synchronously.
    ///
    /// Handlers may call `schedule` again before returning; nested dispatch
    /// completes (or fails) before the invoking handler resumes. There is no
    /// queue and no cycle detection.
    pub fn schedule(&mut self, message: M) -> Result<(), StoreError> {
        let handler = self
            .actions
            .get(message.action())
            .cloned()
            .ok_or_else(|| StoreError::UnknownAction(message.action().to_owned()))?;
        tracing::debug!(action = message.action(), "dispatching");
        handler(&message, self)
    }
}

impl<S, P, M> Store<S, P, M>
where
    P: Serialize,
    M: Message + DeserializeOwned,
{
    /// Transport entry point: validate a raw inbound payload and dispatch it.
    ///
    /// The payload must be a JSON object carrying a string `action` field
    /// naming a registered action; anything else fails, never silently
    /// ignores. Registry membership is checked on the raw discriminator
    /// before decoding, so an unknown action is reported as such rather
    /// than as a decode failure.
    pub fn on_message(&mut self, payload: Option<Value>) -> Result<(), StoreError> {
        let payload = payload.ok_or(StoreError::MalformedMessage)?;
        let action = payload
            .as_object()
            .and_then(|object| object.get("action"))
            .and_then(Value::as_str)
            .ok_or(StoreError::MalformedMessage)?;
        if !self.actions.contains_key(action) {
            return Err(StoreError::UnknownAction(action.to_owned()));
        }
        let message: M =
            serde_json::from_value(payload).map_err(|_| StoreError::MalformedMessage)?;
        self.schedule(message)
    }
}
