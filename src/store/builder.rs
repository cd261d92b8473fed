//! Fluent construction of a fully wired store.

use serde::Serialize;

use super::dispatch::Store;
use super::error::StoreError;
use super::message::Message;

/// Builds a [`Store`] with its serializer, actions, props callback, and
/// optional initial state wired up front.
///
/// [`build`](StoreBuilder::build) validates that a serializer was supplied
/// before anything can write state, and applies the initial state through
/// the normal write protocol so the first notification fires like any other.
pub struct StoreBuilder<S, P, M> {
    store: Store<S, P, M>,
    initial_state: Option<S>,
    has_serializer: bool,
}

impl<S, P, M> Default for StoreBuilder<S, P, M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S, P, M> StoreBuilder<S, P, M> {
    pub fn new() -> Self {
        Self {
            store: Store::new(),
            initial_state: None,
            has_serializer: false,
        }
    }

    pub fn serializer<F, E>(mut self, serializer: F) -> Self
    where
        F: Fn(&S) -> Result<P, E> + Send + 'static,
        E: Into<Box<dyn std::error::Error + Send + Sync>>,
    {
        self.store.set_serializer(serializer);
        self.has_serializer = true;
        self
    }

    pub fn on_props<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&P) + Send + 'static,
    {
        self.store.on_props(callback);
        self
    }

    pub fn action<F>(mut self, id: impl Into<String>, handler: F) -> Self
    where
        F: Fn(&M, &mut Store<S, P, M>) -> Result<(), StoreError> + Send + Sync + 'static,
    {
        self.store.register(id, handler);
        self
    }

    pub fn initial_state(mut self, state: S) -> Self {
        self.initial_state = Some(state);
        self
    }
}

impl<S, P, M> StoreBuilder<S, P, M>
where
    P: Serialize,
    M: Message,
{
    /// Finish the wiring.
    ///
    /// Fails with [`StoreError::MissingSerializer`] when no serializer was
    /// supplied, and with whatever the write protocol reports if applying
    /// the initial state fails.
    pub fn build(self) -> Result<Store<S, P, M>, StoreError> {
        let Self {
            mut store,
            initial_state,
            has_serializer,
        } = self;
        if !has_serializer {
            return Err(StoreError::MissingSerializer);
        }
        if let Some(state) = initial_state {
            store.set_state(state)?;
        }
        Ok(store)
    }
}
