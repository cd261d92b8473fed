//! Error types for the store engine.

use thiserror::Error;

/// Errors surfaced by state writes and message dispatch.
///
/// Every variant is returned synchronously to the immediate caller; the
/// engine never retries, recovers, or logs in place of returning.
#[derive(Debug, Error)]
pub enum StoreError {
    /// State write attempted with no serializer configured.
    #[error("no serializer configured")]
    MissingSerializer,

    /// The serializer failed, or the produced props could not be
    /// canonicalized to JSON. State and props keep their prior values.
    #[error("serialize failed: {source}")]
    Serialize {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Dispatch received a message with no registered handler.
    #[error("unknown action '{0}'")]
    UnknownAction(String),

    /// Transport payload was absent, not an object, or carried no usable
    /// `action` field.
    #[error("message is not an action")]
    MalformedMessage,

    /// Application handler failure, passed through verbatim across nested
    /// dispatch frames.
    #[error(transparent)]
    Handler(Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// Wrap an application error as a handler failure.
    pub fn handler(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Handler(err.into())
    }

    pub(crate) fn serialize(err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> Self {
        StoreError::Serialize { source: err.into() }
    }
}
