//! Message contract for dispatchable actions.

/// A discriminated payload describing a requested state transition.
///
/// Messages are consumed synchronously by a single handler invocation and
/// are not retained by the store. The discriminator returned by
/// [`action`](Message::action) selects the handler; payload fields are
/// whatever the application attaches to the variant.
pub trait Message: Send + 'static {
    /// Action identifier used for registry lookup.
    fn action(&self) -> &str;
}
