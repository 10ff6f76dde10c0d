//! # Event Depot listeners
//!
//! A [`Listener`] observes one named event on an Event Depot. Listeners run
//! synchronously, in registration order, and receive the payload by
//! reference so every listener sees the same value.
//!
//! Returning an error (or panicking) does not stop the dispatch: the depot
//! records the failure and moves on to the next listener.

use crate::{error::BoxError, message::Message};

/// Trait for converting a listener's return value into a result.
///
/// # Default Implementations
///
/// - `()` → `Ok(())`
/// - `Result<(), E>` → Error boxed
pub trait IntoListenerResult {
    /// Convert the value.
    fn into_listener_result(self) -> Result<(), BoxError>;
}

impl IntoListenerResult for () {
    fn into_listener_result(self) -> Result<(), BoxError> {
        Ok(())
    }
}

impl<E> IntoListenerResult for Result<(), E>
where
    E: Into<BoxError>,
{
    fn into_listener_result(self) -> Result<(), BoxError> {
        self.map_err(Into::into)
    }
}

/// A subscriber registered on an Event Depot.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot listen for payloads of type `{P}`",
    label = "missing `Listener<{P}>` implementation",
    note = "Listeners take `&{P}` and return `()` or `Result<(), E>`."
)]
pub trait Listener<P: Message>: Send + Sync + 'static {
    /// Called once per dispatch of the event this listener is registered on.
    fn on_event(&self, payload: &P) -> Result<(), BoxError>;
}

// Blanket impl for closures
impl<P, F, R> Listener<P> for F
where
    P: Message,
    F: Fn(&P) -> R + Send + Sync + 'static,
    R: IntoListenerResult,
{
    fn on_event(&self, payload: &P) -> Result<(), BoxError> {
        (self)(payload).into_listener_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unit_closure_is_ok() {
        let listener = |_: &u64| {};
        assert!(listener.on_event(&1).is_ok());
    }

    #[test]
    fn test_result_closure_boxes_error() {
        let listener = |n: &u64| -> Result<(), String> {
            if *n > 1 { Err("too big".into()) } else { Ok(()) }
        };
        assert!(listener.on_event(&1).is_ok());
        assert_eq!(listener.on_event(&2).unwrap_err().to_string(), "too big");
    }
}
