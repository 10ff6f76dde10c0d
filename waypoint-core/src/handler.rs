//! # Route handlers
//!
//! A route handler receives a [`NavigationRequest`] and either finishes
//! synchronously or hands back a pending future. The router never awaits
//! that future: it is passed to a [`Spawner`] and the navigation returns
//! immediately (fire-and-forget). Overlapping navigations are therefore
//! possible and the last render wins.
//!
//! # Usage Patterns
//!
//! 1. **Synchronous closure**: `|request| { ... }`
//! 2. **Async work**: `|request| HandlerOutcome::pending(async move { ... })`
//! 3. **Struct implementation**: `impl RouteHandler for MyController`

use crate::request::NavigationRequest;
use futures::future::BoxFuture;
use std::{fmt, future::Future};

/// What a handler left behind after its synchronous part ran.
pub enum HandlerOutcome {
    /// All work is complete.
    Done,
    /// Work continues in a future that must be spawned, not awaited.
    Pending(BoxFuture<'static, ()>),
}

impl HandlerOutcome {
    /// Wrap a future as pending work.
    pub fn pending<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        HandlerOutcome::Pending(Box::pin(future))
    }

    /// Whether work is still outstanding.
    pub fn is_pending(&self) -> bool {
        matches!(self, HandlerOutcome::Pending(_))
    }
}

impl fmt::Debug for HandlerOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HandlerOutcome::Done => f.write_str("Done"),
            HandlerOutcome::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

/// Trait for converting a handler's return value into a [`HandlerOutcome`].
///
/// # Default Implementations
///
/// - `()` → `Done`
/// - `HandlerOutcome` → As is
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot be returned from a route handler",
    label = "missing `IntoHandlerOutcome` implementation",
    note = "Return `()` or wrap async work with `HandlerOutcome::pending`."
)]
pub trait IntoHandlerOutcome {
    /// Convert the value.
    fn into_outcome(self) -> HandlerOutcome;
}

impl IntoHandlerOutcome for () {
    fn into_outcome(self) -> HandlerOutcome {
        HandlerOutcome::Done
    }
}

impl IntoHandlerOutcome for HandlerOutcome {
    fn into_outcome(self) -> HandlerOutcome {
        self
    }
}

/// The endpoint registered for a path.
#[diagnostic::on_unimplemented(
    message = "`{Self}` cannot handle navigation requests",
    label = "missing `RouteHandler` implementation",
    note = "Route handlers take a `NavigationRequest` and return `()` or a `HandlerOutcome`."
)]
pub trait RouteHandler: Send + Sync + 'static {
    /// Handle one navigation.
    fn handle(&self, request: NavigationRequest) -> HandlerOutcome;
}

// Blanket impl for closures
impl<F, R> RouteHandler for F
where
    F: Fn(NavigationRequest) -> R + Send + Sync + 'static,
    R: IntoHandlerOutcome,
{
    fn handle(&self, request: NavigationRequest) -> HandlerOutcome {
        (self)(request).into_outcome()
    }
}

/// Runs pending handler work in the background.
///
/// In a browser this is `wasm_bindgen_futures::spawn_local`; natively it can
/// be a tokio runtime or a test queue.
pub trait Spawner: Send + Sync {
    /// Start the future without waiting for it.
    fn spawn(&self, future: BoxFuture<'static, ()>);
}
