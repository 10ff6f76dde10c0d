//! # waypoint-core
//!
//! Core traits and types for the Waypoint client-side application core.
//!
//! This crate has minimal dependencies and is meant to be imported by
//! browser bindings and controllers that don't need the `waypoint-std`
//! implementations.
//!
//! # Contents
//!
//! - **Requests**: [`NavigationRequest`], [`HistoryState`], [`QueryMode`]
//! - **Handlers**: [`RouteHandler`], [`HandlerOutcome`], [`Spawner`]
//! - **Listeners**: [`Listener`] for Event Depot subscribers
//! - **Signals**: [`ErrorSignal`] published on the error channel
//! - **Collaborators**: [`History`], [`CookieSource`], [`KeyValueStore`],
//!   [`Node`], [`Anchor`], [`TemplateEngine`], [`RestClient`], [`Dialog`]
//!
//! # Error Types
//!
//! - [`WaypointError`] - Top-level error type
//! - [`NavigationError`] - Navigation failures
//! - [`RemoteError`] - REST failures

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

mod dialog;
mod dom;
mod error;
mod handler;
mod host;
mod listener;
mod message;
mod remote;
mod request;
mod signal;
mod template;

// Re-exports
pub use dialog::{Dialog, DialogRequest, Icon};
pub use dom::{Anchor, ClickEvent, ClickListener, Node, ROUTE_BOUND_ATTRIBUTE, ROUTE_LINK_SELECTOR};
pub use error::{
    BoxError, ListenerFailure, NavigationError, RemoteError, StoreError, TemplateError,
    WaypointError,
};
pub use handler::{HandlerOutcome, IntoHandlerOutcome, RouteHandler, Spawner};
pub use host::{CookieSource, History, KeyValueStore};
pub use listener::{IntoListenerResult, Listener};
pub use message::Message;
pub use remote::RestClient;
pub use request::{HistoryState, Location, NavigationRequest, QueryMode};
pub use signal::{ErrorSignal, SignalKind};
pub use template::{RenderFn, TemplateEngine};

/// Re-exported so implementors of [`RestClient`] use the same macro version.
pub use async_trait::async_trait;
