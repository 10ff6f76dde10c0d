//! Error signals published on the application's error channel.
//!
//! Expected failures (a missing session, an unknown route) are never thrown
//! across component boundaries. They are turned into an [`ErrorSignal`] and
//! published under [`ErrorSignal::EVENT`] for a message-display component.

use crate::{error::NavigationError, message::Message};
use serde::{Deserialize, Serialize};

/// Classification of an [`ErrorSignal`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignalKind {
    /// Navigation was blocked by the session gate.
    SessionExpired,
    /// Navigation targeted a path with no registered handler.
    RouteNotFound,
    /// A controller's remote request failed with no local fallback.
    RemoteRequestFailed,
    /// An otherwise unhandled runtime failure.
    Uncaught,
}

/// A structured, user-presentable error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorSignal {
    /// Classification used by the display component.
    pub kind: SignalKind,
    /// Short title, e.g. `"Session expired"`.
    pub error: String,
    /// Longer human-readable message.
    pub message: String,
}

impl ErrorSignal {
    /// Event name under which signals are published.
    pub const EVENT: &'static str = "error";

    /// Create a new signal.
    pub fn new(kind: SignalKind, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            error: error.into(),
            message: message.into(),
        }
    }

    /// The signal emitted when the session gate refuses a navigation.
    pub fn session_expired() -> Self {
        Self::new(
            SignalKind::SessionExpired,
            "Session expired",
            "No session cookie found",
        )
    }

    /// The signal emitted by strict routers for unknown paths.
    pub fn route_not_found(path: &str) -> Self {
        Self::new(
            SignalKind::RouteNotFound,
            "Page not found",
            format!("No route registered for {path}"),
        )
    }

    /// A failed remote request.
    pub fn remote_failed(message: impl Into<String>) -> Self {
        Self::new(SignalKind::RemoteRequestFailed, "Request failed", message)
    }

    /// An unhandled runtime failure.
    pub fn uncaught(message: impl Into<String>) -> Self {
        Self::new(SignalKind::Uncaught, "Error", message)
    }
}

impl From<&NavigationError> for ErrorSignal {
    fn from(err: &NavigationError) -> Self {
        match err {
            NavigationError::SessionExpired { .. } => ErrorSignal::session_expired(),
            NavigationError::RouteNotFound(path) => ErrorSignal::route_not_found(path),
            NavigationError::History(_) => ErrorSignal::uncaught(err.to_string()),
            NavigationError::HandlerPanicked(message) => ErrorSignal::uncaught(message.clone()),
        }
    }
}

impl Message for ErrorSignal {}
