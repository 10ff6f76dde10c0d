//! Error types for Waypoint.
//!
//! This module provides a structured error hierarchy using `thiserror`:
//!
//! - [`WaypointError`] - Top-level error type
//! - [`NavigationError`] - Errors raised while navigating
//! - [`RemoteError`] - Errors from the REST collaborator
//! - [`StoreError`] - Errors from the key-value store
//! - [`TemplateError`] - Errors from template compilation or rendering
//! - [`ListenerFailure`] - A single listener failing during a depot dispatch

use thiserror::Error;

/// A boxed error type for dynamic error handling.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Top-level error type for all Waypoint operations.
#[derive(Error, Debug)]
pub enum WaypointError {
    /// Navigation was refused or could not complete.
    #[error("navigation error: {0}")]
    Navigation(#[from] NavigationError),

    /// A remote request failed.
    #[error("remote error: {0}")]
    Remote(#[from] RemoteError),

    /// The key-value store failed.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// A template failed to compile or render.
    #[error("template error: {0}")]
    Template(#[from] TemplateError),

    /// A custom error occurred.
    #[error(transparent)]
    Custom(BoxError),
}

/// Errors that can occur during navigation.
///
/// The router never panics on these; each one is also reported on the
/// error channel before it is returned.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavigationError {
    /// No session cookie was present for a gated path.
    #[error("session expired: `{path}` requires a session")]
    SessionExpired {
        /// The path that was refused.
        path: String,
    },

    /// No handler is registered for the path (strict routers only).
    #[error("no route registered for path: {0}")]
    RouteNotFound(String),

    /// The history collaborator rejected the new entry.
    #[error("history push failed: {0}")]
    History(String),

    /// The route handler panicked. Its history entry has already been pushed.
    #[error("route handler panicked: {0}")]
    HandlerPanicked(String),
}

/// Errors from the REST collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    /// The server answered with a non-2xx status.
    #[error("{url} responded with status {status}")]
    Status {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
    },

    /// The request never completed.
    #[error("network failure: {0}")]
    Network(String),

    /// The response body could not be decoded.
    #[error("invalid response body: {0}")]
    Decode(String),
}

impl From<serde_json::Error> for RemoteError {
    fn from(err: serde_json::Error) -> Self {
        RemoteError::Decode(err.to_string())
    }
}

/// Errors from the key-value store.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The store refused the write (quota, private mode, ...).
    #[error("storage unavailable: {0}")]
    Unavailable(String),

    /// A stored value could not be decoded.
    #[error("stored value under `{key}` is corrupt: {reason}")]
    Corrupt {
        /// The key holding the value.
        key: String,
        /// Decoder message.
        reason: String,
    },
}

/// Errors from the template collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TemplateError {
    /// The template text did not compile.
    #[error("template failed to compile: {0}")]
    Compile(String),

    /// Rendering against a context failed.
    #[error("template failed to render: {0}")]
    Render(String),
}

/// A single listener failure collected during an Event Depot dispatch.
#[derive(Error, Debug)]
pub enum ListenerFailure {
    /// The listener returned an error.
    #[error("listener #{index} for `{event}` failed: {source}")]
    Error {
        /// Event name being dispatched.
        event: String,
        /// Position of the listener in registration order.
        index: usize,
        /// The returned error.
        #[source]
        source: BoxError,
    },

    /// The listener panicked.
    #[error("listener #{index} for `{event}` panicked: {message}")]
    Panic {
        /// Event name being dispatched.
        event: String,
        /// Position of the listener in registration order.
        index: usize,
        /// The panic payload, when it was a string.
        message: String,
    },
}

impl ListenerFailure {
    /// Position of the failing listener in the dispatch snapshot.
    pub fn index(&self) -> usize {
        match self {
            ListenerFailure::Error { index, .. } | ListenerFailure::Panic { index, .. } => *index,
        }
    }
}

// Convenience conversions
impl From<BoxError> for WaypointError {
    fn from(err: BoxError) -> Self {
        WaypointError::Custom(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_navigation_error_converts_to_top_level() {
        let err: WaypointError = NavigationError::RouteNotFound("/missing".into()).into();
        assert!(matches!(err, WaypointError::Navigation(_)));
        assert_eq!(
            err.to_string(),
            "navigation error: no route registered for path: /missing"
        );
    }

    #[test]
    fn test_json_error_becomes_decode() {
        let err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        assert!(matches!(RemoteError::from(err), RemoteError::Decode(_)));
    }

    #[test]
    fn test_listener_failure_index() {
        let failure = ListenerFailure::Panic {
            event: "tick".into(),
            index: 2,
            message: "boom".into(),
        };
        assert_eq!(failure.index(), 2);
        assert_eq!(failure.to_string(), "listener #2 for `tick` panicked: boom");
    }
}
