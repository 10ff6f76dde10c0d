//! Browser-provided collaborators: session history, cookies and storage.
//!
//! These are deliberately small synchronous interfaces; a browser binding
//! maps them onto `history.pushState`, `document.cookie` and
//! `localStorage`. All of them are shared, process-wide and unlocked:
//! concurrent writers (two tabs) follow last-writer-wins.

use crate::{
    error::{BoxError, StoreError},
    request::HistoryState,
};

/// The browser's session history stack.
pub trait History: Send + Sync {
    /// Push a forward entry with the given title and URL.
    fn push_state(&self, state: HistoryState, title: &str, url: &str) -> Result<(), BoxError>;
}

/// Read access to the document cookie string.
pub trait CookieSource: Send + Sync {
    /// The raw `name=value; name2=value2` string.
    fn cookie_string(&self) -> String;
}

/// Synchronous string-keyed persistent storage.
pub trait KeyValueStore: Send + Sync {
    /// Read a value.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StoreError>;

    /// Delete a value. Missing keys are ignored.
    fn remove(&self, key: &str);
}
