//! Navigation requests and history entries.
//!
//! A [`NavigationRequest`] is built once per dispatched navigation and handed
//! to exactly one route handler. Its `parameters` are raw `key=value`
//! fragments; decoding them is left to the controller.

use crate::message::Message;
use serde::{Deserialize, Serialize};

/// How the router turns a query string into parameter fragments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QueryMode {
    /// Always drop the first character, whether or not it is `?`.
    ///
    /// `"page=a"` therefore parses as `["age=a"]`.
    Legacy,
    /// Drop a single leading `?` when present.
    #[default]
    Normalized,
}

impl QueryMode {
    /// Returns the query with its prefix removed according to the mode.
    pub fn strip(self, query: &str) -> &str {
        match self {
            QueryMode::Legacy => {
                let mut chars = query.chars();
                chars.next();
                chars.as_str()
            }
            QueryMode::Normalized => query.strip_prefix('?').unwrap_or(query),
        }
    }

    /// Splits a query into raw `key=value` fragments.
    ///
    /// An empty remainder yields a single empty fragment, never an empty list.
    pub fn fragments(self, query: &str) -> Vec<String> {
        self.strip(query).split('&').map(str::to_owned).collect()
    }
}

/// The request object passed to a route handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationRequest {
    /// The navigated path, e.g. `/app.html`.
    pub path: String,
    /// Raw `key=value` fragments in query order.
    pub parameters: Vec<String>,
}

impl NavigationRequest {
    /// Creates a request from already split fragments.
    pub fn new(path: impl Into<String>, parameters: Vec<String>) -> Self {
        Self {
            path: path.into(),
            parameters,
        }
    }

    /// Builds a request from a path and a query string.
    pub fn parse(path: impl Into<String>, query: &str, mode: QueryMode) -> Self {
        Self::new(path, mode.fragments(query))
    }
}

impl Message for NavigationRequest {}

/// A forward entry in the browser session history.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct HistoryState {
    /// Path component.
    pub path: String,
    /// Query string including its leading `?`, or empty.
    pub query: String,
}

impl HistoryState {
    /// Create a new history state.
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            query: query.into(),
        }
    }

    /// The URL (and title) recorded for this entry: `path + query`.
    pub fn url(&self) -> String {
        format!("{}{}", self.path, self.query)
    }
}

impl Message for HistoryState {}

/// The current document location, split the way anchors expose it.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Path without the query string.
    pub pathname: String,
    /// Query string including its leading `?`, or empty.
    pub search: String,
}

impl Location {
    /// Create a new location.
    pub fn new(pathname: impl Into<String>, search: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
        }
    }

    /// Splits an href such as `/app.html?page=course` at its first `?`.
    pub fn from_href(href: &str) -> Self {
        match href.find('?') {
            Some(idx) => Self::new(&href[..idx], &href[idx..]),
            None => Self::new(href, ""),
        }
    }
}
