//! Route table: exact path -> handler.

use std::{collections::HashMap, sync::Arc};
use waypoint_core::RouteHandler;

/// A shared, type-erased route handler.
pub type SharedHandler = Arc<dyn RouteHandler>;

/// Path -> handler map backed by `HashMap`.
///
/// Paths are matched exactly. Inserting an existing path replaces its
/// handler (last registration wins).
#[derive(Default)]
pub struct RouteTable {
    map: HashMap<String, SharedHandler>,
}

impl RouteTable {
    /// Create a new empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `handler` for `path`, returning the handler it replaced.
    pub fn insert(
        &mut self,
        path: impl Into<String>,
        handler: SharedHandler,
    ) -> Option<SharedHandler> {
        self.map.insert(path.into(), handler)
    }

    /// Look up the handler for `path`.
    pub fn get(&self, path: &str) -> Option<&SharedHandler> {
        self.map.get(path)
    }

    /// Check if a handler is registered for `path`.
    pub fn contains(&self, path: &str) -> bool {
        self.map.contains_key(path)
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<&str> {
        let mut paths: Vec<_> = self.map.keys().map(String::as_str).collect();
        paths.sort_unstable();
        paths
    }

    /// Get the number of routes.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the table is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl std::fmt::Debug for RouteTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RouteTable")
            .field("paths", &self.paths())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::NavigationRequest;

    fn handler() -> SharedHandler {
        Arc::new(|_request: NavigationRequest| {})
    }

    #[test]
    fn test_basic_lookup() {
        let mut table = RouteTable::new();
        table.insert("/", handler());
        table.insert("/app.html", handler());

        assert!(table.get("/").is_some());
        assert!(table.get("/app.html").is_some());
        assert!(table.get("/app.html?page=x").is_none());
        assert_eq!(table.paths(), vec!["/", "/app.html"]);
    }

    #[test]
    fn test_last_registration_wins() {
        let mut table = RouteTable::new();
        let first = handler();
        assert!(table.insert("/", first.clone()).is_none());

        let replaced = table.insert("/", handler()).unwrap();
        assert!(Arc::ptr_eq(&replaced, &first));
        assert_eq!(table.len(), 1);
    }
}
