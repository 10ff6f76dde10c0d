//! Router configuration.
//!
//! Built with chained setters or deserialized from JSON:
//!
//! ```json
//! { "strict": false, "query_mode": "legacy", "gate": { "policy": "open" } }
//! ```

use crate::gate::GatePolicy;
use serde::{Deserialize, Serialize};
use waypoint_core::QueryMode;

/// Behavior switches for a [`Router`](crate::routing::Router).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Report navigations to unregistered paths as `RouteNotFound`.
    ///
    /// When `false`, such navigations push history and then do nothing.
    pub strict: bool,
    /// How query strings are split into parameters.
    pub query_mode: QueryMode,
    /// Session gate applied before dispatch.
    pub gate: GatePolicy,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            strict: true,
            query_mode: QueryMode::default(),
            gate: GatePolicy::default(),
        }
    }
}

impl RouterConfig {
    /// Create the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report unregistered routes.
    pub fn strict(mut self) -> Self {
        self.strict = true;
        self
    }

    /// Silently ignore unregistered routes.
    pub fn lenient(mut self) -> Self {
        self.strict = false;
        self
    }

    /// Set the query parsing mode.
    pub fn with_query_mode(mut self, mode: QueryMode) -> Self {
        self.query_mode = mode;
        self
    }

    /// Set the gate policy.
    pub fn with_gate(mut self, gate: GatePolicy) -> Self {
        self.gate = gate;
        self
    }

    /// Load from a JSON document; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
