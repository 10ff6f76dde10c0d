//! Session gate.
//!
//! Any path other than the exempt ones (by default only `/`) requires a
//! session cookie. Only presence is checked: the token value is never
//! validated client-side and expiry is inferred solely from its absence.

use serde::{Deserialize, Serialize};
use waypoint_core::CookieSource;

/// Name of the cookie carrying the session token.
pub const SESSION_COOKIE: &str = "session_token";

/// Whether navigation requires a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "policy", rename_all = "snake_case")]
pub enum GatePolicy {
    /// Every path is reachable without a session.
    Open,
    /// Paths outside `exempt` need the `cookie` to be present.
    RequireSession {
        /// Cookie name to look for.
        cookie: String,
        /// Paths reachable without a session.
        exempt: Vec<String>,
    },
}

impl GatePolicy {
    /// Require `session_token` everywhere except `/`.
    pub fn session() -> Self {
        GatePolicy::RequireSession {
            cookie: SESSION_COOKIE.to_owned(),
            exempt: vec!["/".to_owned()],
        }
    }

    /// Whether navigation to `path` may proceed given the current cookies.
    pub fn admits(&self, path: &str, cookies: &dyn CookieSource) -> bool {
        match self {
            GatePolicy::Open => true,
            GatePolicy::RequireSession { cookie, exempt } => {
                exempt.iter().any(|p| p == path) || has_cookie(&cookies.cookie_string(), cookie)
            }
        }
    }
}

impl Default for GatePolicy {
    fn default() -> Self {
        Self::session()
    }
}

/// Scans a `;`-separated cookie string for a pair starting with `name=`.
pub fn has_cookie(cookie_string: &str, name: &str) -> bool {
    let prefix = format!("{name}=");
    cookie_string
        .split(';')
        .any(|pair| pair.trim().starts_with(&prefix))
}
