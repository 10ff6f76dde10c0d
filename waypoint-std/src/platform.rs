//! The collaborators a router needs from its host.

use std::{fmt, sync::Arc};
use waypoint_core::{CookieSource, History, Spawner};

/// History, cookies and a spawner, bundled for injection.
#[derive(Clone)]
pub struct Platform {
    /// Session history stack.
    pub history: Arc<dyn History>,
    /// Document cookie string.
    pub cookies: Arc<dyn CookieSource>,
    /// Runs pending handler work.
    pub spawner: Arc<dyn Spawner>,
}

impl Platform {
    /// Bundle the collaborators.
    pub fn new(
        history: Arc<dyn History>,
        cookies: Arc<dyn CookieSource>,
        spawner: Arc<dyn Spawner>,
    ) -> Self {
        Self {
            history,
            cookies,
            spawner,
        }
    }
}

impl fmt::Debug for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Platform").finish_non_exhaustive()
    }
}
