//! The client-side router.
//!
//! # Navigation order
//!
//! 1. Session gate. A refused navigation emits one `SessionExpired` signal
//!    and stops: no history entry, no handler.
//! 2. Route lookup. Strict routers report an unregistered path and stop
//!    before touching history; lenient routers carry on and dispatch nothing.
//! 3. History. Unless the navigation replays a `popstate`, exactly one entry
//!    `{path, query}` is pushed, with title and URL `path + query`.
//! 4. Dispatch. The query is split into raw fragments and the handler runs
//!    synchronously. Pending work is spawned, never awaited. A panicking
//!    handler is reported as `Uncaught` and returned as an error.

use super::table::{RouteTable, SharedHandler};
use crate::{
    config::RouterConfig,
    depot::{ErrorChannel, panic_message},
    platform::Platform,
};
use std::{
    panic::{self, AssertUnwindSafe},
    sync::{Arc, PoisonError, RwLock},
};
use waypoint_core::{
    ErrorSignal, HandlerOutcome, HistoryState, NavigationError, NavigationRequest, RouteHandler,
};

/// How a navigation that was not refused ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavigationOutcome {
    /// The handler ran.
    Dispatched,
    /// No handler is registered and the router is lenient.
    Unrouted,
}

/// Maps paths to handlers and keeps browser history in step.
pub struct Router {
    routes: RwLock<RouteTable>,
    config: RouterConfig,
    platform: Platform,
    errors: ErrorChannel,
}

impl std::fmt::Debug for Router {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Router")
            .field("routes", &self.paths())
            .field("config", &self.config)
            .finish()
    }
}

impl Router {
    /// Create a router reporting failures on `errors`.
    pub fn new(platform: Platform, errors: ErrorChannel, config: RouterConfig) -> Self {
        Self {
            routes: RwLock::new(RouteTable::new()),
            config,
            platform,
            errors,
        }
    }

    /// Register `handler` for `path`. A later registration for the same
    /// path replaces the earlier one.
    pub fn add<H: RouteHandler>(&self, path: impl Into<String>, handler: H) {
        self.add_shared(path, Arc::new(handler));
    }

    /// Register an already shared handler.
    pub fn add_shared(&self, path: impl Into<String>, handler: SharedHandler) {
        let path = path.into();
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        if routes.insert(path.clone(), handler).is_some() {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(path = %path, "Route handler replaced");
            }
        }
    }

    /// Navigate to `path` with `query` (including its leading `?`, or empty).
    ///
    /// `is_history_replay` is `true` when replaying a `popstate`; no history
    /// entry is pushed then.
    ///
    /// Failures are reported on the error channel and returned; this never
    /// panics for an expected condition.
    pub fn navigate_to(
        &self,
        path: &str,
        query: &str,
        is_history_replay: bool,
    ) -> Result<NavigationOutcome, NavigationError> {
        if !self.config.gate.admits(path, self.platform.cookies.as_ref()) {
            return Err(self.refuse(NavigationError::SessionExpired {
                path: path.to_owned(),
            }));
        }

        let handler = self
            .routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(path)
            .cloned();

        if handler.is_none() && self.config.strict {
            return Err(self.refuse(NavigationError::RouteNotFound(path.to_owned())));
        }

        if !is_history_replay {
            let state = HistoryState::new(path, query);
            let url = state.url();
            self.platform
                .history
                .push_state(state, &url, &url)
                .map_err(|e| self.refuse(NavigationError::History(e.to_string())))?;
        }

        let Some(handler) = handler else {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(path, "No route registered; navigation ignored");
            }
            return Ok(NavigationOutcome::Unrouted);
        };

        let request = NavigationRequest::parse(path, query, self.config.query_mode);

        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                path,
                parameters = ?request.parameters,
                replay = is_history_replay,
                "Dispatching navigation"
            );
        }

        match panic::catch_unwind(AssertUnwindSafe(|| handler.handle(request))) {
            Ok(HandlerOutcome::Pending(work)) => self.platform.spawner.spawn(work),
            Ok(HandlerOutcome::Done) => {}
            Err(panic) => {
                let message = panic_message(panic.as_ref());
                return Err(self.refuse(NavigationError::HandlerPanicked(message)));
            }
        }
        Ok(NavigationOutcome::Dispatched)
    }

    /// Replay a `popstate` entry.
    pub fn replay(&self, state: &HistoryState) -> Result<NavigationOutcome, NavigationError> {
        self.navigate_to(&state.path, &state.query, true)
    }

    /// Check if a handler is registered for `path`.
    pub fn has_route(&self, path: &str) -> bool {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(path)
    }

    /// Registered paths, sorted.
    pub fn paths(&self) -> Vec<String> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .paths()
            .into_iter()
            .map(str::to_owned)
            .collect()
    }

    /// The active configuration.
    pub fn config(&self) -> &RouterConfig {
        &self.config
    }

    /// The channel this router reports failures on.
    pub fn errors(&self) -> &ErrorChannel {
        &self.errors
    }

    fn refuse(&self, err: NavigationError) -> NavigationError {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!(error = %err, "Navigation refused");
        }
        self.errors.report(ErrorSignal::from(&err));
        err
    }
}
