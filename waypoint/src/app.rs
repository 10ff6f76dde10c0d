//! # Application wiring
//!
//! [`App`] is the single entry point of a page: it owns the router, the
//! error channel and the message display, and forwards browser events
//! (initial load, `popstate`, uncaught errors) to them.
//!
//! Both application variants share this core. The variant only selects the
//! session gate and the canonical routes checked at build time.
//!
//! # Example
//!
//! ```rust,ignore
//! let app = App::builder(platform, Variant::RealEstate)
//!     .with_dialog(dialog)
//!     .controller("/", |router| Arc::new(home_controller(router)))
//!     .controller("/properties.html", |router| Arc::new(properties_controller(router)))
//!     .build();
//!
//! app.load(&Location::from_href("/properties.html?city=Austin"))?;
//! ```

use crate::{controller::Controller, messages::MessageDisplay};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use waypoint_core::{
    Dialog, ErrorSignal, HistoryState, Location, NavigationError, NavigationRequest,
};
use waypoint_std::{ErrorChannel, GatePolicy, NavigationOutcome, Platform, Router, RouterConfig};

/// Which application this core is running.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Course platform; everything but `/` requires a session.
    Course,
    /// Real-estate site; no session gate.
    RealEstate,
}

impl Variant {
    /// The gate this variant navigates under.
    pub fn gate(self) -> GatePolicy {
        match self {
            Variant::Course => GatePolicy::session(),
            Variant::RealEstate => GatePolicy::Open,
        }
    }

    /// Paths every build of this variant is expected to handle.
    pub fn canonical_routes(self) -> &'static [&'static str] {
        match self {
            Variant::Course => &["/", "/app.html", "/generic.html"],
            Variant::RealEstate => &["/", "/home.html", "/properties.html"],
        }
    }
}

type ControllerFactory = Box<dyn FnOnce(&Arc<Router>) -> Arc<dyn Controller>>;

/// Builder for [`App`].
pub struct AppBuilder {
    platform: Platform,
    variant: Variant,
    config: RouterConfig,
    errors: ErrorChannel,
    dialog: Option<Arc<dyn Dialog>>,
    controllers: Vec<(String, ControllerFactory)>,
}

impl AppBuilder {
    /// Replace the router configuration.
    ///
    /// The variant's gate is kept; use [`with_gate`](Self::with_gate)
    /// afterwards to override it.
    pub fn with_config(mut self, config: RouterConfig) -> Self {
        self.config = config.with_gate(self.variant.gate());
        self
    }

    /// Override the variant's gate policy.
    pub fn with_gate(mut self, gate: GatePolicy) -> Self {
        self.config = self.config.with_gate(gate);
        self
    }

    /// Use an existing error channel.
    pub fn with_errors(mut self, errors: ErrorChannel) -> Self {
        self.errors = errors;
        self
    }

    /// Display error signals through `dialog`.
    pub fn with_dialog(mut self, dialog: Arc<dyn Dialog>) -> Self {
        self.dialog = Some(dialog);
        self
    }

    /// Register a controller built once the router exists, so its views can
    /// bind route links.
    pub fn controller<C, F>(mut self, path: impl Into<String>, factory: F) -> Self
    where
        C: Controller,
        F: FnOnce(&Arc<Router>) -> Arc<C> + 'static,
    {
        self.controllers.push((
            path.into(),
            Box::new(move |router: &Arc<Router>| factory(router) as Arc<dyn Controller>),
        ));
        self
    }

    /// Register an already built controller.
    pub fn mount<C: Controller>(self, path: impl Into<String>, controller: Arc<C>) -> Self {
        self.controller(path, move |_| controller)
    }

    /// Build the router, wire the controllers and attach the display.
    pub fn build(self) -> App {
        let router = Arc::new(Router::new(
            self.platform,
            self.errors.clone(),
            self.config,
        ));

        for (path, factory) in self.controllers {
            let controller = factory(&router);
            router.add(path, move |request: NavigationRequest| controller.load(request));
        }

        let display = self
            .dialog
            .map(|dialog| MessageDisplay::attach(&self.errors, dialog));

        let app = App {
            router,
            errors: self.errors,
            variant: self.variant,
            display,
        };

        #[cfg(feature = "tracing")]
        {
            for path in app.missing_routes() {
                tracing::warn!(path, variant = ?app.variant, "Canonical route has no controller");
            }
        }
        app
    }
}

/// A wired application.
#[derive(Debug)]
pub struct App {
    router: Arc<Router>,
    errors: ErrorChannel,
    variant: Variant,
    display: Option<MessageDisplay>,
}

impl App {
    /// Start building an app for `variant`.
    pub fn builder(platform: Platform, variant: Variant) -> AppBuilder {
        AppBuilder {
            platform,
            variant,
            config: RouterConfig::new().with_gate(variant.gate()),
            errors: ErrorChannel::new(),
            dialog: None,
            controllers: Vec::new(),
        }
    }

    /// Route the page's current location. Pushes a history entry.
    pub fn load(&self, location: &Location) -> Result<NavigationOutcome, NavigationError> {
        #[cfg(feature = "tracing")]
        {
            tracing::debug!(
                pathname = %location.pathname,
                search = %location.search,
                "Loading location"
            );
        }
        self.router
            .navigate_to(&location.pathname, &location.search, false)
    }

    /// Replay a `popstate` entry without pushing history.
    pub fn on_popstate(&self, state: &HistoryState) -> Result<NavigationOutcome, NavigationError> {
        self.router.replay(state)
    }

    /// Report a runtime failure no component handled.
    pub fn report_uncaught(&self, message: impl Into<String>) {
        let message = message.into();
        #[cfg(feature = "tracing")]
        {
            tracing::warn!(message = %message, "Uncaught error");
        }
        self.errors.report(ErrorSignal::uncaught(message));
    }

    /// Canonical routes of the variant with no controller registered.
    pub fn missing_routes(&self) -> Vec<&'static str> {
        self.variant
            .canonical_routes()
            .iter()
            .copied()
            .filter(|path| !self.router.has_route(path))
            .collect()
    }

    /// The router.
    pub fn router(&self) -> &Arc<Router> {
        &self.router
    }

    /// The error channel.
    pub fn errors(&self) -> &ErrorChannel {
        &self.errors
    }

    /// The running variant.
    pub fn variant(&self) -> Variant {
        self.variant
    }

    /// The attached message display, if a dialog was given.
    pub fn display(&self) -> Option<&MessageDisplay> {
        self.display.as_ref()
    }
}
