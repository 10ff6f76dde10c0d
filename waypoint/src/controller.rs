//! Controllers.
//!
//! A controller is the route handler for one page. The router calls
//! [`Controller::load`] once per dispatched navigation; asynchronous work is
//! returned as [`HandlerOutcome::Pending`] and spawned, never awaited.

use crate::view::View;
use serde_json::{Map, Value};
use waypoint_core::{ErrorSignal, HandlerOutcome, NavigationRequest};
use waypoint_std::{ErrorChannel, Params};

/// The handler for one page.
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a page controller",
    label = "missing `Controller` implementation",
    note = "Controllers implement `load(&self, NavigationRequest) -> HandlerOutcome`."
)]
pub trait Controller: Send + Sync + 'static {
    /// Render the page for `request`.
    fn load(&self, request: NavigationRequest) -> HandlerOutcome;
}

/// Renders one template per page from the navigation parameters.
///
/// The render context is the base context, then every decoded parameter as
/// a top-level field, then `path` and `params` (all parameters as an
/// object). Later entries win.
#[derive(Debug)]
pub struct PageController {
    view: View,
    base: Map<String, Value>,
    errors: ErrorChannel,
}

impl PageController {
    /// Create a controller rendering into `view`; template failures are
    /// reported on `errors`.
    pub fn new(view: View, errors: ErrorChannel) -> Self {
        Self {
            view,
            base: Map::new(),
            errors,
        }
    }

    /// Fields present in every render. Non-object values are ignored.
    pub fn with_context(mut self, base: Value) -> Self {
        if let Value::Object(map) = base {
            self.base = map;
        }
        self
    }

    /// Build the render context for `request`.
    pub fn context(&self, request: &NavigationRequest) -> Value {
        let params = Params::from_request(request);
        let mut context = self.base.clone();
        for (name, value) in params.iter() {
            context.insert(name.to_owned(), Value::String(value.to_owned()));
        }
        context.insert("path".to_owned(), Value::String(request.path.clone()));
        context.insert("params".to_owned(), params.to_json());
        Value::Object(context)
    }
}

impl Controller for PageController {
    fn load(&self, request: NavigationRequest) -> HandlerOutcome {
        let context = self.context(&request);
        if let Err(err) = self.view.render(&context) {
            #[cfg(feature = "tracing")]
            {
                tracing::warn!(path = %request.path, error = %err, "Page render failed");
            }
            self.errors.report(ErrorSignal::uncaught(err.to_string()));
        }
        HandlerOutcome::Done
    }
}
