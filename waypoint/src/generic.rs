//! Generic pages.
//!
//! The `page` parameter names the template to show: `?page=services`
//! renders `pages/services`. Templates are fetched by name through the REST
//! client, compiled once and cached. A request without a `page` is sent back
//! to the home page.
//!
//! A template that cannot be fetched has no local fallback, so the region
//! shows an inline alert instead.

use crate::{controller::Controller, view::View};
use serde_json::{Value, json};
use std::{
    collections::HashMap,
    sync::{Arc, Mutex, PoisonError, Weak},
};
use waypoint_core::{
    ErrorSignal, HandlerOutcome, Icon, NavigationRequest, Node, RemoteError, RenderFn,
    RestClient, TemplateEngine,
};
use waypoint_std::{ErrorChannel, Params, Router};

/// Where templates are served from.
pub const TEMPLATE_ROOT: &str = "app/views/templates";

/// Where a request without a `page` parameter is redirected.
pub const HOME_PAGE: &str = "/app.html";

/// URL of the template named `name`.
pub fn template_url(name: &str) -> String {
    format!("{TEMPLATE_ROOT}/{name}.hbs")
}

/// Template name for a `page` parameter.
pub fn page_template(page: &str) -> String {
    format!("pages/{page}")
}

/// Page title: the page name with its first letter upper-cased.
pub fn page_title(page: &str) -> String {
    let mut chars = page.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

struct Inner {
    router: Weak<Router>,
    rest: Arc<dyn RestClient>,
    engine: Arc<dyn TemplateEngine>,
    frame: View,
    errors: ErrorChannel,
    cache: Mutex<HashMap<String, RenderFn>>,
}

/// Renders the template named by the `page` parameter.
#[derive(Clone)]
pub struct GenericController {
    inner: Arc<Inner>,
    home: String,
}

impl GenericController {
    /// Create a controller rendering into `region`.
    pub fn new(
        router: &Arc<Router>,
        region: Arc<dyn Node>,
        rest: Arc<dyn RestClient>,
        engine: Arc<dyn TemplateEngine>,
        errors: ErrorChannel,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                router: Arc::downgrade(router),
                rest,
                engine,
                frame: View::blank(region).with_links(router),
                errors,
                cache: Mutex::new(HashMap::new()),
            }),
            home: HOME_PAGE.to_owned(),
        }
    }

    /// Redirect target for requests without a `page`.
    pub fn with_home(mut self, home: impl Into<String>) -> Self {
        self.home = home.into();
        self
    }

    /// Names of the templates compiled so far.
    pub fn cached_templates(&self) -> Vec<String> {
        let cache = self
            .inner
            .cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let mut names: Vec<_> = cache.keys().cloned().collect();
        names.sort();
        names
    }

    fn redirect_home(&self, from: &str) {
        if from == self.home {
            #[cfg(feature = "tracing")]
            {
                tracing::warn!(path = from, "No page requested on the home page itself");
            }
            return;
        }
        if let Some(router) = self.inner.router.upgrade() {
            // Refusals are already reported on the error channel.
            let _ = router.navigate_to(&self.home, "", false);
        }
    }
}

impl Inner {
    fn cached(&self, name: &str) -> Option<RenderFn> {
        self.cache
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    async fn show(&self, name: &str, context: &Value) {
        let render = match self.cached(name) {
            Some(render) => render,
            None => {
                let url = template_url(name);
                let source = match self.rest.get_text(&url).await {
                    Ok(source) => source,
                    Err(err) => return self.fetch_failed(name, &err),
                };
                match self.engine.compile(&source) {
                    Ok(render) => {
                        self.cache
                            .lock()
                            .unwrap_or_else(PoisonError::into_inner)
                            .insert(name.to_owned(), render.clone());
                        render
                    }
                    Err(err) => return self.render_failed(name, &err.to_string()),
                }
            }
        };

        if let Err(err) = self.frame.with_template(render).render(context) {
            self.render_failed(name, &err.to_string());
        }
    }

    fn fetch_failed(&self, name: &str, err: &RemoteError) {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!(template = name, error = %err, "Template fetch failed");
        }
        self.frame
            .render_alert(Icon::Error, &format!("The page {name} could not be loaded."));
        self.errors.report(ErrorSignal::remote_failed(err.to_string()));
    }

    fn render_failed(&self, _name: &str, message: &str) {
        #[cfg(feature = "tracing")]
        {
            tracing::warn!(template = _name, error = message, "Page render failed");
        }
        self.errors.report(ErrorSignal::uncaught(message));
    }
}

impl Controller for GenericController {
    fn load(&self, request: NavigationRequest) -> HandlerOutcome {
        let params = Params::from_request(&request);
        let Some(page) = params.get("page").map(str::to_owned) else {
            self.redirect_home(&request.path);
            return HandlerOutcome::Done;
        };

        let name = page_template(&page);
        let context = json!({
            "title": page_title(&page),
            "page": page,
            "params": params.to_json(),
        });
        let inner = self.inner.clone();
        HandlerOutcome::pending(async move {
            inner.show(&name, &context).await;
        })
    }
}

impl std::fmt::Debug for GenericController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GenericController")
            .field("home", &self.home)
            .field("templates", &self.cached_templates())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_names() {
        assert_eq!(page_template("services"), "pages/services");
        assert_eq!(
            template_url(&page_template("services")),
            "app/views/templates/pages/services.hbs"
        );
    }

    #[test]
    fn test_page_title() {
        assert_eq!(page_title("about"), "About");
        assert_eq!(page_title("étude"), "Étude");
        assert_eq!(page_title(""), "");
    }
}
