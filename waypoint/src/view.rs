//! Template-backed views.
//!
//! A [`View`] owns one compiled template and the DOM region it renders into.
//! After every render the route links inside that region (and only that
//! region) are bound to the router, so freshly rendered anchors navigate
//! client-side.

use serde_json::Value;
use std::sync::{Arc, Weak};
use waypoint_core::{Icon, Node, RenderFn, TemplateEngine, TemplateError};
use waypoint_std::Router;

/// A compiled template bound to a DOM region.
#[derive(Clone)]
pub struct View {
    render: RenderFn,
    region: Arc<dyn Node>,
    router: Option<Weak<Router>>,
}

impl View {
    /// Compile `source` once with `engine`.
    pub fn compile(
        engine: &dyn TemplateEngine,
        source: &str,
        region: Arc<dyn Node>,
    ) -> Result<Self, TemplateError> {
        Ok(Self::new(engine.compile(source)?, region))
    }

    /// Wrap an already compiled template.
    pub fn new(render: RenderFn, region: Arc<dyn Node>) -> Self {
        Self {
            render,
            region,
            router: None,
        }
    }

    /// A view with an empty template, used as a frame for
    /// [`with_template`](Self::with_template) and alerts.
    pub fn blank(region: Arc<dyn Node>) -> Self {
        let empty = |_: &Value| -> Result<String, TemplateError> { Ok(String::new()) };
        Self::new(Arc::new(empty), region)
    }

    /// The same region and link binding with another template.
    pub fn with_template(&self, render: RenderFn) -> Self {
        Self {
            render,
            region: self.region.clone(),
            router: self.router.clone(),
        }
    }

    /// Bind route links in the region to `router` after each render.
    ///
    /// Only a weak reference is kept; the router owns the controllers that
    /// own their views.
    pub fn with_links(mut self, router: &Arc<Router>) -> Self {
        self.router = Some(Arc::downgrade(router));
        self
    }

    /// Render `context` into the region and bind its route links.
    ///
    /// Returns the number of anchors bound. The region is left untouched if
    /// the template fails.
    pub fn render(&self, context: &Value) -> Result<usize, TemplateError> {
        let markup = (self.render)(context)?;
        self.region.set_inner_html(&markup);
        Ok(self.bind_links())
    }

    /// Replace the region with an inline alert.
    pub fn render_alert(&self, icon: Icon, message: &str) -> usize {
        self.region.set_inner_html(&alert_markup(icon, message));
        self.bind_links()
    }

    /// The region this view renders into.
    pub fn region(&self) -> &Arc<dyn Node> {
        &self.region
    }

    fn bind_links(&self) -> usize {
        match self.router.as_ref().and_then(Weak::upgrade) {
            Some(router) => router.set_route_links(&[&*self.region]),
            None => 0,
        }
    }
}

impl std::fmt::Debug for View {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("View")
            .field("linked", &self.router.is_some())
            .finish_non_exhaustive()
    }
}

/// Bootstrap-style alert markup with an escaped message.
pub fn alert_markup(icon: Icon, message: &str) -> String {
    let class = match icon {
        Icon::Error => "danger",
        Icon::Warning => "warning",
        Icon::Success => "success",
        Icon::Info => "info",
    };
    format!(
        r#"<div class="alert alert-{class}" role="alert">{}</div>"#,
        escape_html(message)
    )
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use waypoint_core::Anchor;
    use waypoint_std::{
        ErrorChannel, GatePolicy, Platform, RouterConfig,
        memory::{CookieJar, MemoryHistory, MemoryNode},
        testing::{FormatTemplates, QueueSpawner},
    };

    fn router() -> Arc<Router> {
        let platform = Platform::new(
            Arc::new(MemoryHistory::new()),
            Arc::new(CookieJar::new()),
            Arc::new(QueueSpawner::new()),
        );
        Arc::new(Router::new(
            platform,
            ErrorChannel::new(),
            RouterConfig::new().with_gate(GatePolicy::Open),
        ))
    }

    #[test]
    fn test_render_binds_links_in_region_only() {
        let router = router();
        let region = Arc::new(MemoryNode::new());
        let outside = MemoryNode::new();
        let outside_link = outside.insert_anchor("/home.html", true);

        let view = View::compile(
            &FormatTemplates,
            r#"<a href="/properties.html?city={{city}}" data-route-link>{{city}}</a>"#,
            region.clone(),
        )
        .unwrap()
        .with_links(&router);

        assert_eq!(view.render(&json!({ "city": "Austin" })).unwrap(), 1);
        assert!(region.inner_html().contains("city=Austin"));
        assert!(region.anchors()[0].attribute("data-route-bound").is_some());
        assert!(outside_link.attribute("data-route-bound").is_none());
    }

    #[test]
    fn test_unlinked_view_binds_nothing() {
        let region = Arc::new(MemoryNode::new());
        let view = View::compile(&FormatTemplates, r#"<a href="/" data-route-link>x</a>"#, region)
            .unwrap();
        assert_eq!(view.render(&json!({})).unwrap(), 0);
    }

    #[test]
    fn test_render_alert_replaces_region() {
        let region = Arc::new(MemoryNode::new());
        let view = View::compile(&FormatTemplates, "<p>ok</p>", region.clone()).unwrap();
        view.render_alert(Icon::Warning, "Courses unavailable");
        assert_eq!(
            region.inner_html(),
            r#"<div class="alert alert-warning" role="alert">Courses unavailable</div>"#
        );
    }

    #[test]
    fn test_with_template_keeps_region_and_links() {
        let router = router();
        let region = Arc::new(MemoryNode::new());
        let frame = View::blank(region.clone()).with_links(&router);
        assert_eq!(frame.render(&json!({})).unwrap(), 0);
        assert!(region.inner_html().is_empty());

        let page = FormatTemplates
            .compile(r#"<a href="/{{page}}.html" data-route-link>go</a>"#)
            .unwrap();
        assert_eq!(
            frame.with_template(page).render(&json!({ "page": "home" })).unwrap(),
            1
        );
        assert!(region.anchor("/home.html").is_some());
    }

    #[test]
    fn test_alert_markup_escapes_message() {
        assert_eq!(
            alert_markup(Icon::Error, "<b>down</b>"),
            r#"<div class="alert alert-danger" role="alert">&lt;b&gt;down&lt;/b&gt;</div>"#
        );
    }
}
