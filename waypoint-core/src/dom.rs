//! The slice of the DOM the router and views touch.
//!
//! Views write markup into a [`Node`]; the router then looks for
//! router-managed anchors under that node and intercepts their clicks.

use std::sync::Arc;

/// Selector matching anchors the router should manage.
pub const ROUTE_LINK_SELECTOR: &str = "a[data-route-link]";

/// Marker attribute set on anchors that already carry a click interceptor.
pub const ROUTE_BOUND_ATTRIBUTE: &str = "data-route-bound";

/// A click delivered to an anchor listener.
pub trait ClickEvent {
    /// Suppress the browser's default navigation.
    fn prevent_default(&self);
}

/// A click listener attached to an anchor.
pub type ClickListener = Arc<dyn Fn(&dyn ClickEvent) + Send + Sync>;

/// An `<a>` element.
pub trait Anchor: Send + Sync {
    /// Path from the `href`, without the query string.
    fn pathname(&self) -> String;

    /// Query string from the `href`, including the leading `?`, or empty.
    fn search(&self) -> String;

    /// Read an attribute.
    fn attribute(&self, name: &str) -> Option<String>;

    /// Set an attribute.
    fn set_attribute(&self, name: &str, value: &str);

    /// Attach a click listener. Listeners accumulate; nothing deduplicates them.
    fn add_click_listener(&self, listener: ClickListener);
}

/// An element that can hold rendered markup.
pub trait Node: Send + Sync {
    /// Replace the element's children with the given markup.
    fn set_inner_html(&self, markup: &str);

    /// Anchors beneath this element matching `selector`.
    fn query_anchors(&self, selector: &str) -> Vec<Arc<dyn Anchor>>;
}
