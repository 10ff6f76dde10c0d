//! In-memory collaborators.
//!
//! Stand-ins for the browser's history stack, cookie string, local storage
//! and DOM, used by tests and by native hosts that have no browser.

use std::{
    collections::HashMap,
    sync::{
        Arc, Mutex, PoisonError,
        atomic::{AtomicBool, Ordering},
    },
};
use waypoint_core::{
    Anchor, BoxError, ClickEvent, ClickListener, CookieSource, History, HistoryState,
    KeyValueStore, Location, Node, ROUTE_LINK_SELECTOR, StoreError,
};

// ============================================================================
// History
// ============================================================================

/// A history stack recording every pushed entry.
#[derive(Debug, Default)]
pub struct MemoryHistory {
    entries: Mutex<Vec<HistoryState>>,
    fail_next: Mutex<Option<String>>,
}

impl MemoryHistory {
    /// Create an empty history.
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries pushed so far, oldest first.
    pub fn entries(&self) -> Vec<HistoryState> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The most recent entry.
    pub fn current(&self) -> Option<HistoryState> {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
    }

    /// Make the next push fail with `message`.
    pub fn fail_next(&self, message: impl Into<String>) {
        *self.fail_next.lock().unwrap_or_else(PoisonError::into_inner) = Some(message.into());
    }
}

impl History for MemoryHistory {
    fn push_state(&self, state: HistoryState, _title: &str, _url: &str) -> Result<(), BoxError> {
        if let Some(message) = self
            .fail_next
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
        {
            return Err(message.into());
        }
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(state);
        Ok(())
    }
}

// ============================================================================
// Cookies
// ============================================================================

/// A mutable cookie string, formatted the way `document.cookie` reads.
#[derive(Debug, Default)]
pub struct CookieJar {
    cookies: Mutex<Vec<(String, String)>>,
}

impl CookieJar {
    /// Create an empty jar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set (or replace) a cookie.
    pub fn set(&self, name: &str, value: &str) {
        let mut cookies = self.cookies.lock().unwrap_or_else(PoisonError::into_inner);
        match cookies.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value.to_owned(),
            None => cookies.push((name.to_owned(), value.to_owned())),
        }
    }

    /// Remove a cookie, as an expired session would.
    pub fn remove(&self, name: &str) {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .retain(|(n, _)| n != name);
    }
}

impl CookieSource for CookieJar {
    fn cookie_string(&self) -> String {
        self.cookies
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(n, v)| format!("{n}={v}"))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

// ============================================================================
// Storage
// ============================================================================

/// A `HashMap`-backed key-value store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    read_only: AtomicBool,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject every write with [`StoreError::Unavailable`].
    pub fn set_read_only(&self, read_only: bool) {
        self.read_only.store(read_only, Ordering::SeqCst);
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(key)
            .cloned()
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable("store is read-only".into()));
        }
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&self, key: &str) {
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(key);
    }
}

// ============================================================================
// DOM
// ============================================================================

/// An anchor with a fixed `href`.
pub struct MemoryAnchor {
    location: Location,
    route_link: bool,
    attributes: Mutex<HashMap<String, String>>,
    listeners: Mutex<Vec<ClickListener>>,
}

impl MemoryAnchor {
    /// Create an anchor for `href`; `route_link` marks it `data-route-link`.
    pub fn new(href: &str, route_link: bool) -> Self {
        let mut attributes = HashMap::new();
        attributes.insert("href".to_owned(), href.to_owned());
        if route_link {
            attributes.insert("data-route-link".to_owned(), String::new());
        }
        Self {
            location: Location::from_href(href),
            route_link,
            attributes: Mutex::new(attributes),
            listeners: Mutex::new(Vec::new()),
        }
    }

    /// Deliver a click. Returns `true` if a listener prevented the default.
    pub fn click(&self) -> bool {
        let listeners = self
            .listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        let event = MemoryClick::default();
        for listener in listeners {
            listener(&event);
        }
        event.prevented.load(Ordering::SeqCst)
    }

    /// Number of click listeners attached.
    pub fn listener_count(&self) -> usize {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }
}

impl Anchor for MemoryAnchor {
    fn pathname(&self) -> String {
        self.location.pathname.clone()
    }

    fn search(&self) -> String {
        self.location.search.clone()
    }

    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    fn set_attribute(&self, name: &str, value: &str) {
        self.attributes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_owned(), value.to_owned());
    }

    fn add_click_listener(&self, listener: ClickListener) {
        self.listeners
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(listener);
    }
}

#[derive(Default)]
struct MemoryClick {
    prevented: AtomicBool,
}

impl ClickEvent for MemoryClick {
    fn prevent_default(&self) {
        self.prevented.store(true, Ordering::SeqCst);
    }
}

/// An element holding markup and the anchors found in it.
#[derive(Default)]
pub struct MemoryNode {
    markup: Mutex<String>,
    anchors: Mutex<Vec<Arc<MemoryAnchor>>>,
}

impl MemoryNode {
    /// Create an empty element.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an anchor, as script-inserted DOM would.
    pub fn insert_anchor(&self, href: &str, route_link: bool) -> Arc<MemoryAnchor> {
        let anchor = Arc::new(MemoryAnchor::new(href, route_link));
        self.anchors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(anchor.clone());
        anchor
    }

    /// Current markup.
    pub fn inner_html(&self) -> String {
        self.markup
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// All anchors, in document order.
    pub fn anchors(&self) -> Vec<Arc<MemoryAnchor>> {
        self.anchors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// The first anchor whose `href` equals `href`.
    pub fn anchor(&self, href: &str) -> Option<Arc<MemoryAnchor>> {
        self.anchors()
            .into_iter()
            .find(|a| a.attribute("href").as_deref() == Some(href))
    }
}

impl Node for MemoryNode {
    /// Replaces the markup and rebuilds the anchor list from `<a href=...>`
    /// tags in it. Previous anchors (and their listeners) are discarded.
    fn set_inner_html(&self, markup: &str) {
        let parsed = parse_anchors(markup)
            .into_iter()
            .map(|(href, route_link)| Arc::new(MemoryAnchor::new(&href, route_link)))
            .collect();
        *self.markup.lock().unwrap_or_else(PoisonError::into_inner) = markup.to_owned();
        *self.anchors.lock().unwrap_or_else(PoisonError::into_inner) = parsed;
    }

    fn query_anchors(&self, selector: &str) -> Vec<Arc<dyn Anchor>> {
        let route_only = selector == ROUTE_LINK_SELECTOR;
        self.anchors()
            .into_iter()
            .filter(|a| !route_only || a.route_link)
            .map(|a| a as Arc<dyn Anchor>)
            .collect()
    }
}

/// Extracts `(href, has data-route-link)` from each `<a ...>` opening tag.
///
/// Attribute values may use either quote style; unquoted values are not
/// recognised.
fn parse_anchors(markup: &str) -> Vec<(String, bool)> {
    let mut found = Vec::new();
    let mut rest = markup;
    while let Some(start) = rest.find("<a") {
        let after = &rest[start + 2..];
        if !after.starts_with(|c: char| c.is_ascii_whitespace()) {
            rest = after;
            continue;
        }
        let Some(end) = after.find('>') else {
            break;
        };
        let tag = &after[..end];
        if let Some(href) = attribute_value(tag, "href") {
            found.push((href, has_attribute(tag, "data-route-link")));
        }
        rest = &after[end..];
    }
    found
}

fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let mut rest = tag;
    while let Some(at) = rest.find(name) {
        let standalone = rest[..at].ends_with(|c: char| c.is_ascii_whitespace());
        rest = &rest[at + name.len()..];
        if !standalone {
            continue;
        }
        let Some(value) = rest.trim_start().strip_prefix('=') else {
            continue;
        };
        let value = value.trim_start();
        let quote = value.chars().next().filter(|c| *c == '"' || *c == '\'')?;
        let body = &value[1..];
        let len = body.find(quote)?;
        return Some(body[..len].to_owned());
    }
    None
}

fn has_attribute(tag: &str, name: &str) -> bool {
    tag.split_ascii_whitespace()
        .any(|token| token == name || token.strip_prefix(name).is_some_and(|t| t.starts_with('=')))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_string_format() {
        let jar = CookieJar::new();
        jar.set("theme", "dark");
        jar.set("session_token", "abc");
        jar.set("theme", "light");
        assert_eq!(jar.cookie_string(), "theme=light; session_token=abc");

        jar.remove("theme");
        assert_eq!(jar.cookie_string(), "session_token=abc");
    }

    #[test]
    fn test_read_only_store_rejects_writes() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set_read_only(true);
        assert!(matches!(store.set("a", "2"), Err(StoreError::Unavailable(_))));
        assert_eq!(store.get("a").as_deref(), Some("1"));
    }

    #[test]
    fn test_set_inner_html_finds_anchors() {
        let node = MemoryNode::new();
        node.set_inner_html(
            r#"<nav><a href="/app.html?page=cart" data-route-link>Cart</a>
               <a href="https://example.com">Ext</a></nav>"#,
        );

        assert_eq!(node.anchors().len(), 2);
        let routed = node.query_anchors(ROUTE_LINK_SELECTOR);
        assert_eq!(routed.len(), 1);
        assert_eq!(routed[0].pathname(), "/app.html");
        assert_eq!(routed[0].search(), "?page=cart");
        assert!(node.anchor("https://example.com").is_some());
    }

    #[test]
    fn test_anchor_tags_accept_either_quote_and_any_whitespace() {
        let node = MemoryNode::new();
        node.set_inner_html(
            "<ul><li><a\n   href='/properties.html?city=Austin'\n   data-route-link>Austin</a></li>\
             <li><a\tdata-href=\"/x\" href = \"/home.html\">Home</a></li>\
             <li><abbr title=\"t\">abbr</abbr></li></ul>",
        );

        let hrefs: Vec<_> = node
            .anchors()
            .iter()
            .map(|a| a.attribute("href").unwrap_or_default())
            .collect();
        assert_eq!(hrefs, vec!["/properties.html?city=Austin", "/home.html"]);
        let routed = node.query_anchors(ROUTE_LINK_SELECTOR);
        assert_eq!(routed.len(), 1);
        assert_eq!(routed[0].search(), "?city=Austin");
    }

    #[test]
    fn test_click_without_listeners_keeps_default() {
        let anchor = MemoryAnchor::new("/", true);
        assert!(!anchor.click());
    }
}
