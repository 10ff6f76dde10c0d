mod common;

use common::Harness;
use std::sync::Arc;
use waypoint::{
    GatePolicy, HistoryState, Node, RouterConfig, memory::MemoryNode, testing::RecordingHandler,
};

fn harness() -> (Harness, RecordingHandler) {
    let h = Harness::new(RouterConfig::new().with_gate(GatePolicy::Open));
    let handler = RecordingHandler::new();
    for path in ["/", "/home.html", "/properties.html"] {
        h.router.add(path, handler.clone());
    }
    (h, handler)
}

#[test]
fn binding_a_second_region_leaves_the_first_alone() {
    let (h, handler) = harness();
    let node_a = MemoryNode::new();
    let link_a = node_a.insert_anchor("/home.html", true);
    h.router.set_route_links(&[&node_a]);

    let node_b = MemoryNode::new();
    node_b.insert_anchor("/properties.html?city=Austin", true);
    h.router.set_route_links(&[&node_b]);

    assert!(link_a.click());
    assert_eq!(link_a.listener_count(), 1);
    assert_eq!(handler.count(), 1);
    assert_eq!(h.history.entries(), vec![HistoryState::new("/home.html", "")]);
}

#[test]
fn overlapping_rebind_adds_no_second_listener() {
    let (h, handler) = harness();
    let node_a = MemoryNode::new();
    let link_a = node_a.insert_anchor("/home.html", true);
    assert_eq!(h.router.set_route_links(&[&node_a]), 1);

    let node_b = MemoryNode::new();
    let link_b = node_b.insert_anchor("/", true);
    let roots: [&dyn Node; 2] = [&node_a, &node_b];
    assert_eq!(h.router.set_route_links(&roots), 1);

    link_a.click();
    link_b.click();
    assert_eq!(link_a.listener_count(), 1);
    assert_eq!(handler.count(), 2);
}

#[test]
fn rendered_markup_is_bound_after_replacement() {
    let (h, handler) = harness();
    let region = Arc::new(MemoryNode::new());
    region.set_inner_html(r#"<a href="/home.html" data-route-link>Home</a>"#);
    h.router.set_route_links(&[&*region]);

    region.set_inner_html(r#"<a href="/properties.html?beds=2" data-route-link>2 beds</a>"#);
    assert_eq!(h.router.set_route_links(&[&*region]), 1);

    let link = region.anchor("/properties.html?beds=2").unwrap();
    assert!(link.click());
    assert_eq!(handler.requests()[0].parameters, vec!["beds=2"]);
}

#[test]
fn unmarked_anchors_keep_default_navigation() {
    let (h, handler) = harness();
    let node = MemoryNode::new();
    let plain = node.insert_anchor("/home.html", false);

    assert_eq!(h.router.set_route_links(&[&node]), 0);
    assert!(!plain.click());
    assert_eq!(handler.count(), 0);
}

#[test]
fn refused_click_still_prevents_default() {
    let h = Harness::new(RouterConfig::new());
    let node = MemoryNode::new();
    let link = node.insert_anchor("/app.html", true);
    h.router.add("/app.html", RecordingHandler::new());
    h.router.set_route_links(&[&node]);

    assert!(link.click());
    assert_eq!(h.signals.count(), 1);
}
