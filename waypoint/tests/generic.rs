mod common;

use common::{Harness, init_tracing};
use serde_json::Value;
use std::sync::Arc;
use waypoint::{
    Anchor, Controller, GatePolicy, GenericController, HistoryState, Icon, NavigationRequest,
    RemoteError, RouterConfig, SignalKind,
    generic::template_url,
    memory::MemoryNode,
    testing::{FormatTemplates, MockRest, RecordingHandler},
    view::alert_markup,
};

struct Fixture {
    harness: Harness,
    controller: GenericController,
    rest: MockRest,
    region: Arc<MemoryNode>,
}

fn fixture() -> Fixture {
    init_tracing();
    let harness = Harness::new(RouterConfig::new().with_gate(GatePolicy::Open));
    let rest = MockRest::new();
    let region = Arc::new(MemoryNode::new());
    let controller = GenericController::new(
        &harness.router,
        region.clone(),
        Arc::new(rest.clone()),
        Arc::new(FormatTemplates),
        harness.errors.clone(),
    );
    let mounted = controller.clone();
    harness
        .router
        .add("/generic.html", move |request: NavigationRequest| mounted.load(request));
    Fixture {
        harness,
        controller,
        rest,
        region,
    }
}

fn serve(rest: &MockRest, name: &str, source: &str) {
    rest.respond(
        "GET",
        &template_url(name),
        Ok(Value::String(source.to_owned())),
    );
}

#[test]
fn page_parameter_selects_the_template() {
    let f = fixture();
    serve(
        &f.rest,
        "pages/services",
        r#"<h1>{{title}}</h1><a href="/generic.html?page=about" data-route-link>About</a>"#,
    );

    f.harness
        .router
        .navigate_to("/generic.html", "?page=services", false)
        .unwrap();
    assert!(f.region.inner_html().is_empty(), "rendering waits for the fetch");
    assert_eq!(f.harness.spawner.run_all(), 1);

    assert!(f.region.inner_html().starts_with("<h1>Services</h1>"));
    assert!(
        f.region
            .anchor("/generic.html?page=about")
            .unwrap()
            .attribute("data-route-bound")
            .is_some()
    );
    assert_eq!(
        f.rest.calls(),
        vec![(
            "GET app/views/templates/pages/services.hbs".to_owned(),
            None
        )]
    );
}

#[test]
fn compiled_templates_are_reused() {
    let f = fixture();
    serve(&f.rest, "pages/about", "<p>{{title}}</p>");

    for _ in 0..2 {
        f.harness
            .router
            .navigate_to("/generic.html", "?page=about", false)
            .unwrap();
        f.harness.spawner.run_all();
    }

    assert_eq!(f.region.inner_html(), "<p>About</p>");
    assert_eq!(f.rest.calls().len(), 1);
    assert_eq!(f.controller.cached_templates(), vec!["pages/about"]);
}

#[test]
fn missing_page_redirects_home() {
    let f = fixture();
    let home = RecordingHandler::new();
    f.harness.router.add("/app.html", home.clone());

    f.harness
        .router
        .navigate_to("/generic.html", "", false)
        .unwrap();

    assert_eq!(home.count(), 1);
    assert_eq!(
        f.harness.history.entries(),
        vec![
            HistoryState::new("/generic.html", ""),
            HistoryState::new("/app.html", ""),
        ]
    );
    assert_eq!(f.harness.spawner.pending(), 0);
    assert!(f.rest.calls().is_empty());
}

#[test]
fn failed_fetch_shows_inline_alert() {
    let f = fixture();
    f.rest.respond(
        "GET",
        &template_url("pages/pricing"),
        Err(RemoteError::Network("connection reset".into())),
    );

    f.harness
        .router
        .navigate_to("/generic.html", "?page=pricing", false)
        .unwrap();
    f.harness.spawner.run_all();

    assert_eq!(
        f.region.inner_html(),
        alert_markup(Icon::Error, "The page pages/pricing could not be loaded.")
    );
    let signals = f.harness.signals.payloads();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].kind, SignalKind::RemoteRequestFailed);
    assert!(f.controller.cached_templates().is_empty());
}

#[test]
fn broken_template_is_reported_as_uncaught() {
    let f = fixture();
    serve(&f.rest, "pages/faq", "<h1>{{ title</h1>");

    f.harness
        .router
        .navigate_to("/generic.html", "?page=faq", false)
        .unwrap();
    f.harness.spawner.run_all();

    assert!(f.region.inner_html().is_empty());
    let signals = f.harness.signals.payloads();
    assert_eq!(signals.len(), 1);
    assert_eq!(signals[0].kind, SignalKind::Uncaught);
}
