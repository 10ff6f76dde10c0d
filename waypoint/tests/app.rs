mod common;

use common::{Harness, init_tracing};
use std::sync::Arc;
use waypoint::{
    App, Controller, ErrorSignal, HandlerOutcome, HistoryState, Icon, Location, NavigationError,
    NavigationOutcome, NavigationRequest, PageController, RouterConfig, Variant, View,
    memory::MemoryNode,
    testing::{FormatTemplates, RecordingDialog},
};

const APP_TEMPLATE: &str = concat!(
    "<h1>{{page}}</h1>",
    r#"<a href="/generic.html?page=detail&id={{detail}}" data-route-link>more</a>"#,
);
const GENERIC_TEMPLATE: &str = "<section>{{page}} #{{id}}</section>";

struct CourseApp {
    app: App,
    harness: Harness,
    region: Arc<MemoryNode>,
    dialog: RecordingDialog,
}

fn course_app() -> CourseApp {
    init_tracing();
    let harness = Harness::new(RouterConfig::new());
    let region = Arc::new(MemoryNode::new());
    let dialog = RecordingDialog::new();

    let errors = harness.errors.clone();
    let app_region = region.clone();
    let generic_errors = errors.clone();
    let generic_region = region.clone();

    let app = App::builder(harness.platform(), Variant::Course)
        .with_errors(errors.clone())
        .with_dialog(Arc::new(dialog.clone()))
        .controller("/app.html", move |router| {
            let view = View::compile(&FormatTemplates, APP_TEMPLATE, app_region)
                .unwrap()
                .with_links(router);
            Arc::new(PageController::new(view, errors))
        })
        .controller("/generic.html", move |router| {
            let view = View::compile(&FormatTemplates, GENERIC_TEMPLATE, generic_region)
                .unwrap()
                .with_links(router);
            Arc::new(PageController::new(view, generic_errors))
        })
        .build();

    CourseApp {
        app,
        harness,
        region,
        dialog,
    }
}

#[test]
fn load_renders_current_location() {
    let c = course_app();
    c.harness.sign_in();

    let outcome = c
        .app
        .load(&Location::from_href("/app.html?page=course&detail=5"))
        .unwrap();

    assert_eq!(outcome, NavigationOutcome::Dispatched);
    assert!(c.region.inner_html().starts_with("<h1>course</h1>"));
    assert_eq!(
        c.harness.history.entries(),
        vec![HistoryState::new("/app.html", "?page=course&detail=5")]
    );
}

#[test]
fn rendered_links_navigate_client_side() {
    let c = course_app();
    c.harness.sign_in();
    c.app
        .load(&Location::from_href("/app.html?page=course&detail=5"))
        .unwrap();

    let link = c.region.anchor("/generic.html?page=detail&id=5").unwrap();
    assert!(link.click());

    assert_eq!(c.region.inner_html(), "<section>detail #5</section>");
    assert_eq!(c.harness.history.entries().len(), 2);
}

#[test]
fn expired_session_shows_redirecting_dialog() {
    let c = course_app();

    let err = c.app.load(&Location::from_href("/app.html")).unwrap_err();

    assert!(matches!(err, NavigationError::SessionExpired { .. }));
    let shown = c.dialog.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].icon, Icon::Error);
    assert_eq!(shown[0].redirect_on_timeout.as_deref(), Some("/index.html"));
    assert!(c.region.inner_html().is_empty());
}

#[test]
fn popstate_replays_without_history() {
    let c = course_app();
    c.harness.sign_in();

    c.app
        .on_popstate(&HistoryState::new("/generic.html", "?page=intro&id=2"))
        .unwrap();

    assert_eq!(c.region.inner_html(), "<section>intro #2</section>");
    assert!(c.harness.history.entries().is_empty());
}

#[test]
fn uncaught_errors_show_warning_without_redirect() {
    let c = course_app();

    c.app.report_uncaught("TypeError: x is undefined");

    let shown = c.dialog.shown();
    assert_eq!(shown.len(), 1);
    assert_eq!(shown[0].icon, Icon::Warning);
    assert_eq!(shown[0].redirect_on_timeout, None);
    assert_eq!(c.harness.signals.count(), 1);
}

#[test]
fn course_app_reports_missing_root() {
    let c = course_app();
    assert_eq!(c.app.missing_routes(), vec!["/"]);
}

#[test]
fn real_estate_app_is_open() {
    let harness = Harness::new(RouterConfig::new());
    let region = Arc::new(MemoryNode::new());
    let home_region = region.clone();
    let errors = harness.errors.clone();

    let app = App::builder(harness.platform(), Variant::RealEstate)
        .with_errors(harness.errors.clone())
        .controller("/home.html", move |router| {
            let view = View::compile(&FormatTemplates, "<p>{{city}}</p>", home_region)
                .unwrap()
                .with_links(router);
            Arc::new(
                PageController::new(view, errors)
                    .with_context(serde_json::json!({ "city": "anywhere" })),
            )
        })
        .build();

    app.load(&Location::from_href("/home.html?city=Austin")).unwrap();
    assert_eq!(region.inner_html(), "<p>Austin</p>");
    app.load(&Location::from_href("/home.html")).unwrap();
    assert_eq!(region.inner_html(), "<p>anywhere</p>");
    assert_eq!(harness.signals.count(), 0);
    assert_eq!(app.missing_routes(), vec!["/", "/properties.html"]);
}

struct BrokenListings;

impl Controller for BrokenListings {
    fn load(&self, _request: NavigationRequest) -> HandlerOutcome {
        panic!("controller blew up")
    }
}

#[test]
fn panicking_controller_reaches_the_message_display() {
    let harness = Harness::new(RouterConfig::new());
    let dialog = RecordingDialog::new();
    let app = App::builder(harness.platform(), Variant::RealEstate)
        .with_errors(harness.errors.clone())
        .with_dialog(Arc::new(dialog.clone()))
        .mount("/home.html", Arc::new(BrokenListings))
        .build();

    let loaded = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        app.load(&Location::from_href("/home.html"))
    }))
    .expect("panic escaped App::load");
    let replayed = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        app.on_popstate(&HistoryState::new("/home.html", ""))
    }))
    .expect("panic escaped App::on_popstate");

    let expected = NavigationError::HandlerPanicked("controller blew up".into());
    assert_eq!(loaded, Err(expected.clone()));
    assert_eq!(replayed, Err(expected));
    assert_eq!(
        harness.signals.payloads(),
        vec![
            ErrorSignal::uncaught("controller blew up"),
            ErrorSignal::uncaught("controller blew up"),
        ]
    );
    let shown = dialog.shown();
    assert_eq!(shown.len(), 2);
    assert!(shown.iter().all(|d| d.icon == Icon::Warning));
}
