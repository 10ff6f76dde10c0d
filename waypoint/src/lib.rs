//! # waypoint - Client-Side Application Core
//!
//! `waypoint` is the in-page core of a multi-page web application: a
//! router that keeps browser history in step with navigation, a session
//! gate, a per-controller publish/subscribe bus (the Event Depot) and the
//! glue that turns failures into user-facing dialogs.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use waypoint::prelude::*;
//!
//! let app = App::builder(platform, Variant::Course)
//!     .with_dialog(dialog)
//!     .controller("/app.html", |router| {
//!         let view = View::compile(&engine, APP_TEMPLATE, region).unwrap().with_links(router);
//!         Arc::new(PageController::new(view, errors.clone()))
//!     })
//!     .build();
//!
//! app.load(&Location::from_href("/app.html?page=course"))?;
//! ```
//!
//! ## Crates
//!
//! - `waypoint-core`: collaborator traits and plain data types
//! - `waypoint-std`: router, depot, gate, params and in-memory collaborators
//! - `waypoint`: views, page and generic controllers, message display, cart, timer and
//!   [`App`]

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

pub mod app;
pub mod cart;
pub mod controller;
pub mod generic;
pub mod messages;
pub mod timer;
pub mod view;

pub use waypoint_core::{
    // Collaborators
    Anchor,
    // Errors
    BoxError,
    ClickEvent,
    CookieSource,
    Dialog,
    DialogRequest,
    // Signals
    ErrorSignal,
    // Handlers
    HandlerOutcome,
    History,
    // Requests
    HistoryState,
    Icon,
    KeyValueStore,
    // Listeners
    Listener,
    ListenerFailure,
    Location,
    Message,
    NavigationError,
    NavigationRequest,
    Node,
    QueryMode,
    RemoteError,
    RenderFn,
    RestClient,
    RouteHandler,
    SignalKind,
    Spawner,
    StoreError,
    TemplateEngine,
    TemplateError,
    WaypointError,
    async_trait,
};

pub use waypoint_std::{
    DeliveryReport, ErrorChannel, EventDepot, GatePolicy, ListenerId, NavigationOutcome, Params,
    Platform, Router, RouterConfig,
};

#[cfg(feature = "tokio")]
pub use waypoint_std::TokioSpawner;

pub use app::{App, AppBuilder, Variant};
pub use controller::{Controller, PageController};
pub use generic::GenericController;
pub use messages::MessageDisplay;
pub use timer::ModuleTimer;
pub use view::View;

/// In-memory collaborators.
pub mod memory {
    pub use waypoint_std::memory::{
        CookieJar, MemoryAnchor, MemoryHistory, MemoryNode, MemoryStore,
    };
}

/// Testing utilities.
pub mod testing {
    pub use waypoint_std::testing::{
        FormatTemplates, MockRest, QueueSpawner, RecordingDialog, RecordingHandler,
        RecordingListener,
    };
}

/// Prelude module - common imports for Waypoint.
///
/// # Usage
///
/// ```rust,ignore
/// use waypoint::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        App, Controller, ErrorChannel, ErrorSignal, EventDepot, GatePolicy, HandlerOutcome,
        HistoryState, Listener, Location, Message, NavigationError, NavigationRequest,
        PageController, Params, Platform, RouteHandler, Router, RouterConfig, Variant, View,
    };
    pub use std::sync::Arc;
}
