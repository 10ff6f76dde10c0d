//! Testing utilities for Waypoint.
//!
//! # Features
//!
//! - [`RecordingListener`]: A listener that records every payload it receives
//! - [`RecordingHandler`]: A route handler that records its requests
//! - [`QueueSpawner`]: A spawner that queues work until the test runs it
//! - [`RecordingDialog`]: A dialog that records what it was asked to show
//! - [`FormatTemplates`]: A `{{name}}` substitution template engine
//! - [`MockRest`]: A scripted REST client

use async_trait::async_trait;
use futures::future::BoxFuture;
use serde_json::Value;
use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};
use waypoint_core::{
    BoxError, Dialog, DialogRequest, HandlerOutcome, Listener, Message, NavigationRequest,
    RemoteError, RenderFn, RestClient, RouteHandler, Spawner, TemplateEngine, TemplateError,
};

// ============================================================================
// Recording Listener
// ============================================================================

/// A listener that records all payloads it receives.
///
/// # Example
///
/// ```rust,ignore
/// let recorder = RecordingListener::<ErrorSignal>::new();
/// errors.on(ErrorSignal::EVENT, recorder.clone());
///
/// router.navigate_to("/app.html", "", false);
/// assert_eq!(recorder.count(), 1);
/// ```
pub struct RecordingListener<P: Clone> {
    payloads: Arc<Mutex<Vec<P>>>,
}

impl<P: Clone> RecordingListener<P> {
    /// Create a new recording listener.
    pub fn new() -> Self {
        Self {
            payloads: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Get a clone of the recorded payloads.
    pub fn payloads(&self) -> Vec<P> {
        self.payloads.lock().unwrap().clone()
    }

    /// Get the number of recorded payloads.
    pub fn count(&self) -> usize {
        self.payloads.lock().unwrap().len()
    }

    /// Clear all recorded payloads.
    pub fn clear(&self) {
        self.payloads.lock().unwrap().clear();
    }
}

impl<P: Clone> Default for RecordingListener<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Clone> Clone for RecordingListener<P> {
    fn clone(&self) -> Self {
        Self {
            payloads: self.payloads.clone(),
        }
    }
}

impl<P: Message + Clone> Listener<P> for RecordingListener<P> {
    fn on_event(&self, payload: &P) -> Result<(), BoxError> {
        self.payloads.lock().unwrap().push(payload.clone());
        Ok(())
    }
}

// ============================================================================
// Recording Handler
// ============================================================================

/// A route handler that records the requests it receives.
#[derive(Clone, Default)]
pub struct RecordingHandler {
    requests: Arc<Mutex<Vec<NavigationRequest>>>,
}

impl RecordingHandler {
    /// Create a new recording handler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests received so far.
    pub fn requests(&self) -> Vec<NavigationRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the number of invocations.
    pub fn count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

impl RouteHandler for RecordingHandler {
    fn handle(&self, request: NavigationRequest) -> HandlerOutcome {
        self.requests.lock().unwrap().push(request);
        HandlerOutcome::Done
    }
}

// ============================================================================
// Queue Spawner
// ============================================================================

/// A spawner that holds work until [`run_all`](Self::run_all) is called.
///
/// Lets tests observe the state between a navigation returning and its
/// asynchronous work completing.
#[derive(Default)]
pub struct QueueSpawner {
    queue: Mutex<Vec<BoxFuture<'static, ()>>>,
}

impl QueueSpawner {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of futures waiting to run.
    pub fn pending(&self) -> usize {
        self.queue.lock().unwrap().len()
    }

    /// Run queued futures to completion, in spawn order, including any they
    /// spawn themselves. Returns how many ran.
    pub fn run_all(&self) -> usize {
        let mut ran = 0;
        loop {
            let batch: Vec<_> = std::mem::take(&mut *self.queue.lock().unwrap());
            if batch.is_empty() {
                return ran;
            }
            for future in batch {
                futures::executor::block_on(future);
                ran += 1;
            }
        }
    }
}

impl Spawner for QueueSpawner {
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        self.queue.lock().unwrap().push(future);
    }
}

// ============================================================================
// Recording Dialog
// ============================================================================

/// A dialog that records requests instead of showing them.
#[derive(Clone, Default)]
pub struct RecordingDialog {
    shown: Arc<Mutex<Vec<DialogRequest>>>,
}

impl RecordingDialog {
    /// Create a new recording dialog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Dialogs shown so far.
    pub fn shown(&self) -> Vec<DialogRequest> {
        self.shown.lock().unwrap().clone()
    }
}

impl Dialog for RecordingDialog {
    fn show(&self, request: DialogRequest) {
        self.shown.lock().unwrap().push(request);
    }
}

// ============================================================================
// Format Templates
// ============================================================================

/// A template engine replacing `{{name}}` with top-level context fields.
///
/// Strings are inserted as-is, other JSON values in their JSON form, and
/// missing fields as the empty string. An unclosed `{{` fails to compile.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormatTemplates;

impl TemplateEngine for FormatTemplates {
    fn compile(&self, source: &str) -> Result<RenderFn, TemplateError> {
        let mut pieces = Vec::new();
        let mut rest = source;
        while let Some(open) = rest.find("{{") {
            pieces.push(Piece::Text(rest[..open].to_owned()));
            let after = &rest[open + 2..];
            let close = after
                .find("}}")
                .ok_or_else(|| TemplateError::Compile(format!("unclosed tag at byte {open}")))?;
            pieces.push(Piece::Field(after[..close].trim().to_owned()));
            rest = &after[close + 2..];
        }
        pieces.push(Piece::Text(rest.to_owned()));

        Ok(Arc::new(move |context: &Value| {
            let mut out = String::new();
            for piece in &pieces {
                match piece {
                    Piece::Text(text) => out.push_str(text),
                    Piece::Field(name) => match context.get(name) {
                        Some(Value::String(s)) => out.push_str(s),
                        Some(Value::Null) | None => {}
                        Some(other) => out.push_str(&other.to_string()),
                    },
                }
            }
            Ok(out)
        }))
    }
}

enum Piece {
    Text(String),
    Field(String),
}

// ============================================================================
// Mock REST
// ============================================================================

/// A scripted REST client.
///
/// Responses are keyed by `"METHOD url"`; unscripted calls fail with a
/// `404` [`RemoteError::Status`]. Every call is recorded.
#[derive(Clone, Default)]
pub struct MockRest {
    responses: Arc<Mutex<HashMap<String, Result<Value, RemoteError>>>>,
    calls: Arc<Mutex<Vec<(String, Option<Value>)>>>,
}

impl MockRest {
    /// Create a client with no scripted responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the response for `method url`.
    pub fn respond(&self, method: &str, url: &str, response: Result<Value, RemoteError>) {
        self.responses
            .lock()
            .unwrap()
            .insert(format!("{method} {url}"), response);
    }

    /// Calls made so far as `("METHOD url", body)`.
    pub fn calls(&self) -> Vec<(String, Option<Value>)> {
        self.calls.lock().unwrap().clone()
    }

    fn answer(&self, method: &str, url: &str, body: Option<&Value>) -> Result<Value, RemoteError> {
        let key = format!("{method} {url}");
        self.calls.lock().unwrap().push((key.clone(), body.cloned()));
        self.responses
            .lock()
            .unwrap()
            .get(&key)
            .cloned()
            .unwrap_or_else(|| {
                Err(RemoteError::Status {
                    url: url.to_owned(),
                    status: 404,
                })
            })
    }
}

#[async_trait]
impl RestClient for MockRest {
    async fn get_json(&self, url: &str) -> Result<Value, RemoteError> {
        self.answer("GET", url, None)
    }

    async fn get_text(&self, url: &str) -> Result<String, RemoteError> {
        self.answer("GET", url, None).map(|v| match v {
            Value::String(s) => s,
            other => other.to_string(),
        })
    }

    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, RemoteError> {
        self.answer("POST", url, Some(body))
    }

    async fn put_json(&self, url: &str, body: &Value) -> Result<Value, RemoteError> {
        self.answer("PUT", url, Some(body))
    }

    async fn delete(&self, url: &str, body: &Value) -> Result<String, RemoteError> {
        self.answer("DELETE", url, Some(body)).map(|v| v.to_string())
    }
}
