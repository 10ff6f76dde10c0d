#![allow(dead_code)]

use std::sync::Arc;
use waypoint::{
    ErrorChannel, ErrorSignal, Platform, Router, RouterConfig,
    memory::{CookieJar, MemoryHistory},
    testing::{QueueSpawner, RecordingListener},
};

// ============================================================================
// Fixture
// ============================================================================

/// A router over in-memory collaborators, with every signal recorded.
pub struct Harness {
    pub router: Arc<Router>,
    pub history: Arc<MemoryHistory>,
    pub cookies: Arc<CookieJar>,
    pub spawner: Arc<QueueSpawner>,
    pub errors: ErrorChannel,
    pub signals: RecordingListener<ErrorSignal>,
}

impl Harness {
    pub fn new(config: RouterConfig) -> Self {
        let history = Arc::new(MemoryHistory::new());
        let cookies = Arc::new(CookieJar::new());
        let spawner = Arc::new(QueueSpawner::new());
        let errors = ErrorChannel::new();
        let signals = RecordingListener::new();
        errors.on(ErrorSignal::EVENT, signals.clone());

        let platform = Platform::new(history.clone(), cookies.clone(), spawner.clone());
        Self {
            router: Arc::new(Router::new(platform, errors.clone(), config)),
            history,
            cookies,
            spawner,
            errors,
            signals,
        }
    }

    pub fn platform(&self) -> Platform {
        Platform::new(
            self.history.clone(),
            self.cookies.clone(),
            self.spawner.clone(),
        )
    }

    pub fn sign_in(&self) {
        self.cookies.set("session_token", "abc123");
    }
}

/// Install a test subscriber once; honours `RUST_LOG`.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
