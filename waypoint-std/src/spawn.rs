//! Spawners backed by an async runtime.

use futures::future::BoxFuture;
use tokio::runtime::Handle;
use waypoint_core::Spawner;

/// Spawns pending handler work onto a tokio runtime.
#[derive(Debug, Clone)]
pub struct TokioSpawner {
    handle: Handle,
}

impl TokioSpawner {
    /// Use the runtime of the calling context.
    ///
    /// # Panics
    ///
    /// Panics when called outside a tokio runtime.
    pub fn current() -> Self {
        Self {
            handle: Handle::current(),
        }
    }

    /// Use an explicit runtime handle.
    pub fn new(handle: Handle) -> Self {
        Self { handle }
    }
}

impl Spawner for TokioSpawner {
    fn spawn(&self, future: BoxFuture<'static, ()>) {
        // Detached: the router never joins navigation work.
        drop(self.handle.spawn(future));
    }
}
