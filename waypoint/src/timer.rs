//! Module countdown timer.
//!
//! Counts elapsed seconds up to an optional limit and publishes each new
//! value as a `tick` event. The timer is passive: something must call
//! [`ModuleTimer::tick`] once per second, either a browser interval or
//! [`ModuleTimer::run`] with the `tokio` feature.

use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use waypoint_std::EventDepot;

/// Event name carrying the elapsed seconds.
pub const TICK_EVENT: &str = "tick";

/// An elapsed-time counter with an optional limit.
#[derive(Debug)]
pub struct ModuleTimer {
    elapsed: AtomicU64,
    limit: Option<u64>,
    running: AtomicBool,
    depot: EventDepot<u64>,
}

impl ModuleTimer {
    /// A running timer stopping at `limit` seconds, or never.
    pub fn new(limit: Option<u64>) -> Self {
        Self {
            elapsed: AtomicU64::new(0),
            limit,
            running: AtomicBool::new(true),
            depot: EventDepot::new(),
        }
    }

    /// A timer for a module's limit in minutes; `0` means unlimited.
    pub fn from_minutes(minutes: u64) -> Self {
        Self::new((minutes > 0).then(|| minutes.saturating_mul(60)))
    }

    /// Advance by one second.
    ///
    /// A timer that has reached its limit stops instead. Returns the new
    /// elapsed value if the timer advanced.
    pub fn tick(&self) -> Option<u64> {
        if self.limit.is_some_and(|limit| self.elapsed() >= limit) {
            self.stop();
        }
        if !self.is_running() {
            return None;
        }
        let elapsed = self.elapsed.fetch_add(1, Ordering::SeqCst) + 1;
        self.depot.trigger(TICK_EVENT, &elapsed);
        Some(elapsed)
    }

    /// Stop counting. Takes effect on the next tick.
    pub fn stop(&self) {
        if self.running.swap(false, Ordering::SeqCst) {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(elapsed = self.elapsed(), "Module timer stopped");
            }
        }
    }

    /// Whether the timer is still counting.
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }

    /// Seconds counted so far.
    pub fn elapsed(&self) -> u64 {
        self.elapsed.load(Ordering::SeqCst)
    }

    /// The limit in seconds, if any.
    pub fn limit(&self) -> Option<u64> {
        self.limit
    }

    /// The depot `tick` events are published on.
    pub fn depot(&self) -> &EventDepot<u64> {
        &self.depot
    }

    /// `elapsed/limit`, e.g. `1:05/30:00` or `0:07/∞`.
    pub fn display(&self) -> String {
        let limit = match self.limit {
            Some(limit) => format_clock(limit),
            None => "∞".to_owned(),
        };
        format!("{}/{limit}", format_clock(self.elapsed()))
    }

    /// Tick every `period` until the timer stops.
    ///
    /// The loop notices a stop on the following tick, so it ends one period
    /// after the timer reaches its limit.
    #[cfg(feature = "tokio")]
    pub async fn run(&self, period: std::time::Duration) {
        let mut interval = tokio::time::interval(period);
        // The first tick completes immediately.
        interval.tick().await;
        loop {
            interval.tick().await;
            if !self.is_running() {
                break;
            }
            self.tick();
        }
    }
}

/// Render seconds as `m:ss`.
pub fn format_clock(seconds: u64) -> String {
    format!("{}:{:02}", seconds / 60, seconds % 60)
}
