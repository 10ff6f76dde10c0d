//! # waypoint-std
//!
//! Standard implementations for the Waypoint client-side application core.
//!
//! This crate provides:
//! - **Routing**: [`Router`] with session gating, history sync and link binding
//! - **Event Depot**: [`EventDepot`] and the [`ErrorChannel`] alias
//! - **Session gate**: [`GatePolicy`]
//! - **Parameters**: [`Params`] decoding of `key=value` fragments
//! - **In-memory collaborators**: [`memory`] history, cookies, storage and DOM
//! - **Spawning**: `TokioSpawner` (feature `tokio`)

#![deny(clippy::wildcard_imports)]
#![warn(missing_docs)]

// Re-export core traits
pub use waypoint_core;

// Modules
pub mod config;
pub mod depot;
pub mod gate;
pub mod memory;
pub mod params;
pub mod platform;
pub mod routing;
#[cfg(feature = "tokio")]
pub mod spawn;
pub mod testing;

pub use config::RouterConfig;
pub use depot::{DeliveryReport, ErrorChannel, EventDepot, ListenerId};
pub use gate::{GatePolicy, SESSION_COOKIE};
pub use params::Params;
pub use platform::Platform;
pub use routing::{NavigationOutcome, RouteTable, Router, SharedHandler};
#[cfg(feature = "tokio")]
pub use spawn::TokioSpawner;
