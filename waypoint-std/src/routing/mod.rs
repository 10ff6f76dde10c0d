//! # Routing
//!
//! Client-side routing over exact paths:
//!
//! - [`RouteTable`]: path -> handler storage
//! - [`Router`]: session gate, history synchronization and dispatch
//! - Link binding: [`Router::set_route_links`] intercepts router-managed anchors

mod links;
mod router;
mod table;

pub use router::{NavigationOutcome, Router};
pub use table::{RouteTable, SharedHandler};
