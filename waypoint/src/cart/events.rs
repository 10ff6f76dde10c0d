//! Cart events carried on the cart controller's depot.

use serde::{Deserialize, Serialize};
use waypoint_core::Message;

/// A cart mutation requested by a view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    /// Add `quantity` of a product, merging with an existing line.
    Add {
        /// Product identifier.
        product_id: u64,
        /// Units to add.
        quantity: u32,
    },
    /// Remove a product's line.
    Remove {
        /// Product identifier.
        product_id: u64,
    },
    /// Set a line's quantity; zero or less removes it.
    Update {
        /// Product identifier.
        product_id: u64,
        /// New quantity.
        quantity: i64,
    },
}

impl CartEvent {
    /// Event name for [`CartEvent::Add`].
    pub const ADD: &'static str = "cart:add";
    /// Event name for [`CartEvent::Remove`].
    pub const REMOVE: &'static str = "cart:remove";
    /// Event name for [`CartEvent::Update`].
    pub const UPDATE: &'static str = "cart:update";

    /// The event name this payload is published under.
    pub fn name(&self) -> &'static str {
        match self {
            CartEvent::Add { .. } => Self::ADD,
            CartEvent::Remove { .. } => Self::REMOVE,
            CartEvent::Update { .. } => Self::UPDATE,
        }
    }
}

impl Message for CartEvent {}
