//! # Cart
//!
//! A reference feature built on the framework pieces:
//!
//! - [`CartStore`]: the cart persisted in a key-value store, with
//!   best-effort sync to the customer's server-side cart
//! - [`CartEvent`]: `cart:add`, `cart:remove` and `cart:update` payloads
//! - [`CartController`]: renders `{items, itemCount}` and applies events
//!   raised on its own depot

mod controller;
mod events;
mod store;

pub use controller::{CUSTOMER_KEY, CartController};
pub use events::CartEvent;
pub use store::{CART_KEY, Cart, CartItem, CartStore, customer_cart_url};
