//! The persisted shopping cart.
//!
//! The cart lives in a [`KeyValueStore`] under [`CART_KEY`] as JSON:
//!
//! ```json
//! { "items": [{ "product_id": 4, "quantity": 2 }], "customerId": "17", "updatedAt": "..." }
//! ```
//!
//! Every mutation rewrites the whole document. Tabs sharing the store do
//! not coordinate; the last writer wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::sync::{Arc, Mutex, PoisonError};
use waypoint_core::{KeyValueStore, RemoteError, RestClient, StoreError};

/// Storage key of the cart document.
pub const CART_KEY: &str = "cart";

/// One cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartItem {
    /// Product identifier.
    pub product_id: u64,
    /// Units in the cart.
    pub quantity: u32,
}

/// The cart document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    /// Lines in insertion order.
    #[serde(default)]
    pub items: Vec<CartItem>,
    /// Owning customer, once known.
    #[serde(default)]
    pub customer_id: Option<String>,
    /// Time of the last mutation.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Cart {
    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.quantity)).sum()
    }
}

/// The cart as the server returns it.
#[derive(Deserialize)]
struct RemoteCart {
    #[serde(default)]
    items: Vec<CartItem>,
    #[serde(default)]
    customer_id: Option<Value>,
    #[serde(default)]
    updated_at: Option<String>,
}

impl From<RemoteCart> for Cart {
    fn from(remote: RemoteCart) -> Self {
        Cart {
            items: remote.items,
            customer_id: remote.customer_id.and_then(|id| match id {
                Value::String(s) => Some(s),
                Value::Null => None,
                other => Some(other.to_string()),
            }),
            updated_at: remote
                .updated_at
                .and_then(|at| DateTime::parse_from_rfc3339(&at).ok())
                .map(|at| at.with_timezone(&Utc)),
        }
    }
}

/// URL of a customer's server-side cart.
pub fn customer_cart_url(customer_id: &str) -> String {
    format!("/cart/customer/{customer_id}")
}

/// The cart, mirrored to a key-value store.
pub struct CartStore {
    store: Arc<dyn KeyValueStore>,
    cart: Mutex<Cart>,
}

impl CartStore {
    /// Load the cart from `store`.
    ///
    /// A missing document is created empty; a corrupt one is replaced by an
    /// empty cart on the next write.
    pub fn open(store: Arc<dyn KeyValueStore>) -> Self {
        let cart = match store.get(CART_KEY) {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|_err| {
                #[cfg(feature = "tracing")]
                {
                    tracing::warn!(error = %_err, "Stored cart is corrupt; starting empty");
                }
                Cart::default()
            }),
            None => {
                let cart = Cart::default();
                if let Ok(raw) = serde_json::to_string(&cart) {
                    // An unavailable store only loses persistence.
                    let _ = store.set(CART_KEY, &raw);
                }
                cart
            }
        };
        Self {
            store,
            cart: Mutex::new(cart),
        }
    }

    /// A copy of the current cart.
    pub fn snapshot(&self) -> Cart {
        self.lock().clone()
    }

    /// Lines in insertion order.
    pub fn items(&self) -> Vec<CartItem> {
        self.lock().items.clone()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lock().item_count()
    }

    /// Record the owning customer.
    pub fn set_customer_id(&self, customer_id: impl Into<String>) -> Result<(), StoreError> {
        self.mutate(|cart| cart.customer_id = Some(customer_id.into()))
    }

    /// Add `quantity` units, merging with an existing line.
    pub fn add_item(&self, product_id: u64, quantity: u32) -> Result<(), StoreError> {
        self.mutate(|cart| {
            match cart.items.iter_mut().find(|item| item.product_id == product_id) {
                Some(item) => item.quantity = item.quantity.saturating_add(quantity),
                None => cart.items.push(CartItem {
                    product_id,
                    quantity,
                }),
            }
            cart.updated_at = Some(Utc::now());
        })
    }

    /// Set a line's quantity. Zero or less removes the line; an unknown
    /// product is ignored.
    pub fn update_item(&self, product_id: u64, quantity: i64) -> Result<(), StoreError> {
        if quantity <= 0 {
            return self.remove_item(product_id);
        }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        let mut cart = self.lock();
        let Some(item) = cart.items.iter_mut().find(|item| item.product_id == product_id) else {
            return Ok(());
        };
        item.quantity = quantity;
        cart.updated_at = Some(Utc::now());
        self.persist(&cart)
    }

    /// Remove a product's line.
    pub fn remove_item(&self, product_id: u64) -> Result<(), StoreError> {
        self.mutate(|cart| {
            cart.items.retain(|item| item.product_id != product_id);
            cart.updated_at = Some(Utc::now());
        })
    }

    /// Empty the cart.
    pub fn clear(&self) -> Result<(), StoreError> {
        self.mutate(|cart| {
            cart.items.clear();
            cart.updated_at = Some(Utc::now());
        })
    }

    /// Replace the cart with the customer's server-side cart.
    ///
    /// On failure the local cart is kept. Returns the cart after the call.
    pub async fn fetch_remote(&self, rest: &dyn RestClient, customer_id: &str) -> Cart {
        let url = customer_cart_url(customer_id);
        match rest.get_json(&url).await.and_then(decode_remote) {
            Ok(cart) => self.replace(cart),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                {
                    tracing::warn!(
                        url = %url,
                        error = %_err,
                        "Cart fetch failed; keeping local cart"
                    );
                }
                self.snapshot()
            }
        }
    }

    /// Add to the customer's server-side cart and adopt the server's answer.
    ///
    /// On failure the item is added locally instead.
    pub async fn add_remote(
        &self,
        rest: &dyn RestClient,
        customer_id: &str,
        product_id: u64,
        quantity: u32,
    ) -> Result<Cart, StoreError> {
        let url = customer_cart_url(customer_id);
        let body = json!({ "product_id": product_id, "quantity": quantity });
        match rest.post_json(&url, &body).await.and_then(decode_remote) {
            Ok(cart) => Ok(self.replace(cart)),
            Err(_err) => {
                #[cfg(feature = "tracing")]
                {
                    tracing::warn!(
                        url = %url,
                        error = %_err,
                        "Remote cart add failed; adding locally"
                    );
                }
                self.add_item(product_id, quantity)?;
                Ok(self.snapshot())
            }
        }
    }

    fn replace(&self, cart: Cart) -> Cart {
        let mut current = self.lock();
        *current = cart;
        if let Err(_err) = self.persist(&current) {
            #[cfg(feature = "tracing")]
            {
                tracing::warn!(error = %_err, "Cart not persisted");
            }
        }
        current.clone()
    }

    fn mutate(&self, change: impl FnOnce(&mut Cart)) -> Result<(), StoreError> {
        let mut cart = self.lock();
        change(&mut cart);
        self.persist(&cart)
    }

    fn persist(&self, cart: &Cart) -> Result<(), StoreError> {
        let raw = serde_json::to_string(cart).map_err(|e| StoreError::Corrupt {
            key: CART_KEY.to_owned(),
            reason: e.to_string(),
        })?;
        self.store.set(CART_KEY, &raw)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Cart> {
        self.cart.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl std::fmt::Debug for CartStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &*self.lock())
            .finish_non_exhaustive()
    }
}

fn decode_remote(value: Value) -> Result<Cart, RemoteError> {
    Ok(serde_json::from_value::<RemoteCart>(value)?.into())
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_std::{memory::MemoryStore, testing::MockRest};

    fn store() -> (Arc<MemoryStore>, CartStore) {
        let backing = Arc::new(MemoryStore::new());
        let cart = CartStore::open(backing.clone());
        (backing, cart)
    }

    #[test]
    fn test_open_creates_empty_document() {
        let (backing, cart) = store();
        assert!(cart.items().is_empty());
        let stored: Cart = serde_json::from_str(&backing.get(CART_KEY).unwrap()).unwrap();
        assert_eq!(stored, Cart::default());
    }

    #[test]
    fn test_corrupt_document_starts_empty() {
        let backing = Arc::new(MemoryStore::new());
        backing.set(CART_KEY, "{not json").unwrap();
        let cart = CartStore::open(backing);
        assert_eq!(cart.item_count(), 0);
    }

    #[test]
    fn test_add_merges_and_persists() {
        let (backing, cart) = store();
        cart.add_item(4, 1).unwrap();
        cart.add_item(4, 2).unwrap();
        cart.add_item(9, 1).unwrap();

        assert_eq!(
            cart.items(),
            vec![
                CartItem { product_id: 4, quantity: 3 },
                CartItem { product_id: 9, quantity: 1 },
            ]
        );
        assert_eq!(cart.item_count(), 4);

        let reopened = CartStore::open(backing);
        assert_eq!(reopened.item_count(), 4);
    }

    #[test]
    fn test_update_to_zero_removes() {
        let (_, cart) = store();
        cart.add_item(4, 3).unwrap();
        cart.update_item(4, 5).unwrap();
        assert_eq!(cart.item_count(), 5);

        cart.update_item(4, 0).unwrap();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_clear_persists_an_empty_cart() {
        let (backing, cart) = store();
        cart.set_customer_id("17").unwrap();
        cart.add_item(4, 2).unwrap();
        cart.add_item(9, 1).unwrap();

        cart.clear().unwrap();
        assert!(cart.items().is_empty());

        let reopened = CartStore::open(backing);
        assert!(reopened.items().is_empty());
        assert_eq!(reopened.snapshot().customer_id.as_deref(), Some("17"));
        assert!(reopened.snapshot().updated_at.is_some());
    }

    #[test]
    fn test_update_unknown_product_is_ignored() {
        let (_, cart) = store();
        cart.update_item(42, 3).unwrap();
        assert!(cart.items().is_empty());
    }

    #[test]
    fn test_stored_document_uses_camel_case() {
        let (backing, cart) = store();
        cart.set_customer_id("17").unwrap();
        let raw: Value = serde_json::from_str(&backing.get(CART_KEY).unwrap()).unwrap();
        assert_eq!(raw["customerId"], "17");
        assert!(raw.get("items").is_some());
    }

    #[tokio::test]
    async fn test_fetch_remote_replaces_cart() {
        let (_, cart) = store();
        cart.add_item(1, 1).unwrap();
        let rest = MockRest::new();
        rest.respond(
            "GET",
            "/cart/customer/17",
            Ok(json!({
                "customer_id": 17,
                "items": [{ "product_id": 8, "quantity": 2 }],
                "updated_at": "2024-03-01T10:00:00Z"
            })),
        );

        let fetched = cart.fetch_remote(&rest, "17").await;
        assert_eq!(fetched.customer_id.as_deref(), Some("17"));
        assert_eq!(cart.items(), vec![CartItem { product_id: 8, quantity: 2 }]);
        assert!(fetched.updated_at.is_some());
    }

    #[tokio::test]
    async fn test_fetch_failure_keeps_local() {
        let (_, cart) = store();
        cart.add_item(1, 2).unwrap();
        let rest = MockRest::new();

        let kept = cart.fetch_remote(&rest, "17").await;
        assert_eq!(kept.item_count(), 2);
    }

    #[tokio::test]
    async fn test_add_remote_falls_back_to_local() {
        let (_, cart) = store();
        let rest = MockRest::new();
        rest.respond(
            "POST",
            "/cart/customer/17",
            Err(RemoteError::Network("offline".into())),
        );

        let result = cart.add_remote(&rest, "17", 5, 2).await.unwrap();
        assert_eq!(result.items, vec![CartItem { product_id: 5, quantity: 2 }]);
        assert_eq!(
            rest.calls()[0].1,
            Some(json!({ "product_id": 5, "quantity": 2 }))
        );
    }
}
