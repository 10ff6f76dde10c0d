//! The cart page controller.

use super::{events::CartEvent, store::CartStore};
use crate::{controller::Controller, view::View};
use serde_json::json;
use std::sync::Arc;
use waypoint_core::{
    ErrorSignal, HandlerOutcome, KeyValueStore, NavigationRequest, RestClient, Spawner,
};
use waypoint_std::{ErrorChannel, EventDepot};

/// Storage key holding the signed-in customer's id.
pub const CUSTOMER_KEY: &str = "userId";

/// Collaborators shared by the controller and its depot listeners.
#[derive(Clone)]
struct Shared {
    cart: Arc<CartStore>,
    store: Arc<dyn KeyValueStore>,
    rest: Arc<dyn RestClient>,
    spawner: Arc<dyn Spawner>,
}

impl Shared {
    fn customer_id(&self) -> Option<String> {
        self.store.get(CUSTOMER_KEY).filter(|id| !id.is_empty())
    }

    fn on_add(&self, product_id: u64, quantity: u32) {
        match self.customer_id() {
            Some(customer) => {
                let shared = self.clone();
                self.spawner.spawn(Box::pin(async move {
                    let added = shared
                        .cart
                        .add_remote(shared.rest.as_ref(), &customer, product_id, quantity)
                        .await;
                    if let Err(_err) = added {
                        #[cfg(feature = "tracing")]
                        {
                            tracing::warn!(error = %_err, "Cart add not persisted");
                        }
                    }
                }));
            }
            None => {
                if let Err(_err) = self.cart.add_item(product_id, quantity) {
                    #[cfg(feature = "tracing")]
                    {
                        tracing::warn!(error = %_err, "Cart add not persisted");
                    }
                }
            }
        }
    }
}

/// Renders the cart and applies `cart:*` events raised by its view.
pub struct CartController {
    depot: EventDepot<CartEvent>,
    shared: Shared,
    view: View,
    errors: ErrorChannel,
}

impl CartController {
    /// Create the controller and subscribe it to its own depot. Render
    /// failures are reported on `errors`.
    pub fn new(
        cart: Arc<CartStore>,
        store: Arc<dyn KeyValueStore>,
        rest: Arc<dyn RestClient>,
        spawner: Arc<dyn Spawner>,
        view: View,
        errors: ErrorChannel,
    ) -> Self {
        let shared = Shared {
            cart,
            store,
            rest,
            spawner,
        };
        let depot = EventDepot::new();

        let on_add = shared.clone();
        depot.on(CartEvent::ADD, move |event: &CartEvent| {
            if let CartEvent::Add {
                product_id,
                quantity,
            } = *event
            {
                on_add.on_add(product_id, quantity);
            }
        });

        let on_remove = shared.cart.clone();
        depot.on(CartEvent::REMOVE, move |event: &CartEvent| match *event {
            CartEvent::Remove { product_id } => on_remove.remove_item(product_id),
            _ => Ok(()),
        });

        let on_update = shared.cart.clone();
        depot.on(CartEvent::UPDATE, move |event: &CartEvent| match *event {
            CartEvent::Update {
                product_id,
                quantity,
            } => on_update.update_item(product_id, quantity),
            _ => Ok(()),
        });

        Self {
            depot,
            shared,
            view,
            errors,
        }
    }

    /// The depot views publish cart events on.
    pub fn depot(&self) -> &EventDepot<CartEvent> {
        &self.depot
    }

    /// The cart being rendered.
    pub fn cart(&self) -> &Arc<CartStore> {
        &self.shared.cart
    }

    /// Publish `event` under its own name.
    pub fn dispatch(&self, event: CartEvent) {
        let report = self.depot.trigger(event.name(), &event);
        if !report.is_clean() {
            #[cfg(feature = "tracing")]
            {
                tracing::warn!(failures = report.failures.len(), "Cart event not fully applied");
            }
        }
    }
}

impl Controller for CartController {
    fn load(&self, _request: NavigationRequest) -> HandlerOutcome {
        let shared = self.shared.clone();
        let view = self.view.clone();
        let errors = self.errors.clone();
        HandlerOutcome::pending(async move {
            if let Some(customer) = shared.customer_id() {
                shared.cart.fetch_remote(shared.rest.as_ref(), &customer).await;
            }
            let cart = shared.cart.snapshot();
            let context = json!({
                "items": cart.items,
                "itemCount": cart.item_count(),
            });
            if let Err(err) = view.render(&context) {
                #[cfg(feature = "tracing")]
                {
                    tracing::warn!(error = %err, "Cart render failed");
                }
                errors.report(ErrorSignal::uncaught(err.to_string()));
            }
        })
    }
}

impl std::fmt::Debug for CartController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartController")
            .field("depot", &self.depot)
            .field("view", &self.view)
            .finish_non_exhaustive()
    }
}
