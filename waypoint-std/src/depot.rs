//! # Event Depot
//!
//! A minimal synchronous publish/subscribe bus keyed by event name.
//!
//! Each controller owns one depot and shares clones of it with its own
//! views; clones point at the same subscription table. There is no global
//! instance.
//!
//! # Delivery
//!
//! - Listeners run in registration order, synchronously, on the caller's stack.
//! - Registering the same listener twice makes it fire twice.
//! - A listener that errors or panics is recorded in the [`DeliveryReport`]
//!   and the remaining listeners still run.
//! - Dispatch iterates a snapshot taken when `trigger` starts, so listeners
//!   may subscribe, unsubscribe or trigger again without deadlocking.
//!   Listeners added during a dispatch first fire on the next one.
//!
//! # Example
//!
//! ```rust,ignore
//! let depot = EventDepot::<CartEvent>::new();
//! depot.on("cart:add", |event: &CartEvent| println!("{event:?}"));
//! depot.trigger("cart:add", &CartEvent::Add { product_id: 4, quantity: 1 });
//! ```

use std::{
    any::Any,
    collections::HashMap,
    fmt,
    panic::{self, AssertUnwindSafe},
    sync::{Arc, Mutex, PoisonError},
};
use waypoint_core::{ErrorSignal, Listener, ListenerFailure, Message};

/// Identifies one registration, for [`EventDepot::off`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

struct Entry<P: Message> {
    id: ListenerId,
    listener: Arc<dyn Listener<P>>,
}

struct Table<P: Message> {
    next_id: u64,
    events: HashMap<String, Vec<Entry<P>>>,
}

/// What happened during one `trigger` call.
#[derive(Debug, Default)]
pub struct DeliveryReport {
    /// Number of listeners that were invoked.
    pub invoked: usize,
    /// Listeners that returned an error or panicked, in invocation order.
    pub failures: Vec<ListenerFailure>,
}

impl DeliveryReport {
    /// Number of listeners that completed without failing.
    pub fn delivered(&self) -> usize {
        self.invoked - self.failures.len()
    }

    /// True if no listener failed.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// A named-event publish/subscribe bus carrying payloads of type `P`.
pub struct EventDepot<P: Message> {
    table: Arc<Mutex<Table<P>>>,
}

impl<P: Message> EventDepot<P> {
    /// Create an empty depot.
    pub fn new() -> Self {
        Self {
            table: Arc::new(Mutex::new(Table {
                next_id: 0,
                events: HashMap::new(),
            })),
        }
    }

    /// Register a listener for `event`.
    pub fn on<L>(&self, event: impl Into<String>, listener: L) -> ListenerId
    where
        L: Listener<P>,
    {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let id = ListenerId(table.next_id);
        table.next_id += 1;
        table.events.entry(event.into()).or_default().push(Entry {
            id,
            listener: Arc::new(listener),
        });
        id
    }

    /// Alias of [`on`](Self::on).
    pub fn add_listener<L>(&self, event: impl Into<String>, listener: L) -> ListenerId
    where
        L: Listener<P>,
    {
        self.on(event, listener)
    }

    /// Remove one registration. Returns `false` if it was not found.
    pub fn off(&self, event: &str, id: ListenerId) -> bool {
        let mut table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(entries) = table.events.get_mut(event) else {
            return false;
        };
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;
        if entries.is_empty() {
            table.events.remove(event);
        }
        removed
    }

    /// Invoke every listener registered for `event`, in registration order.
    pub fn trigger(&self, event: &str, payload: &P) -> DeliveryReport {
        let snapshot: Vec<Arc<dyn Listener<P>>> = {
            let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
            table
                .events
                .get(event)
                .map(|entries| entries.iter().map(|e| e.listener.clone()).collect())
                .unwrap_or_default()
        };

        let mut report = DeliveryReport::default();
        for (index, listener) in snapshot.into_iter().enumerate() {
            report.invoked += 1;
            let delivery = panic::catch_unwind(AssertUnwindSafe(|| listener.on_event(payload)));
            let failure = match delivery {
                Ok(Ok(())) => continue,
                Ok(Err(source)) => ListenerFailure::Error {
                    event: event.to_owned(),
                    index,
                    source,
                },
                Err(panic) => ListenerFailure::Panic {
                    event: event.to_owned(),
                    index,
                    message: panic_message(panic.as_ref()),
                },
            };

            #[cfg(feature = "tracing")]
            {
                tracing::warn!(event, index, error = %failure, "Listener failed");
            }

            report.failures.push(failure);
        }
        report
    }

    /// Alias of [`trigger`](Self::trigger).
    pub fn fire(&self, event: &str, payload: &P) -> DeliveryReport {
        self.trigger(event, payload)
    }

    /// Number of listeners currently registered for `event`.
    pub fn listener_count(&self, event: &str) -> usize {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.events.get(event).map_or(0, Vec::len)
    }

    /// Check if no listener is registered for any event.
    pub fn is_empty(&self) -> bool {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        table.events.is_empty()
    }
}

impl<P: Message> Default for EventDepot<P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P: Message> Clone for EventDepot<P> {
    fn clone(&self) -> Self {
        Self {
            table: self.table.clone(),
        }
    }
}

impl<P: Message> fmt::Debug for EventDepot<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.lock().unwrap_or_else(PoisonError::into_inner);
        let mut events: Vec<_> = table.events.keys().collect();
        events.sort();
        f.debug_struct("EventDepot").field("events", &events).finish()
    }
}

/// The channel carrying [`ErrorSignal`]s to the message display.
pub type ErrorChannel = EventDepot<ErrorSignal>;

impl EventDepot<ErrorSignal> {
    /// Publish a signal under [`ErrorSignal::EVENT`].
    pub fn report(&self, signal: ErrorSignal) -> DeliveryReport {
        self.trigger(ErrorSignal::EVENT, &signal)
    }
}

pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
