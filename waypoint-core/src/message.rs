//! Message trait for payload types.

/// A marker trait for payloads carried through Waypoint.
///
/// Messages must be `Send + Sync + 'static` so that an Event Depot can be
/// shared between a controller and its views.
///
/// # Example
///
/// ```rust,ignore
/// #[derive(Clone)]
/// enum CartEvent { Add { product_id: u64, quantity: u32 } }
///
/// impl Message for CartEvent {}
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a valid Message",
    label = "must be `Send + Sync + 'static`",
    note = "Payloads published through an Event Depot must be thread-safe and static."
)]
pub trait Message: Send + Sync + 'static {}

// Common Message implementations
impl Message for () {}
impl Message for bool {}
impl Message for u32 {}
impl Message for u64 {}
impl Message for i64 {}
impl Message for usize {}
impl Message for String {}
impl Message for &'static str {}
impl Message for serde_json::Value {}
impl<T: Message> Message for Box<T> {}
impl<T: Message> Message for std::sync::Arc<T> {}
impl<T: Message> Message for Vec<T> {}
impl<T: Message> Message for Option<T> {}
