//! REST backend collaborator.
//!
//! Controllers consume `/login`, `/user`, `/course/*`, `/module/*`,
//! `/element/*`, `/product*`, `/cart/customer/:id` and `/usercourse`.
//! Every method resolves to [`RemoteError`] on a non-2xx status or a network
//! failure; callers decide whether a local fallback exists.

use crate::error::RemoteError;
use async_trait::async_trait;
use serde_json::Value;

/// An opaque JSON-over-HTTP client.
#[async_trait]
pub trait RestClient: Send + Sync {
    /// `GET url`, decoding a JSON body.
    async fn get_json(&self, url: &str) -> Result<Value, RemoteError>;

    /// `GET url`, returning the body as text.
    async fn get_text(&self, url: &str) -> Result<String, RemoteError>;

    /// `POST url` with a JSON body, decoding a JSON response.
    async fn post_json(&self, url: &str, body: &Value) -> Result<Value, RemoteError>;

    /// `PUT url` with a JSON body, decoding a JSON response.
    async fn put_json(&self, url: &str, body: &Value) -> Result<Value, RemoteError>;

    /// `DELETE url` with a JSON body, returning the body as text.
    async fn delete(&self, url: &str, body: &Value) -> Result<String, RemoteError>;
}
