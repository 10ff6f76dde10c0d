//! Template engine collaborator.
//!
//! Treated as a pure function: `compile(text)` yields a render function,
//! `render(context)` yields markup.

use crate::error::TemplateError;
use serde_json::Value;
use std::sync::Arc;

/// A compiled template.
pub type RenderFn = Arc<dyn Fn(&Value) -> Result<String, TemplateError> + Send + Sync>;

/// Compiles template text.
pub trait TemplateEngine: Send + Sync {
    /// Compile `source` into a reusable render function.
    fn compile(&self, source: &str) -> Result<RenderFn, TemplateError>;
}
