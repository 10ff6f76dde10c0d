//! Modal dialog collaborator.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Icon shown in a dialog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Icon {
    /// Red cross.
    Error,
    /// Amber exclamation mark.
    Warning,
    /// Green tick.
    Success,
    /// Blue `i`.
    Info,
}

/// Everything a dialog library needs to show one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialogRequest {
    /// Title line.
    pub title: String,
    /// HTML body.
    pub html: String,
    /// Icon.
    pub icon: Icon,
    /// Auto-close delay; `None` waits for the user.
    pub timer: Option<Duration>,
    /// Location to load when the timer closes the dialog.
    pub redirect_on_timeout: Option<String>,
}

/// A modal/alert dialog library.
pub trait Dialog: Send + Sync {
    /// Show the dialog. The implementation owns the timer and the redirect.
    fn show(&self, request: DialogRequest);
}
