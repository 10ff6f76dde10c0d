//! The message display.
//!
//! Subscribes to the error channel and turns [`ErrorSignal`]s into dialogs.
//! An expired session shows a short countdown and then sends the user to
//! the login page.

use std::{sync::Arc, time::Duration};
use waypoint_core::{Dialog, DialogRequest, ErrorSignal, Icon, SignalKind};
use waypoint_std::{ErrorChannel, ListenerId};

/// Where an expired session is sent when its dialog times out.
pub const LOGIN_PAGE: &str = "/index.html";

/// How long the session-expired dialog stays open.
pub const SESSION_DIALOG_TIMER: Duration = Duration::from_millis(2000);

/// Shows error signals through a [`Dialog`].
pub struct MessageDisplay {
    channel: ErrorChannel,
    listener: ListenerId,
}

impl MessageDisplay {
    /// Subscribe `dialog` to the `error` event on `channel`.
    pub fn attach(channel: &ErrorChannel, dialog: Arc<dyn Dialog>) -> Self {
        let listener = channel.on(ErrorSignal::EVENT, move |signal: &ErrorSignal| {
            display_error(dialog.as_ref(), signal);
        });
        Self {
            channel: channel.clone(),
            listener,
        }
    }

    /// Stop displaying signals. Returns `false` if already detached.
    pub fn detach(&self) -> bool {
        self.channel.off(ErrorSignal::EVENT, self.listener)
    }
}

impl std::fmt::Debug for MessageDisplay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageDisplay")
            .field("listener", &self.listener)
            .finish_non_exhaustive()
    }
}

/// The dialog for `signal`, or `None` for kinds that are not shown.
pub fn dialog_for(signal: &ErrorSignal) -> Option<DialogRequest> {
    match signal.kind {
        SignalKind::SessionExpired => Some(DialogRequest {
            title: signal.error.clone(),
            // The empty <b> receives the countdown.
            html: format!("{}<br> <b></b>", signal.message),
            icon: Icon::Error,
            timer: Some(SESSION_DIALOG_TIMER),
            redirect_on_timeout: Some(LOGIN_PAGE.to_owned()),
        }),
        SignalKind::RouteNotFound | SignalKind::Uncaught => Some(DialogRequest {
            title: signal.error.clone(),
            html: signal.message.clone(),
            icon: Icon::Warning,
            timer: None,
            redirect_on_timeout: None,
        }),
        SignalKind::RemoteRequestFailed => None,
    }
}

/// Show `signal` on `dialog`. Returns whether anything was shown.
pub fn display_error(dialog: &dyn Dialog, signal: &ErrorSignal) -> bool {
    match dialog_for(signal) {
        Some(request) => {
            dialog.show(request);
            true
        }
        None => {
            #[cfg(feature = "tracing")]
            {
                tracing::debug!(kind = ?signal.kind, "Signal not displayed");
            }
            false
        }
    }
}
