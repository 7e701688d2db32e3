//! User-visible notices and the blocking session modal.
//!
//! The session layer decides *what* to tell the user; a [`Notifier`]
//! decides how it looks. Toasts, dialogs, terminal lines, or a recording
//! in a test are all fine.

use std::fmt;
use std::time::Duration;

/// A passive, non-blocking message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: Option<String>,
    /// Auto-dismiss after this long. `None` leaves it to the presenter.
    pub duration: Option<Duration>,
}

impl Notice {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: None,
            duration: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// A button on the session modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModalAction {
    /// Rearm the countdown and close the modal.
    ExtendSession,
    /// Log out right away.
    LogoutNow,
}

impl ModalAction {
    /// Button label.
    pub fn label(self) -> &'static str {
        match self {
            Self::ExtendSession => "Extend Session",
            Self::LogoutNow => "Logout Now",
        }
    }
}

impl fmt::Display for ModalAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A blocking dialog.
///
/// When `dismissible` is `false` the presenter must not close it on an
/// outside click or escape key; only one of `actions` resolves it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModalDescriptor {
    pub title: String,
    pub body: String,
    pub actions: Vec<ModalAction>,
    pub dismissible: bool,
}

/// Shows notices and the session modal.
pub trait Notifier: Send + Sync + 'static {
    /// Show a passive notice.
    fn notice(&self, notice: Notice);

    /// Show a blocking modal.
    fn show_modal(&self, modal: ModalDescriptor);

    /// Close the modal shown by the last `show_modal`. Calling this with no
    /// modal open must be harmless.
    fn hide_modal(&self);
}
