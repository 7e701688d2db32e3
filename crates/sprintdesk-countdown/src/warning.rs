//! Turns clock events into things the user sees.

use std::sync::Arc;
use std::time::Duration;

use sprintdesk_session::{ModalAction, ModalDescriptor, Notice, Notifier};

use crate::{ClockEvent, format_time};

/// Presents threshold crossings through a [`Notifier`].
///
/// - `WarningNotice` → a passive notice that dismisses itself.
/// - `ModalShown` → the non-dismissible "Extend Session / Logout Now" modal.
/// - `Expired` → the modal goes away, if it was up.
#[derive(Clone)]
pub struct WarningTrigger {
    notifier: Arc<dyn Notifier>,
    notice_duration: Duration,
}

impl WarningTrigger {
    pub fn new(notifier: Arc<dyn Notifier>, notice_duration: Duration) -> Self {
        Self {
            notifier,
            notice_duration,
        }
    }

    pub fn present(&self, event: &ClockEvent) {
        match *event {
            ClockEvent::WarningNotice { remaining_secs } => {
                self.notifier
                    .notice(warning_notice(remaining_secs, self.notice_duration));
            }
            ClockEvent::ModalShown { remaining_secs } => {
                self.notifier.show_modal(session_modal(remaining_secs));
            }
            ClockEvent::Expired { modal_was_visible } => {
                if modal_was_visible {
                    self.notifier.hide_modal();
                }
            }
        }
    }

    /// Close the modal (extend, reset, logout, teardown).
    pub fn hide_modal(&self) {
        self.notifier.hide_modal();
    }
}

/// "Session expiring soon", with the remaining minutes rounded up.
pub fn warning_notice(remaining_secs: u64, duration: Duration) -> Notice {
    let minutes = remaining_secs.div_ceil(60);
    let unit = if minutes == 1 { "minute" } else { "minutes" };
    Notice::new("Session expiring soon")
        .with_description(format!("{minutes} {unit} remaining"))
        .with_duration(duration)
}

/// The blocking session modal. Exactly two actions, not dismissible.
pub fn session_modal(remaining_secs: u64) -> ModalDescriptor {
    ModalDescriptor {
        title: "Session about to expire".to_string(),
        body: format!(
            "Your session will expire in {}. Extend it to keep working.",
            format_time(remaining_secs)
        ),
        actions: vec![ModalAction::ExtendSession, ModalAction::LogoutNow],
        dismissible: false,
    }
}
