//! User activity: the signal that the session should stay alive.
//!
//! The host (a UI shell, a terminal loop, a test) publishes interaction
//! events on an [`ActivityBus`]. Each mounted countdown holds exactly one
//! subscription and drops it on teardown, so
//! [`ActivityBus::listener_count`] tells whether anything leaked.

use std::fmt;

use tokio::sync::broadcast;

use crate::SessionClock;

/// Default bus capacity. Bursts beyond this are reported to slow
/// listeners as a lag, which the countdown ignores.
const DEFAULT_CAPACITY: usize = 64;

/// The interaction kinds that count as activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActivityKind {
    PointerDown,
    KeyDown,
    Scroll,
    TouchStart,
}

impl fmt::Display for ActivityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PointerDown => write!(f, "pointerdown"),
            Self::KeyDown => write!(f, "keydown"),
            Self::Scroll => write!(f, "scroll"),
            Self::TouchStart => write!(f, "touchstart"),
        }
    }
}

/// Document-wide activity events.
///
/// Cheap to clone; every clone publishes to the same listeners.
#[derive(Debug, Clone)]
pub struct ActivityBus {
    tx: broadcast::Sender<ActivityKind>,
}

impl ActivityBus {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _rx) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    /// Publish an event. Returns how many listeners received it; zero when
    /// no countdown is mounted.
    pub fn emit(&self, kind: ActivityKind) -> usize {
        self.tx.send(kind).unwrap_or(0)
    }

    /// Live subscriptions.
    pub fn listener_count(&self) -> usize {
        self.tx.receiver_count()
    }

    /// Add a listener. Dropping the receiver removes it.
    pub fn subscribe(&self) -> broadcast::Receiver<ActivityKind> {
        self.tx.subscribe()
    }
}

impl Default for ActivityBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Decides whether a piece of activity rearms the clock.
///
/// The debounce is by elapsed amount, not by time since the last event:
/// activity only counts once the cycle is more than `min_elapsed_secs`
/// old, so a burst of keystrokes resets at most once a minute.
#[derive(Debug, Clone, Copy)]
pub struct ActivityResetter {
    min_elapsed_secs: u64,
    dismisses_modal: bool,
}

impl ActivityResetter {
    pub fn new(min_elapsed_secs: u64, dismisses_modal: bool) -> Self {
        Self {
            min_elapsed_secs,
            dismisses_modal,
        }
    }

    /// Whether activity right now should reset `clock`.
    pub fn should_reset(&self, clock: &SessionClock) -> bool {
        if clock.is_halted() {
            return false;
        }
        if clock.modal_visible() && !self.dismisses_modal {
            return false;
        }
        clock.elapsed_secs() > self.min_elapsed_secs
    }
}
