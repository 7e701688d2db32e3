//! Countdown configuration and phases.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use sprintdesk_tick::{TickConfig, TickPolicy};
use tracing::warn;

// ---------------------------------------------------------------------------
// ThresholdMode
// ---------------------------------------------------------------------------

/// How a threshold counts as "reached".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThresholdMode {
    /// Fires only on the tick that lands exactly on the threshold. A tick
    /// that skips over it (suspended host) never fires.
    Exact,
    /// Fires on the first tick at or below the threshold.
    #[default]
    AtOrBelow,
}

impl ThresholdMode {
    /// Whether `remaining` counts as having reached `threshold`.
    pub fn reached(self, remaining: u64, threshold: u64) -> bool {
        match self {
            Self::Exact => remaining == threshold,
            Self::AtOrBelow => remaining <= threshold,
        }
    }
}

// ---------------------------------------------------------------------------
// CountdownConfig
// ---------------------------------------------------------------------------

/// Session countdown settings.
///
/// Defaults: a 30-minute session, a passive notice at 15 minutes left, the
/// blocking modal at 5 minutes left, and activity only rearming the clock
/// once more than a minute of the cycle has gone by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountdownConfig {
    /// Full session length in seconds.
    pub total_secs: u64,

    /// Remaining seconds at which the passive notice fires.
    pub warning_secs: u64,

    /// Remaining seconds at which the blocking modal appears.
    pub modal_secs: u64,

    /// Activity resets the clock only after more than this many seconds
    /// of the current cycle have elapsed.
    pub activity_reset_after_secs: u64,

    /// How long the passive notice stays up, in milliseconds.
    pub notice_duration_ms: u64,

    /// Time between ticks in milliseconds. Each tick is one second of
    /// session time; shrink it only for demos and tests.
    pub tick_interval_ms: u64,

    pub threshold_mode: ThresholdMode,

    /// How a late wake-up (suspended host) is applied. `Skip`, the default,
    /// counts the missed seconds in one tick. `CatchUp` and `Drop` replay
    /// them as separate ticks.
    pub tick_policy: TickPolicy,

    /// Whether document activity may close the blocking modal. Off by
    /// default: the modal resolves only through its two buttons.
    pub activity_dismisses_modal: bool,
}

impl Default for CountdownConfig {
    fn default() -> Self {
        Self {
            total_secs: 1800,
            warning_secs: 900,
            modal_secs: 300,
            activity_reset_after_secs: 60,
            notice_duration_ms: 10_000,
            tick_interval_ms: 1000,
            threshold_mode: ThresholdMode::default(),
            tick_policy: TickPolicy::default(),
            activity_dismisses_modal: false,
        }
    }
}

impl CountdownConfig {
    /// Clamp values so the thresholds are ordered and nothing is zero
    /// that must not be.
    ///
    /// Rules:
    /// - `total_secs` and `tick_interval_ms` are at least 1.
    /// - `warning_secs` ≤ `total_secs`, `modal_secs` ≤ `warning_secs`.
    pub fn validated(mut self) -> Self {
        if self.total_secs == 0 {
            warn!("countdown total_secs is 0, using 1");
            self.total_secs = 1;
        }
        if self.tick_interval_ms == 0 {
            warn!("countdown tick_interval_ms is 0, using 1");
            self.tick_interval_ms = 1;
        }
        if self.warning_secs > self.total_secs {
            warn!(
                warning_secs = self.warning_secs,
                total_secs = self.total_secs,
                "warning threshold exceeds session length, clamping"
            );
            self.warning_secs = self.total_secs;
        }
        if self.modal_secs > self.warning_secs {
            warn!(
                modal_secs = self.modal_secs,
                warning_secs = self.warning_secs,
                "modal threshold exceeds warning threshold, clamping"
            );
            self.modal_secs = self.warning_secs;
        }
        self
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Scheduler settings for the countdown actor.
    pub fn tick_config(&self) -> TickConfig {
        TickConfig {
            interval: self.tick_interval(),
            policy: self.tick_policy,
        }
    }

    pub fn notice_duration(&self) -> Duration {
        Duration::from_millis(self.notice_duration_ms)
    }
}

// ---------------------------------------------------------------------------
// CountdownPhase
// ---------------------------------------------------------------------------

/// Where a countdown cycle stands.
///
/// ```text
/// Running → Warned → Critical → Expired
///    ↑         │         │
///    └─(reset)─┴─────────┘        Stopped (logout / session ended elsewhere)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CountdownPhase {
    /// Counting, nothing shown yet.
    Running,
    /// The passive notice has fired.
    Warned,
    /// The blocking modal is up.
    Critical,
    /// Reached zero.
    Expired,
    /// Halted before reaching zero.
    Stopped,
}

impl CountdownPhase {
    /// Returns `true` while the clock is still counting.
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running | Self::Warned | Self::Critical)
    }
}

impl fmt::Display for CountdownPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Running => write!(f, "Running"),
            Self::Warned => write!(f, "Warned"),
            Self::Critical => write!(f, "Critical"),
            Self::Expired => write!(f, "Expired"),
            Self::Stopped => write!(f, "Stopped"),
        }
    }
}
