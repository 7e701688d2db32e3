//! Fixed-interval tick scheduler for Sprintdesk.
//!
//! Drives the session countdown: one tick per interval (one second in
//! production), with explicit handling for ticks that arrive late, e.g.
//! after the host process was suspended or the runtime was starved.
//!
//! A late wake-up is reported, never hidden. Each [`TickInfo`] carries
//! `ticks_skipped`, so a consumer that counts down wall-clock time can
//! apply `1 + ticks_skipped` intervals at once instead of drifting.
//!
//! # Integration
//!
//! The scheduler is designed to sit inside an actor's `tokio::select!` loop:
//!
//! ```ignore
//! loop {
//!     tokio::select! {
//!         Some(cmd) = cmd_rx.recv() => { /* handle commands */ }
//!         info = scheduler.wait_for_tick() => {
//!             clock.advance(1 + info.ticks_skipped);
//!         }
//!     }
//! }
//! ```
//!
//! Dropping the scheduler (or the future returned by `wait_for_tick`)
//! cancels the pending timer; there is no background task to leak.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::time::{self, Instant};
use tracing::{debug, trace, warn};

// ---------------------------------------------------------------------------
// Configuration
// ---------------------------------------------------------------------------

/// What to do when a tick fires later than scheduled.
///
/// Serialized with a `kind` tag, e.g. `{"kind":"catch_up","max_catchup":3}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TickPolicy {
    /// Report the missed tick(s) in `ticks_skipped` and keep the original
    /// cadence, so no wall-clock time is lost across a late wake-up.
    #[default]
    Skip,
    /// Fire up to `max_catchup` missed ticks back to back, then skip the rest.
    CatchUp {
        /// Hard cap on consecutive catch-up ticks.
        max_catchup: u32,
    },
    /// Never skip. Every missed tick fires in turn at the original cadence,
    /// back to back until the schedule is current again.
    Drop,
}

/// Full configuration for the tick scheduler.
#[derive(Debug, Clone)]
pub struct TickConfig {
    /// Time between ticks.
    pub interval: Duration,
    /// Late-tick handling policy.
    pub policy: TickPolicy,
}

impl Default for TickConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_secs(1),
            policy: TickPolicy::default(),
        }
    }
}

impl TickConfig {
    /// Shortest interval the scheduler accepts.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Create a config for a specific interval with the default policy.
    pub fn every(interval: Duration) -> Self {
        Self {
            interval,
            ..Default::default()
        }
    }

    /// Clamp any out-of-range values so the config is safe to use.
    ///
    /// Called automatically by [`TickScheduler::new`]. An interval below
    /// [`Self::MIN_INTERVAL`] (including zero) is raised to it.
    pub fn validated(mut self) -> Self {
        if self.interval < Self::MIN_INTERVAL {
            warn!(
                interval_ms = self.interval.as_secs_f64() * 1000.0,
                "tick interval below minimum, clamping"
            );
            self.interval = Self::MIN_INTERVAL;
        }
        self
    }
}

// ---------------------------------------------------------------------------
// Tick info (returned to caller each tick)
// ---------------------------------------------------------------------------

/// Information about a fired tick, returned by [`TickScheduler::wait_for_tick`].
#[derive(Debug, Clone)]
pub struct TickInfo {
    /// Monotonically increasing tick number (starts at 1).
    pub tick: u64,
    /// The configured interval.
    pub interval: Duration,
    /// `true` if this tick fired more than 10% of an interval late.
    pub overrun: bool,
    /// Whole intervals that elapsed without a tick of their own.
    /// Always 0 under [`TickPolicy::Drop`].
    pub ticks_skipped: u64,
}

impl TickInfo {
    /// Intervals this tick stands for: itself plus any skipped ones.
    pub fn elapsed_ticks(&self) -> u64 {
        1 + self.ticks_skipped
    }
}

// ---------------------------------------------------------------------------
// Metrics
// ---------------------------------------------------------------------------

/// Running totals for a scheduler.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickMetrics {
    /// Total ticks fired.
    pub total_ticks: u64,
    /// Ticks that fired late.
    pub total_overruns: u64,
    /// Intervals reported as skipped.
    pub total_skipped: u64,
}

// ---------------------------------------------------------------------------
// Scheduler
// ---------------------------------------------------------------------------

/// Fixed-interval tick scheduler.
///
/// One `TickScheduler` per countdown. The first tick is due one interval
/// after construction.
pub struct TickScheduler {
    config: TickConfig,
    tick_count: u64,
    /// When the next tick should fire.
    next_tick: Instant,
    paused: bool,
    metrics: TickMetrics,
}

impl TickScheduler {
    /// Create a new scheduler from config.
    pub fn new(config: TickConfig) -> Self {
        let config = config.validated();
        let next_tick = Instant::now() + config.interval;

        debug!(
            interval_ms = config.interval.as_secs_f64() * 1000.0,
            policy = ?config.policy,
            "tick scheduler created"
        );

        Self {
            config,
            tick_count: 0,
            next_tick,
            paused: false,
            metrics: TickMetrics::default(),
        }
    }

    /// Create a scheduler with the given interval and default policy.
    pub fn every(interval: Duration) -> Self {
        Self::new(TickConfig::every(interval))
    }

    /// Wait until the next tick is due. Returns [`TickInfo`] for the tick.
    ///
    /// While paused this future pends forever; `tokio::select!` still
    /// processes its other branches.
    pub async fn wait_for_tick(&mut self) -> TickInfo {
        if self.paused {
            std::future::pending::<()>().await;
        }

        let next = self.next_tick;
        let interval = self.config.interval;

        time::sleep_until(next).await;

        let now = Instant::now();
        self.tick_count += 1;

        let late_by = now.saturating_duration_since(next);
        let overrun = late_by > interval / 10;
        let behind = if overrun {
            (late_by.as_nanos() / interval.as_nanos()) as u64
        } else {
            0
        };
        let mut ticks_skipped = 0u64;

        self.next_tick = match self.config.policy {
            TickPolicy::Skip => {
                ticks_skipped = behind;
                if behind > 0 {
                    warn!(
                        tick = self.tick_count,
                        skipped = behind,
                        late_ms = late_by.as_secs_f64() * 1000.0,
                        "tick overrun, skipping ahead"
                    );
                }
                next + interval.saturating_mul(u32::try_from(behind + 1).unwrap_or(u32::MAX))
            }
            TickPolicy::CatchUp { max_catchup } => {
                ticks_skipped = behind.saturating_sub(u64::from(max_catchup));
                if behind > 0 {
                    warn!(
                        tick = self.tick_count,
                        behind,
                        catching_up = behind.min(u64::from(max_catchup)),
                        skipping = ticks_skipped,
                        "tick overrun, catch-up capped at {max_catchup}"
                    );
                }
                // The capped ticks stay overdue and fire back to back.
                next + interval.saturating_mul(u32::try_from(ticks_skipped + 1).unwrap_or(u32::MAX))
            }
            TickPolicy::Drop => {
                if overrun {
                    warn!(
                        tick = self.tick_count,
                        late_ms = late_by.as_secs_f64() * 1000.0,
                        "tick overrun, keeping original cadence"
                    );
                }
                next + interval
            }
        };

        if overrun {
            self.metrics.total_overruns += 1;
        }
        self.metrics.total_skipped += ticks_skipped;
        self.metrics.total_ticks += 1;

        trace!(tick = self.tick_count, overrun, ticks_skipped, "tick fired");

        TickInfo {
            tick: self.tick_count,
            interval,
            overrun,
            ticks_skipped,
        }
    }

    /// Stop ticking. `wait_for_tick` pends until the scheduler is dropped.
    ///
    /// Safe to call multiple times.
    pub fn pause(&mut self) {
        if !self.paused {
            self.paused = true;
            debug!(tick = self.tick_count, "tick scheduler paused");
        }
    }

    /// Restart the cadence: the next tick is due one full interval from now.
    ///
    /// Used when the countdown is rearmed so the first second after a reset
    /// is a whole second.
    pub fn rearm(&mut self) {
        self.next_tick = Instant::now() + self.config.interval;
    }

    /// Whether the scheduler is currently paused.
    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Ticks fired so far.
    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    /// Snapshot of current metrics.
    pub fn metrics(&self) -> &TickMetrics {
        &self.metrics
    }

    /// The configured interval.
    pub fn interval(&self) -> Duration {
        self.config.interval
    }

    /// The configured late-tick policy.
    pub fn policy(&self) -> TickPolicy {
        self.config.policy
    }
}
