//! The session clock: remaining validity, in whole seconds.
//!
//! Pure state, no timers. The actor feeds it elapsed seconds and acts on
//! the [`ClockEvent`]s it returns; tests feed it directly.

use crate::{CountdownConfig, CountdownPhase, ThresholdMode};

/// A threshold crossing produced by [`SessionClock::advance`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockEvent {
    /// The passive-notice threshold was reached this cycle.
    WarningNotice { remaining_secs: u64 },
    /// The blocking-modal threshold was reached this cycle.
    ModalShown { remaining_secs: u64 },
    /// Remaining time hit zero. The modal is hidden and the clock halted.
    Expired { modal_was_visible: bool },
}

/// Countdown of remaining session time.
///
/// Each threshold fires at most once per cycle, gated by its flag rather
/// than by re-testing the current value. A cycle ends on [`reset`](Self::reset).
#[derive(Debug, Clone)]
pub struct SessionClock {
    total_secs: u64,
    warning_secs: u64,
    modal_secs: u64,
    mode: ThresholdMode,
    remaining_secs: u64,
    warning_shown: bool,
    modal_visible: bool,
    halted: bool,
}

impl SessionClock {
    /// A full clock for `config` (validated first).
    pub fn new(config: &CountdownConfig) -> Self {
        let config = config.clone().validated();
        Self {
            total_secs: config.total_secs,
            warning_secs: config.warning_secs,
            modal_secs: config.modal_secs,
            mode: config.threshold_mode,
            remaining_secs: config.total_secs,
            warning_shown: false,
            modal_visible: false,
            halted: false,
        }
    }

    /// One second passes.
    pub fn tick(&mut self) -> Vec<ClockEvent> {
        self.advance(1)
    }

    /// `secs` seconds pass at once.
    ///
    /// Remaining time saturates at zero. On reaching zero only
    /// [`ClockEvent::Expired`] is returned, even if thresholds were skipped
    /// on the way down. A halted clock ignores this call.
    pub fn advance(&mut self, secs: u64) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        if self.halted || secs == 0 {
            return events;
        }

        self.remaining_secs = self.remaining_secs.saturating_sub(secs);
        let remaining = self.remaining_secs;

        if remaining == 0 {
            let modal_was_visible = self.modal_visible;
            self.warning_shown = true;
            self.modal_visible = false;
            self.halted = true;
            events.push(ClockEvent::Expired { modal_was_visible });
            return events;
        }

        if !self.warning_shown && self.mode.reached(remaining, self.warning_secs) {
            self.warning_shown = true;
            events.push(ClockEvent::WarningNotice {
                remaining_secs: remaining,
            });
        }

        if !self.modal_visible && self.mode.reached(remaining, self.modal_secs) {
            self.modal_visible = true;
            events.push(ClockEvent::ModalShown {
                remaining_secs: remaining,
            });
        }

        events
    }

    /// Start a new cycle: full time, no notice fired, modal hidden.
    ///
    /// Returns `false` (and changes nothing) once the clock is halted.
    pub fn reset(&mut self) -> bool {
        if self.halted {
            return false;
        }
        self.remaining_secs = self.total_secs;
        self.warning_shown = false;
        self.modal_visible = false;
        true
    }

    /// Stop counting without expiring (logout, session ended elsewhere).
    /// Hides the modal.
    pub fn halt(&mut self) {
        self.halted = true;
        self.modal_visible = false;
    }

    pub fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub fn total_secs(&self) -> u64 {
        self.total_secs
    }

    /// Seconds gone in the current cycle.
    pub fn elapsed_secs(&self) -> u64 {
        self.total_secs - self.remaining_secs
    }

    pub fn warning_shown(&self) -> bool {
        self.warning_shown
    }

    pub fn modal_visible(&self) -> bool {
        self.modal_visible
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn is_expired(&self) -> bool {
        self.remaining_secs == 0
    }

    pub fn phase(&self) -> CountdownPhase {
        if self.is_expired() {
            CountdownPhase::Expired
        } else if self.halted {
            CountdownPhase::Stopped
        } else if self.modal_visible {
            CountdownPhase::Critical
        } else if self.warning_shown {
            CountdownPhase::Warned
        } else {
            CountdownPhase::Running
        }
    }

    /// Remaining time as `m:ss`.
    pub fn display(&self) -> String {
        format_time(self.remaining_secs)
    }
}

/// Formats seconds as `minutes:seconds`, seconds zero-padded to two digits.
///
/// ```rust
/// use sprintdesk_countdown::format_time;
///
/// assert_eq!(format_time(305), "5:05");
/// assert_eq!(format_time(1800), "30:00");
/// ```
pub fn format_time(secs: u64) -> String {
    format!("{}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    //! Unit tests for `SessionClock`.
    //!
    //! Naming: `test_{function}_{scenario}_{expected}`.

    use super::*;

    fn clock() -> SessionClock {
        SessionClock::new(&CountdownConfig::default())
    }

    fn exact_clock() -> SessionClock {
        SessionClock::new(&CountdownConfig {
            threshold_mode: ThresholdMode::Exact,
            ..CountdownConfig::default()
        })
    }

    /// Ticks until `remaining` and collects every event on the way.
    fn tick_to(clock: &mut SessionClock, remaining: u64) -> Vec<ClockEvent> {
        let mut events = Vec::new();
        while clock.remaining_secs() > remaining {
            events.extend(clock.tick());
        }
        events
    }

    // =====================================================================
    // format_time()
    // =====================================================================

    #[test]
    fn test_format_time_examples() {
        assert_eq!(format_time(305), "5:05");
        assert_eq!(format_time(59), "0:59");
        assert_eq!(format_time(0), "0:00");
        assert_eq!(format_time(247), "4:07");
    }

    // =====================================================================
    // tick()
    // =====================================================================

    #[test]
    fn test_new_clock_is_full() {
        let c = clock();
        assert_eq!(c.remaining_secs(), 1800);
        assert_eq!(c.elapsed_secs(), 0);
        assert_eq!(c.phase(), CountdownPhase::Running);
        assert_eq!(c.display(), "30:00");
    }

    #[test]
    fn test_tick_remaining_never_increases_or_goes_negative() {
        let mut c = clock();
        let mut previous = c.remaining_secs();

        for _ in 0..2000 {
            c.tick();
            assert!(c.remaining_secs() <= previous);
            previous = c.remaining_secs();
        }

        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn test_tick_warning_fires_once_at_900() {
        let mut c = clock();

        let events = tick_to(&mut c, 900);
        assert_eq!(
            events,
            vec![ClockEvent::WarningNotice { remaining_secs: 900 }]
        );
        assert!(c.warning_shown());

        let later = tick_to(&mut c, 301);
        assert!(later.is_empty(), "warning must not fire twice: {later:?}");
    }

    #[test]
    fn test_tick_modal_shows_once_at_300_and_stays() {
        let mut c = clock();
        tick_to(&mut c, 301);

        assert_eq!(
            c.tick(),
            vec![ClockEvent::ModalShown { remaining_secs: 300 }]
        );
        assert!(c.modal_visible());
        assert_eq!(c.phase(), CountdownPhase::Critical);

        let later = tick_to(&mut c, 1);
        assert!(later.is_empty());
        assert!(c.modal_visible(), "modal stays until a choice is made");
    }

    #[test]
    fn test_tick_reaching_zero_expires_once_and_hides_modal() {
        let mut c = clock();
        let events = tick_to(&mut c, 0);

        let expirations = events
            .iter()
            .filter(|e| matches!(e, ClockEvent::Expired { .. }))
            .count();
        assert_eq!(expirations, 1);
        assert_eq!(
            events.last(),
            Some(&ClockEvent::Expired {
                modal_was_visible: true
            })
        );
        assert!(!c.modal_visible());
        assert!(c.is_halted());
        assert!(c.is_expired());
        assert_eq!(c.phase(), CountdownPhase::Expired);

        assert!(c.tick().is_empty(), "expired clock stays quiet");
        assert_eq!(c.remaining_secs(), 0);
    }

    // =====================================================================
    // advance() — skipped ticks
    // =====================================================================

    #[test]
    fn test_advance_skipping_threshold_still_fires_at_or_below() {
        let mut c = clock();
        c.advance(895); // 905 left

        let events = c.advance(10); // jumps over 900

        assert_eq!(
            events,
            vec![ClockEvent::WarningNotice { remaining_secs: 895 }]
        );
    }

    #[test]
    fn test_advance_exact_mode_misses_skipped_threshold() {
        let mut c = exact_clock();
        c.advance(895);

        let events = c.advance(10);

        assert!(events.is_empty());
        assert!(!c.warning_shown());
    }

    #[test]
    fn test_exact_mode_fires_on_exact_tick() {
        let mut c = exact_clock();

        let events = tick_to(&mut c, 300);

        assert_eq!(
            events,
            vec![
                ClockEvent::WarningNotice { remaining_secs: 900 },
                ClockEvent::ModalShown { remaining_secs: 300 },
            ]
        );
    }

    #[test]
    fn test_advance_over_both_thresholds_fires_both() {
        let mut c = clock();

        let events = c.advance(1600);

        assert_eq!(
            events,
            vec![
                ClockEvent::WarningNotice { remaining_secs: 200 },
                ClockEvent::ModalShown { remaining_secs: 200 },
            ]
        );
    }

    #[test]
    fn test_advance_past_zero_only_expires() {
        let mut c = clock();

        let events = c.advance(5000);

        assert_eq!(
            events,
            vec![ClockEvent::Expired {
                modal_was_visible: false
            }]
        );
        assert_eq!(c.remaining_secs(), 0);
    }

    #[test]
    fn test_advance_zero_is_noop() {
        let mut c = clock();
        assert!(c.advance(0).is_empty());
        assert_eq!(c.remaining_secs(), 1800);
    }

    // =====================================================================
    // reset()
    // =====================================================================

    #[test]
    fn test_reset_restores_full_time_and_clears_flags() {
        for stop_at in [1799, 900, 450, 300, 1] {
            let mut c = clock();
            tick_to(&mut c, stop_at);

            assert!(c.reset());

            assert_eq!(c.remaining_secs(), 1800);
            assert!(!c.warning_shown());
            assert!(!c.modal_visible());
        }
    }

    #[test]
    fn test_reset_starts_a_new_cycle_that_warns_again() {
        let mut c = clock();
        tick_to(&mut c, 800);
        c.reset();

        let events = tick_to(&mut c, 900);

        assert_eq!(
            events,
            vec![ClockEvent::WarningNotice { remaining_secs: 900 }]
        );
    }

    #[test]
    fn test_reset_after_expiry_is_refused() {
        let mut c = clock();
        c.advance(1800);

        assert!(!c.reset());
        assert_eq!(c.remaining_secs(), 0);
    }

    // =====================================================================
    // halt()
    // =====================================================================

    #[test]
    fn test_halt_hides_modal_and_stops_ticking() {
        let mut c = clock();
        tick_to(&mut c, 200);

        c.halt();

        assert!(!c.modal_visible());
        assert_eq!(c.phase(), CountdownPhase::Stopped);
        assert!(c.tick().is_empty());
        assert_eq!(c.remaining_secs(), 200);
    }
}
