//! Integration tests for the fixed-interval tick scheduler.
//!
//! Uses `start_paused = true` so Tokio's clock only moves when every task
//! is idle (auto-advance) or when a test calls `tokio::time::advance`.

use std::time::Duration;

use sprintdesk_tick::{TickConfig, TickPolicy, TickScheduler};

// =========================================================================
// Helpers
// =========================================================================

fn one_second() -> TickConfig {
    TickConfig::every(Duration::from_secs(1))
}

// =========================================================================
// TickConfig
// =========================================================================

#[test]
fn test_default_config_is_one_second_skip() {
    let cfg = TickConfig::default();
    assert_eq!(cfg.interval, Duration::from_secs(1));
    assert_eq!(cfg.policy, TickPolicy::Skip);
}

#[test]
fn test_policy_deserializes_from_tagged_json() {
    let skip: TickPolicy = serde_json::from_str(r#"{"kind":"skip"}"#).unwrap();
    let catch_up: TickPolicy =
        serde_json::from_str(r#"{"kind":"catch_up","max_catchup":3}"#).unwrap();
    let drop: TickPolicy = serde_json::from_str(r#"{"kind":"drop"}"#).unwrap();

    assert_eq!(skip, TickPolicy::Skip);
    assert_eq!(catch_up, TickPolicy::CatchUp { max_catchup: 3 });
    assert_eq!(drop, TickPolicy::Drop);
}

#[test]
fn test_validated_clamps_zero_interval() {
    let cfg = TickConfig::every(Duration::ZERO).validated();
    assert_eq!(cfg.interval, TickConfig::MIN_INTERVAL);
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_initial_state() {
    let s = TickScheduler::new(one_second());
    assert_eq!(s.tick_count(), 0);
    assert_eq!(s.interval(), Duration::from_secs(1));
    assert_eq!(s.policy(), TickPolicy::Skip);
    assert!(!s.is_paused());
    assert_eq!(s.metrics().total_ticks, 0);
}

// =========================================================================
// Tick firing
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_wait_for_tick_fires_after_one_interval() {
    let start = tokio::time::Instant::now();
    let mut s = TickScheduler::new(one_second());

    let info = s.wait_for_tick().await;

    assert_eq!(info.tick, 1);
    assert_eq!(info.interval, Duration::from_secs(1));
    assert!(!info.overrun);
    assert_eq!(info.ticks_skipped, 0);
    assert_eq!(info.elapsed_ticks(), 1);
    assert_eq!(start.elapsed(), Duration::from_secs(1));
}

#[tokio::test(start_paused = true)]
async fn test_multiple_ticks_increment_monotonically() {
    let mut s = TickScheduler::every(Duration::from_millis(250));

    for expected in 1..=5 {
        let info = s.wait_for_tick().await;
        assert_eq!(info.tick, expected);
    }
    assert_eq!(s.tick_count(), 5);
    assert_eq!(s.metrics().total_ticks, 5);
}

// =========================================================================
// Late ticks
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_skip_policy_reports_skipped_intervals() {
    let mut s = TickScheduler::new(one_second());

    // Simulate a suspended host: 3.5 s pass before we poll again.
    tokio::time::advance(Duration::from_millis(3500)).await;
    let info = s.wait_for_tick().await;

    assert!(info.overrun);
    assert_eq!(info.ticks_skipped, 2);
    assert_eq!(info.elapsed_ticks(), 3);
    assert_eq!(s.metrics().total_overruns, 1);
    assert_eq!(s.metrics().total_skipped, 2);
}

#[tokio::test(start_paused = true)]
async fn test_skip_policy_keeps_original_cadence() {
    let start = tokio::time::Instant::now();
    let mut s = TickScheduler::new(one_second());
    tokio::time::advance(Duration::from_millis(3500)).await;
    let first = s.wait_for_tick().await;

    let info = s.wait_for_tick().await;

    // Ticks stay on whole seconds: 1..=3 were reported at 3.5 s, 4 is due at 4 s.
    assert!(!info.overrun);
    assert_eq!(start.elapsed(), Duration::from_secs(4));
    assert_eq!(first.elapsed_ticks() + info.elapsed_ticks(), 4);
}

#[tokio::test(start_paused = true)]
async fn test_skip_policy_repeated_suspensions_lose_no_time() {
    let start = tokio::time::Instant::now();
    let mut s = TickScheduler::new(one_second());
    let mut elapsed = 0;

    for _ in 0..4 {
        tokio::time::advance(Duration::from_millis(2900)).await;
        elapsed += s.wait_for_tick().await.elapsed_ticks();
    }
    while start.elapsed() < Duration::from_secs(20) {
        elapsed += s.wait_for_tick().await.elapsed_ticks();
    }

    assert_eq!(elapsed, 20, "one reported interval per wall-clock second");
}

#[tokio::test(start_paused = true)]
async fn test_drop_policy_never_reports_skips() {
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::Drop,
        ..one_second()
    });

    tokio::time::advance(Duration::from_millis(3500)).await;
    let info = s.wait_for_tick().await;

    assert!(info.overrun);
    assert_eq!(info.ticks_skipped, 0);
}

#[tokio::test(start_paused = true)]
async fn test_catchup_policy_skips_beyond_cap() {
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::CatchUp { max_catchup: 1 },
        ..one_second()
    });

    tokio::time::advance(Duration::from_millis(3500)).await;
    let info = s.wait_for_tick().await;

    // Two intervals behind, one may be caught up, one is skipped.
    assert!(info.overrun);
    assert_eq!(info.ticks_skipped, 1);
}

#[tokio::test(start_paused = true)]
async fn test_catchup_policy_replays_capped_ticks_without_losing_time() {
    let start = tokio::time::Instant::now();
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::CatchUp { max_catchup: 1 },
        ..one_second()
    });

    tokio::time::advance(Duration::from_millis(3500)).await;
    let first = s.wait_for_tick().await;
    let caught_up = s.wait_for_tick().await;

    assert_eq!(first.elapsed_ticks(), 2);
    assert_eq!(caught_up.elapsed_ticks(), 1);
    assert_eq!(start.elapsed(), Duration::from_millis(3500));

    s.wait_for_tick().await;
    assert_eq!(start.elapsed(), Duration::from_secs(4));
}

#[tokio::test(start_paused = true)]
async fn test_drop_policy_fires_every_missed_tick() {
    let start = tokio::time::Instant::now();
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::Drop,
        ..one_second()
    });

    tokio::time::advance(Duration::from_millis(3500)).await;
    for _ in 0..3 {
        assert_eq!(s.wait_for_tick().await.elapsed_ticks(), 1);
    }

    assert_eq!(start.elapsed(), Duration::from_millis(3500));
    assert_eq!(s.tick_count(), 3);
}

#[tokio::test(start_paused = true)]
async fn test_catchup_policy_normal_tick() {
    let mut s = TickScheduler::new(TickConfig {
        policy: TickPolicy::CatchUp { max_catchup: 3 },
        ..one_second()
    });

    let info = s.wait_for_tick().await;
    assert!(!info.overrun);
    assert_eq!(info.ticks_skipped, 0);
}

// =========================================================================
// Pause / Rearm
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_pause_prevents_ticks() {
    let mut s = TickScheduler::new(one_second());
    s.wait_for_tick().await;

    s.pause();
    assert!(s.is_paused());

    let result = tokio::time::timeout(Duration::from_secs(10), s.wait_for_tick()).await;
    assert!(result.is_err(), "paused scheduler should pend");
}

#[tokio::test(start_paused = true)]
async fn test_pause_idempotent() {
    let mut s = TickScheduler::new(one_second());

    s.pause();
    s.pause();
    assert!(s.is_paused());
}

#[tokio::test(start_paused = true)]
async fn test_rearm_restarts_full_interval() {
    let mut s = TickScheduler::new(one_second());
    tokio::time::advance(Duration::from_millis(900)).await;

    s.rearm();
    let before = tokio::time::Instant::now();
    s.wait_for_tick().await;

    assert_eq!(before.elapsed(), Duration::from_secs(1));
}

// =========================================================================
// Integration: select! loop pattern (mirrors the countdown actor)
// =========================================================================

#[tokio::test(start_paused = true)]
async fn test_countdown_loop_rearmed_mid_cycle() {
    enum Cmd {
        Rearm,
        Halt,
    }

    let mut s = TickScheduler::new(one_second());
    let (tx, mut rx) = tokio::sync::mpsc::channel(4);

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(2500)).await;
        tx.send(Cmd::Rearm).await.ok();
        tokio::time::sleep(Duration::from_millis(3200)).await;
        tx.send(Cmd::Halt).await.ok();
    });

    let mut remaining = 10u64;
    loop {
        tokio::select! {
            Some(cmd) = rx.recv() => match cmd {
                Cmd::Rearm => {
                    remaining = 10;
                    s.rearm();
                }
                Cmd::Halt => break,
            },
            info = s.wait_for_tick() => {
                remaining = remaining.saturating_sub(info.elapsed_ticks());
            }
        }
    }

    // Two ticks before the rearm at 2.5 s, three after it (3.5, 4.5, 5.5).
    assert_eq!(remaining, 7);
    assert_eq!(s.tick_count(), 5);
}

#[tokio::test(start_paused = true)]
async fn test_dropping_wait_future_cancels_timer() {
    let mut s = TickScheduler::new(one_second());

    let timed_out = tokio::time::timeout(Duration::from_millis(500), s.wait_for_tick()).await;
    assert!(timed_out.is_err());

    // The abandoned wait did not count as a tick.
    assert_eq!(s.tick_count(), 0);
    let info = s.wait_for_tick().await;
    assert_eq!(info.tick, 1);
}
