//! Countdown actor: an isolated Tokio task that owns one session clock.
//!
//! A protected page mounts exactly one actor. It ticks the clock, listens
//! for activity, watches the session store, and answers commands from its
//! [`CountdownHandle`]. Nothing outside the task touches the clock.
//!
//! The task's lifetime is tied to a [`CountdownMount`]: unmount it (or
//! drop it) and the timer, the activity subscription, and the store
//! subscription all go away with the task.

use sprintdesk_session::{LogoutExecutor, LogoutReason, SessionState};
use sprintdesk_tick::{TickInfo, TickScheduler};
use tokio::sync::{broadcast, mpsc, oneshot, watch};
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use crate::{
    ActivityBus, ActivityKind, ActivityResetter, ClockEvent, CountdownConfig, CountdownError,
    CountdownPhase, SessionClock, WarningTrigger,
};

/// Command channel size. Commands come from one page's buttons; a handful
/// in flight is plenty.
const CHANNEL_SIZE: usize = 16;

/// Commands sent to the actor.
///
/// Variants with a `oneshot::Sender` expect a reply.
pub(crate) enum CountdownCommand {
    /// "Extend Session": rearm the clock and hide the modal.
    Extend {
        reply: oneshot::Sender<Result<(), CountdownError>>,
    },

    /// "Logout Now": stop the clock and end the session.
    LogoutNow { reply: oneshot::Sender<()> },

    /// Request the current clock state.
    Snapshot {
        reply: oneshot::Sender<CountdownSnapshot>,
    },

    /// Stop the actor.
    Shutdown,
}

/// A point-in-time view of the countdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CountdownSnapshot {
    pub remaining_secs: u64,
    pub warning_shown: bool,
    pub modal_visible: bool,
    pub phase: CountdownPhase,
    /// Remaining time as `m:ss`.
    pub display: String,
}

/// Handle to a running countdown actor.
///
/// Cheap to clone; it's an `mpsc::Sender` wrapper. Holding a handle does
/// not keep the actor alive; the [`CountdownMount`] does.
#[derive(Clone)]
pub struct CountdownHandle {
    sender: mpsc::Sender<CountdownCommand>,
}

impl CountdownHandle {
    /// The modal's "Extend Session" button.
    ///
    /// # Errors
    /// [`CountdownError::Halted`] after expiry or logout,
    /// [`CountdownError::Unavailable`] after unmount.
    pub async fn extend_session(&self) -> Result<(), CountdownError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(CountdownCommand::Extend { reply: reply_tx })
            .await
            .map_err(|_| CountdownError::Unavailable)?;
        reply_rx.await.map_err(|_| CountdownError::Unavailable)?
    }

    /// The modal's "Logout Now" button.
    pub async fn logout_now(&self) -> Result<(), CountdownError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(CountdownCommand::LogoutNow { reply: reply_tx })
            .await
            .map_err(|_| CountdownError::Unavailable)?;
        reply_rx.await.map_err(|_| CountdownError::Unavailable)
    }

    /// Current clock state.
    pub async fn snapshot(&self) -> Result<CountdownSnapshot, CountdownError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(CountdownCommand::Snapshot { reply: reply_tx })
            .await
            .map_err(|_| CountdownError::Unavailable)?;
        reply_rx.await.map_err(|_| CountdownError::Unavailable)
    }

    /// Whether the actor is still accepting commands.
    pub fn is_running(&self) -> bool {
        !self.sender.is_closed()
    }
}

/// The scoped lifetime of a mounted countdown.
///
/// [`unmount`](Self::unmount) stops the actor and waits for it. Dropping
/// the mount aborts the task instead; its resources are released the next
/// time the runtime polls it.
pub struct CountdownMount {
    handle: CountdownHandle,
    task: Option<JoinHandle<()>>,
}

impl CountdownMount {
    pub fn handle(&self) -> &CountdownHandle {
        &self.handle
    }

    /// Stop the countdown and wait until its task has finished.
    pub async fn unmount(mut self) {
        let _ = self.handle.sender.send(CountdownCommand::Shutdown).await;
        if let Some(task) = self.task.take() {
            let _ = task.await;
        }
    }
}

impl Drop for CountdownMount {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

/// The actor state. Runs inside a Tokio task.
struct CountdownActor {
    clock: SessionClock,
    scheduler: TickScheduler,
    resetter: ActivityResetter,
    trigger: WarningTrigger,
    logout: LogoutExecutor,
    receiver: mpsc::Receiver<CountdownCommand>,
    activity: broadcast::Receiver<ActivityKind>,
    session: watch::Receiver<SessionState>,
    listening: bool,
    watching: bool,
}

impl CountdownActor {
    /// Runs the actor loop until shutdown or until every handle is gone.
    async fn run(mut self) {
        info!(
            remaining = self.clock.remaining_secs(),
            "session countdown mounted"
        );

        loop {
            tokio::select! {
                cmd = self.receiver.recv() => match cmd {
                    Some(CountdownCommand::Shutdown) | None => break,
                    Some(cmd) => self.handle_command(cmd),
                },
                event = self.activity.recv(), if self.listening => match event {
                    Ok(kind) => self.handle_activity(kind),
                    Err(broadcast::error::RecvError::Lagged(missed)) => {
                        trace!(missed, "activity listener lagged");
                    }
                    Err(broadcast::error::RecvError::Closed) => self.listening = false,
                },
                changed = self.session.changed(), if self.watching => match changed {
                    Ok(()) => {
                        let authenticated = self.session.borrow_and_update().is_authenticated;
                        if !authenticated {
                            self.stop("session ended elsewhere");
                        }
                    }
                    Err(_) => self.watching = false,
                },
                info = self.scheduler.wait_for_tick() => self.handle_tick(info),
            }
        }

        info!(
            remaining = self.clock.remaining_secs(),
            ticks = self.scheduler.metrics().total_ticks,
            "session countdown unmounted"
        );
    }

    fn handle_command(&mut self, cmd: CountdownCommand) {
        match cmd {
            CountdownCommand::Extend { reply } => {
                let result = self.extend();
                let _ = reply.send(result);
            }
            CountdownCommand::LogoutNow { reply } => {
                self.stop("logout requested from session modal");
                self.logout.logout(LogoutReason::UserInitiated);
                let _ = reply.send(());
            }
            CountdownCommand::Snapshot { reply } => {
                let _ = reply.send(self.snapshot());
            }
            CountdownCommand::Shutdown => {}
        }
    }

    fn handle_tick(&mut self, info: TickInfo) {
        let events = self.clock.advance(info.elapsed_ticks());
        trace!(
            remaining = self.clock.remaining_secs(),
            skipped = info.ticks_skipped,
            "countdown tick"
        );

        for event in events {
            self.trigger.present(&event);
            match event {
                ClockEvent::WarningNotice { remaining_secs } => {
                    info!(remaining_secs, "session expiring soon");
                }
                ClockEvent::ModalShown { remaining_secs } => {
                    info!(remaining_secs, "session expiry modal shown");
                }
                ClockEvent::Expired { .. } => {
                    self.scheduler.pause();
                    info!("session countdown expired");
                    self.logout.logout(LogoutReason::Timeout);
                }
            }
        }
    }

    fn handle_activity(&mut self, kind: ActivityKind) {
        if !self.resetter.should_reset(&self.clock) {
            trace!(%kind, elapsed = self.clock.elapsed_secs(), "activity ignored");
            return;
        }
        self.rearm();
        debug!(%kind, "activity rearmed session countdown");
    }

    fn extend(&mut self) -> Result<(), CountdownError> {
        if self.clock.is_halted() {
            return Err(CountdownError::Halted);
        }
        self.rearm();
        info!("session extended");
        Ok(())
    }

    /// Start a new cycle and close the modal if it was open.
    fn rearm(&mut self) {
        let was_visible = self.clock.modal_visible();
        if self.clock.reset() {
            self.scheduler.rearm();
            if was_visible {
                self.trigger.hide_modal();
            }
        }
    }

    fn stop(&mut self, reason: &str) {
        if self.clock.is_halted() {
            return;
        }
        let was_visible = self.clock.modal_visible();
        self.clock.halt();
        self.scheduler.pause();
        if was_visible {
            self.trigger.hide_modal();
        }
        info!(reason, "session countdown stopped");
    }

    fn snapshot(&self) -> CountdownSnapshot {
        CountdownSnapshot {
            remaining_secs: self.clock.remaining_secs(),
            warning_shown: self.clock.warning_shown(),
            modal_visible: self.clock.modal_visible(),
            phase: self.clock.phase(),
            display: self.clock.display(),
        }
    }
}

impl Drop for CountdownActor {
    /// Runs on orderly shutdown and on abort alike: never leave the
    /// blocking modal on screen for a countdown that no longer exists.
    fn drop(&mut self) {
        if self.clock.modal_visible() {
            self.trigger.hide_modal();
        }
    }
}

/// Mounts a countdown for the current session and returns its scoped
/// lifetime.
///
/// The first tick is due one interval from now. Must be called from
/// within a Tokio runtime.
pub fn mount(
    config: &CountdownConfig,
    logout: LogoutExecutor,
    activity: &ActivityBus,
) -> CountdownMount {
    let config = config.clone().validated();
    let (tx, rx) = mpsc::channel(CHANNEL_SIZE);

    let ctx = logout.context();
    let trigger = WarningTrigger::new(ctx.notifier.clone(), config.notice_duration());
    let session = ctx.store.subscribe();

    let actor = CountdownActor {
        clock: SessionClock::new(&config),
        scheduler: TickScheduler::new(config.tick_config()),
        resetter: ActivityResetter::new(
            config.activity_reset_after_secs,
            config.activity_dismisses_modal,
        ),
        trigger,
        logout,
        receiver: rx,
        activity: activity.subscribe(),
        session,
        listening: true,
        watching: true,
    };

    let task = tokio::spawn(actor.run());

    CountdownMount {
        handle: CountdownHandle { sender: tx },
        task: Some(task),
    }
}
