//! Session teardown.
//!
//! [`LogoutExecutor::logout`] is the one way a session ends, whether the
//! countdown ran out, the user pressed "Logout Now", or they signed out
//! from a menu. It may run several times for the same session (expiry and
//! a manual logout landing in the same instant); only the first call is
//! visible to the user.

use tracing::{debug, info, warn};

use crate::{LOGIN_PATH, Notice, SessionContext};

/// Why the session is ending. Decides the messaging, nothing else.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutReason {
    /// The countdown reached zero. The user gets a notice.
    Timeout,
    /// The user asked for it. No notice.
    UserInitiated,
}

/// What a `logout` call actually did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogoutOutcome {
    /// This call ended the session and redirected.
    LoggedOut,
    /// There was no session left to end; storage was swept anyway.
    AlreadyLoggedOut,
}

/// Idempotent teardown of the session.
#[derive(Clone)]
pub struct LogoutExecutor {
    ctx: SessionContext,
}

impl LogoutExecutor {
    pub fn new(ctx: SessionContext) -> Self {
        Self { ctx }
    }

    /// The context this executor tears down.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }

    /// End the session.
    ///
    /// 1. Clear the in-memory state (one atomic swap decides the winner).
    /// 2. Remove `token`, `refreshToken`, and the cached user record.
    /// 3. If step 1 actually ended a session: notify (on timeout only) and
    ///    redirect to the login page.
    ///
    /// Never fails; storage errors are logged and skipped.
    pub fn logout(&self, reason: LogoutReason) -> LogoutOutcome {
        let was_active = self.ctx.store.clear();

        let config = &self.ctx.config;
        for key in [&config.token_key, &config.refresh_token_key, &config.user_key] {
            if let Err(e) = self.ctx.credentials.remove(key) {
                warn!(key = %key, error = %e, "failed to remove persisted credential");
            }
        }

        if !was_active {
            debug!(?reason, "logout requested with no active session");
            return LogoutOutcome::AlreadyLoggedOut;
        }

        if reason == LogoutReason::Timeout {
            self.ctx.notifier.notice(
                Notice::new("Session expired").with_description("Please sign in again"),
            );
        }
        self.ctx.navigator.navigate(LOGIN_PATH);

        info!(?reason, "session logged out");
        LogoutOutcome::LoggedOut
    }
}
