//! The route-level session gate.
//!
//! A [`SessionGuard`] is created when a protected page mounts and decides,
//! once, whether the visitor may see it:
//!
//! ```text
//!                   ┌── no token ─────────────────────────→ Unauthenticated (→ /login)
//!   Verifying ──────┼── token + user in memory ───────────→ Authenticated
//!                   └── token, no user ── fetch identity ─┬→ Authenticated
//!                                                         └→ Unauthenticated (creds cleared, → /login)
//! ```
//!
//! The decision itself is [`decide`], a pure function of the stored token
//! and the in-memory state. [`SessionGuard::verify`] runs the effects.

use std::sync::Arc;

use sprintdesk_protocol::{Codec, JsonCodec, UserIdentity, decode_current_user};
use tracing::{debug, info, warn};

use crate::{IdentityProvider, LOGIN_PATH, SessionContext, SessionError, SessionState};

// ---------------------------------------------------------------------------
// Decision
// ---------------------------------------------------------------------------

/// What the guard should do, before doing any of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardDecision {
    /// No credential: redirect to login. `clear_state` is set when memory
    /// still claims a session that storage no longer backs.
    Redirect { clear_state: bool },
    /// Client-side navigation with a known user; no request needed.
    Admit(UserIdentity),
    /// Cold reload: ask the backend who owns this token.
    FetchIdentity(String),
}

/// Decide how to verify the session.
///
/// An empty or whitespace-only stored token counts as no token.
pub fn decide(stored_token: Option<&str>, state: &SessionState) -> GuardDecision {
    let token = stored_token.filter(|t| !t.trim().is_empty());
    match (token, &state.user) {
        (None, _) => GuardDecision::Redirect {
            clear_state: !state.is_empty(),
        },
        (Some(_), Some(user)) => GuardDecision::Admit(user.clone()),
        (Some(token), None) => GuardDecision::FetchIdentity(token.to_string()),
    }
}

// ---------------------------------------------------------------------------
// Guard
// ---------------------------------------------------------------------------

/// Where a guard is in its lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardState {
    /// Created, not yet verified.
    Verifying,
    /// Protected content may render.
    Authenticated(UserIdentity),
    /// Render nothing; the redirect has already been issued.
    Unauthenticated,
}

impl GuardState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    /// The admitted user, if any.
    pub fn user(&self) -> Option<&UserIdentity> {
        match self {
            Self::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}

/// Gates one mount of a protected page.
pub struct SessionGuard<P, C = JsonCodec> {
    ctx: SessionContext,
    identity: Arc<P>,
    codec: C,
    state: GuardState,
}

impl<P: IdentityProvider> SessionGuard<P> {
    /// A guard that decodes identity responses as JSON.
    pub fn new(ctx: SessionContext, identity: Arc<P>) -> Self {
        Self::with_codec(ctx, identity, JsonCodec)
    }
}

impl<P: IdentityProvider, C: Codec> SessionGuard<P, C> {
    /// A guard with a custom response codec.
    pub fn with_codec(ctx: SessionContext, identity: Arc<P>, codec: C) -> Self {
        Self {
            ctx,
            identity,
            codec,
            state: GuardState::Verifying,
        }
    }

    /// Current lifecycle state.
    pub fn state(&self) -> &GuardState {
        &self.state
    }

    /// Verify the session and settle into `Authenticated` or
    /// `Unauthenticated`.
    ///
    /// Runs once per guard. Later calls return the settled state without
    /// touching storage, the network, or the router.
    pub async fn verify(&mut self) -> &GuardState {
        if self.state != GuardState::Verifying {
            return &self.state;
        }

        let stored = match self.ctx.credentials.get(&self.ctx.config.token_key) {
            Ok(token) => token,
            Err(e) => {
                warn!(error = %e, "could not read persisted token, treating as signed out");
                None
            }
        };
        let snapshot = self.ctx.store.snapshot();
        let epoch = self.ctx.store.clear_epoch();

        self.state = match decide(stored.as_deref(), &snapshot) {
            GuardDecision::Redirect { clear_state } => {
                if clear_state {
                    warn!("in-memory session without a persisted token, clearing");
                    self.ctx.store.clear();
                }
                debug!("no persisted token, redirecting to login");
                self.ctx.navigator.navigate(LOGIN_PATH);
                GuardState::Unauthenticated
            }
            GuardDecision::Admit(user) => {
                debug!(user_id = %user.id, "session already verified in memory");
                GuardState::Authenticated(user)
            }
            GuardDecision::FetchIdentity(token) => match self.fetch_identity(&token).await {
                Ok(_) if self.superseded(&token, epoch) => {
                    info!("session ended while verifying identity, not restoring it");
                    if self.ctx.store.clear_epoch() == epoch {
                        self.ctx.navigator.navigate(LOGIN_PATH);
                    }
                    GuardState::Unauthenticated
                }
                Ok(user) => {
                    self.ctx.store.establish(user.clone(), token);
                    info!(user_id = %user.id, "session restored after reload");
                    GuardState::Authenticated(user)
                }
                Err(e) => {
                    warn!(error = %e, "identity verification failed, forcing logout");
                    self.force_logout();
                    GuardState::Unauthenticated
                }
            },
        };

        &self.state
    }

    async fn fetch_identity(&self, token: &str) -> Result<UserIdentity, SessionError> {
        let body = self.identity.current_user(token).await?;
        let user = decode_current_user(&self.codec, &body)?;
        Ok(user)
    }

    /// Whether a logout ran while the identity fetch was suspended: the
    /// store was cleared, or the persisted token is no longer `token`.
    fn superseded(&self, token: &str, epoch: u64) -> bool {
        if self.ctx.store.clear_epoch() != epoch {
            return true;
        }
        match self.ctx.credentials.get(&self.ctx.config.token_key) {
            Ok(current) => current.as_deref() != Some(token),
            Err(e) => {
                warn!(error = %e, "could not re-read persisted token");
                true
            }
        }
    }

    /// Drop the persisted credential and any in-memory remnants, then
    /// redirect. Storage failures are logged; the redirect always happens.
    fn force_logout(&self) {
        let config = &self.ctx.config;
        for key in [&config.token_key, &config.refresh_token_key] {
            if let Err(e) = self.ctx.credentials.remove(key) {
                warn!(key = %key, error = %e, "failed to remove persisted credential");
            }
        }
        self.ctx.store.clear();
        self.ctx.navigator.navigate(LOGIN_PATH);
    }
}
