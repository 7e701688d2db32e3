//! Session types: the process-wide record of who is signed in.
//!
//! - [`SessionState`] — the value: authenticated flag, user, token.
//! - [`SessionStore`] — the single shared, observable holder of that value.
//! - [`SessionConfig`] — which storage keys hold the persisted credentials.
//! - [`SessionContext`] — the collaborators the guard and logout share.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::{Deserialize, Serialize};
use sprintdesk_protocol::UserIdentity;
use tokio::sync::watch;

use crate::{CredentialStore, Navigator, Notifier};

// ---------------------------------------------------------------------------
// SessionConfig
// ---------------------------------------------------------------------------

/// Storage keys for the persisted credentials.
///
/// Defaults match the web client's local-storage layout: `token`,
/// `refreshToken`, `user`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Key holding the opaque access token.
    pub token_key: String,
    /// Key holding the refresh token.
    pub refresh_token_key: String,
    /// Key holding the cached user record (JSON).
    pub user_key: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: "token".to_string(),
            refresh_token_key: "refreshToken".to_string(),
            user_key: "user".to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The in-memory session.
///
/// ```text
///   empty ──(restore token)──→ restored ──(identity fetched)──→ authenticated
///     ↑                                                              │
///     └────────────────────────────(clear)───────────────────────────┘
/// ```
///
/// Invariant: `is_authenticated` implies `token.is_some()`. `user` may be
/// `None` while authenticated, right after a reload restored the token but
/// before the identity was fetched again.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionState {
    pub is_authenticated: bool,
    pub user: Option<UserIdentity>,
    pub token: Option<String>,
}

impl SessionState {
    /// Nobody signed in.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Fully established session.
    pub fn authenticated(user: UserIdentity, token: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user: Some(user),
            token: Some(token.into()),
        }
    }

    /// Token restored from storage, identity not yet confirmed.
    pub fn restored(token: impl Into<String>) -> Self {
        Self {
            is_authenticated: true,
            user: None,
            token: Some(token.into()),
        }
    }

    /// `true` when no field carries session data.
    pub fn is_empty(&self) -> bool {
        !self.is_authenticated && self.user.is_none() && self.token.is_none()
    }

    /// `true` when the authenticated-implies-token invariant holds.
    pub fn is_consistent(&self) -> bool {
        !self.is_authenticated || self.token.is_some()
    }
}

// ---------------------------------------------------------------------------
// SessionStore
// ---------------------------------------------------------------------------

/// The application's single session holder.
///
/// Backed by a `tokio::sync::watch` channel: every write replaces the
/// whole [`SessionState`] at once, so readers never see a user from one
/// session next to the token of another. Cloning is cheap and every clone
/// refers to the same state; create a fresh store per test.
#[derive(Debug, Clone)]
pub struct SessionStore {
    tx: Arc<watch::Sender<SessionState>>,
    /// Bumped by every [`clear`](Self::clear) that ended something.
    epoch: Arc<AtomicU64>,
}

impl SessionStore {
    /// A store holding [`SessionState::empty`].
    pub fn new() -> Self {
        Self::with_state(SessionState::empty())
    }

    /// A store seeded with `state`.
    pub fn with_state(state: SessionState) -> Self {
        let (tx, _rx) = watch::channel(state);
        Self {
            tx: Arc::new(tx),
            epoch: Arc::new(AtomicU64::new(0)),
        }
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> SessionState {
        self.tx.borrow().clone()
    }

    /// Whether the current state claims to be authenticated.
    pub fn is_authenticated(&self) -> bool {
        self.tx.borrow().is_authenticated
    }

    /// The confirmed user, if any.
    pub fn user(&self) -> Option<UserIdentity> {
        self.tx.borrow().user.clone()
    }

    /// Install a fully authenticated session.
    pub fn establish(&self, user: UserIdentity, token: impl Into<String>) {
        let token = token.into();
        tracing::info!(user_id = %user.id, role = %user.role, "session established");
        self.tx.send_replace(SessionState::authenticated(user, token));
    }

    /// Manual override used while restoring a session from storage.
    pub fn restore(&self, token: impl Into<String>) {
        self.tx.send_replace(SessionState::restored(token));
        tracing::debug!("session token restored, identity pending");
    }

    /// Reset to [`SessionState::empty`].
    ///
    /// Returns `true` if there was anything to clear. Concurrent callers
    /// race on a single atomic swap, so exactly one of them sees `true`.
    pub fn clear(&self) -> bool {
        self.tx.send_if_modified(|state| {
            if state.is_empty() {
                false
            } else {
                *state = SessionState::empty();
                self.epoch.fetch_add(1, Ordering::SeqCst);
                true
            }
        })
    }

    /// How many times a session has been cleared from this store.
    ///
    /// Work that suspends (an identity fetch) reads this before and after;
    /// a different value means a logout happened in between.
    pub fn clear_epoch(&self) -> u64 {
        self.epoch.load(Ordering::SeqCst)
    }

    /// Subscribe to state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// SessionContext
// ---------------------------------------------------------------------------

/// Everything the guard and the logout executor act on.
///
/// Passed by value (it's a bundle of `Arc`s) instead of reaching for
/// globals, so each test builds its own store, storage, and recorders.
#[derive(Clone)]
pub struct SessionContext {
    pub store: SessionStore,
    pub credentials: Arc<dyn CredentialStore>,
    pub navigator: Arc<dyn Navigator>,
    pub notifier: Arc<dyn Notifier>,
    pub config: SessionConfig,
}

impl SessionContext {
    /// Bundle the collaborators with the default [`SessionConfig`].
    pub fn new(
        store: SessionStore,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            store,
            credentials,
            navigator,
            notifier,
            config: SessionConfig::default(),
        }
    }

    /// Replace the storage-key configuration.
    pub fn with_config(mut self, config: SessionConfig) -> Self {
        self.config = config;
        self
    }
}
