//! `Portal` builder and the protected-page lifecycle.
//!
//! This is the entry point for an application shell. It ties together all
//! the layers: credentials → session store → guard → countdown.
//!
//! ```text
//!   sign_in ──→ persist creds ──→ establish ──→ navigate(landing)
//!
//!   open_protected ──→ SessionGuard::verify ──┬→ Authenticated → mount countdown
//!                                             └→ Unauthenticated (→ /login)
//! ```

use std::sync::Arc;

use sprintdesk_countdown::{ActivityBus, CountdownConfig, CountdownHandle, CountdownMount};
use sprintdesk_protocol::{Codec, JsonCodec, UserIdentity};
use sprintdesk_session::{
    CredentialStore, Destination, GuardState, IdentityProvider, LogoutExecutor, LogoutOutcome,
    LogoutReason, Navigator, Notifier, SessionContext, SessionError, SessionGuard, SessionStore,
    resolve_landing,
};
use tracing::{debug, info};

use crate::{PortalConfig, SprintdeskError};

/// Builder for a [`Portal`].
///
/// # Example
///
/// ```rust,ignore
/// use sprintdesk::prelude::*;
///
/// let portal = PortalBuilder::new(credentials, navigator, notifier)
///     .config(config)
///     .build(identity);
/// ```
pub struct PortalBuilder {
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
    notifier: Arc<dyn Notifier>,
    config: PortalConfig,
    store: Option<SessionStore>,
    activity: Option<ActivityBus>,
}

impl PortalBuilder {
    /// Creates a builder with default settings and the given collaborators.
    pub fn new(
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        Self {
            credentials,
            navigator,
            notifier,
            config: PortalConfig::default(),
            store: None,
            activity: None,
        }
    }

    /// Sets the portal configuration.
    pub fn config(mut self, config: PortalConfig) -> Self {
        self.config = config;
        self
    }

    /// Shares an existing session store instead of creating an empty one.
    pub fn store(mut self, store: SessionStore) -> Self {
        self.store = Some(store);
        self
    }

    /// Shares an existing activity bus instead of creating one.
    pub fn activity(mut self, activity: ActivityBus) -> Self {
        self.activity = Some(activity);
        self
    }

    /// Builds the portal around the given identity provider.
    pub fn build<P: IdentityProvider>(self, identity: P) -> Portal<P> {
        let ctx = SessionContext::new(
            self.store.unwrap_or_default(),
            self.credentials,
            self.navigator,
            self.notifier,
        )
        .with_config(self.config.session);

        Portal {
            logout: LogoutExecutor::new(ctx.clone()),
            ctx,
            identity: Arc::new(identity),
            activity: self.activity.unwrap_or_default(),
            countdown: self.config.countdown.validated(),
        }
    }
}

/// A protected page that passed the guard, with its countdown running.
///
/// Close it when the page goes away. Dropping it also stops the countdown.
pub struct ProtectedPage {
    /// The verified user.
    pub user: UserIdentity,
    countdown: CountdownMount,
}

impl ProtectedPage {
    /// The running countdown, for the modal's buttons.
    pub fn countdown(&self) -> &CountdownHandle {
        self.countdown.handle()
    }

    /// Unmount the page and wait for its countdown to stop.
    pub async fn close(self) {
        self.countdown.unmount().await;
    }
}

/// The client-side session lifecycle for one application instance.
pub struct Portal<P: IdentityProvider> {
    ctx: SessionContext,
    identity: Arc<P>,
    activity: ActivityBus,
    countdown: CountdownConfig,
    logout: LogoutExecutor,
}

impl<P: IdentityProvider> Portal<P> {
    /// The process-wide session store.
    pub fn store(&self) -> &SessionStore {
        &self.ctx.store
    }

    /// Where the shell publishes user interaction.
    pub fn activity(&self) -> &ActivityBus {
        &self.activity
    }

    /// The countdown settings every protected page mounts with.
    pub fn countdown_config(&self) -> &CountdownConfig {
        &self.countdown
    }

    /// Record a successful login.
    ///
    /// Persists the token, the refresh token, and the user record, installs
    /// the in-memory session, and navigates to the user's landing page.
    ///
    /// # Errors
    /// - the user record is not a valid identity
    /// - `token` is blank
    /// - credential storage fails; nothing is installed in memory then
    pub fn sign_in(
        &self,
        user: UserIdentity,
        token: &str,
        refresh_token: Option<&str>,
    ) -> Result<Destination, SprintdeskError> {
        user.validate()?;
        if token.trim().is_empty() {
            return Err(SessionError::NotAuthenticated.into());
        }

        let record = JsonCodec.encode(&user)?;
        let record = String::from_utf8_lossy(&record);

        let config = &self.ctx.config;
        let credentials = &self.ctx.credentials;
        credentials.set(&config.token_key, token)?;
        match refresh_token {
            Some(refresh) => credentials.set(&config.refresh_token_key, refresh)?,
            None => credentials.remove(&config.refresh_token_key)?,
        }
        credentials.set(&config.user_key, &record)?;

        self.ctx.store.establish(user, token);

        let destination = self.landing();
        info!(path = destination.path(), "signed in");
        self.ctx.navigator.navigate(destination.path());
        Ok(destination)
    }

    /// Where a visitor of `/` or `/login` belongs right now.
    pub fn landing(&self) -> Destination {
        resolve_landing(&self.ctx.store.snapshot())
    }

    /// Mount a protected page.
    ///
    /// Runs the session guard once. On success the page's countdown is
    /// mounted and returned with the verified user. On failure the guard
    /// has already redirected to `/login` and nothing is mounted.
    pub async fn open_protected(&self) -> Option<ProtectedPage> {
        let mut guard = SessionGuard::new(self.ctx.clone(), Arc::clone(&self.identity));

        match guard.verify().await {
            GuardState::Authenticated(user) => {
                let user = user.clone();
                let countdown = sprintdesk_countdown::mount(
                    &self.countdown,
                    self.logout.clone(),
                    &self.activity,
                );
                debug!(user_id = %user.id, "protected page mounted");
                Some(ProtectedPage { user, countdown })
            }
            GuardState::Unauthenticated | GuardState::Verifying => None,
        }
    }

    /// User-initiated logout, e.g. from a navigation menu.
    pub fn logout(&self) -> LogoutOutcome {
        self.logout.logout(LogoutReason::UserInitiated)
    }
}
