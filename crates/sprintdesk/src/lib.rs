//! # Sprintdesk
//!
//! Client-side session lifecycle for the Sprintdesk portal.
//!
//! A signed-in user gets a 30-minute inactivity window. Fifteen minutes
//! before it closes they see a passive notice, at five minutes a blocking
//! "Extend Session / Logout Now" modal, and at zero they are logged out and
//! sent to `/login`. Real interaction (pointer, key, scroll, touch) rearms
//! the window once more than a minute of it has passed.
//!
//! The layers:
//!
//! - [`sprintdesk_protocol`]: identity payloads, roles, codecs.
//! - [`sprintdesk_session`]: session store, credential storage, guard,
//!   logout.
//! - [`sprintdesk_countdown`]: the per-page countdown actor.
//! - [`sprintdesk_tick`]: the tick scheduler driving it.
//!
//! [`Portal`] wires them together.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use sprintdesk::prelude::*;
//!
//! // Implement IdentityProvider, Navigator and Notifier for your shell, then:
//! // let portal = PortalBuilder::new(credentials, navigator, notifier)
//! //     .config(PortalConfig::from_path("portal.json")?)
//! //     .build(identity);
//! // if let Some(page) = portal.open_protected().await {
//! //     // render page.user; forward input to portal.activity()
//! // }
//! ```

mod config;
mod error;
mod portal;
pub mod telemetry;

pub use config::PortalConfig;
pub use error::SprintdeskError;
pub use portal::{Portal, PortalBuilder, ProtectedPage};

/// Re-exports everything an application needs to mount sessions.
pub mod prelude {
    pub use crate::{Portal, PortalBuilder, PortalConfig, ProtectedPage, SprintdeskError};
    pub use sprintdesk_countdown::{
        ActivityBus, ActivityKind, CountdownConfig, CountdownError, CountdownHandle,
        CountdownPhase, CountdownSnapshot, ThresholdMode,
    };
    pub use sprintdesk_protocol::{OrganizationId, ProtocolError, Role, UserId, UserIdentity};
    pub use sprintdesk_session::{
        CredentialStore, Destination, FileCredentialStore, IdentityProvider, LOGIN_PATH,
        LogoutOutcome, MemoryCredentialStore, ModalAction, ModalDescriptor, Navigator, Notice,
        Notifier, SessionConfig, SessionError, SessionState, SessionStore,
    };
    pub use sprintdesk_tick::{TickConfig, TickPolicy};
}
