//! Session management for the Sprintdesk client.
//!
//! This crate owns the lifecycle of a signed-in user:
//!
//! 1. **State** — who is signed in right now ([`SessionStore`])
//! 2. **Persistence** — the token that survives a reload ([`CredentialStore`])
//! 3. **Verification** — whether a protected page may render ([`SessionGuard`])
//! 4. **Teardown** — ending the session exactly once ([`LogoutExecutor`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Countdown Layer (above)  ← expires sessions, calls logout
//!     ↕
//! Session Layer (this crate)  ← state, storage, guard, logout
//!     ↕
//! Protocol Layer (below)  ← UserIdentity, Role, Codec
//! ```
//!
//! Side effects go through traits ([`Navigator`], [`Notifier`],
//! [`IdentityProvider`], [`CredentialStore`]) bundled in a
//! [`SessionContext`], so every piece can be driven from a test.

mod auth;
mod error;
mod guard;
mod logout;
mod navigation;
mod presenter;
mod session;
mod storage;

pub use auth::IdentityProvider;
pub use error::SessionError;
pub use guard::{GuardDecision, GuardState, SessionGuard, decide};
pub use logout::{LogoutExecutor, LogoutOutcome, LogoutReason};
pub use navigation::{Destination, LOGIN_PATH, Navigator, resolve_landing};
pub use presenter::{ModalAction, ModalDescriptor, Notice, Notifier};
pub use session::{SessionConfig, SessionContext, SessionState, SessionStore};
pub use storage::{CredentialStore, FileCredentialStore, MemoryCredentialStore};
