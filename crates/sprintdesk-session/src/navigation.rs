//! Where to send the user, kept apart from actually sending them.
//!
//! [`resolve_landing`] and [`Destination`] are pure; [`Navigator`] is the
//! effect. Tests assert on the decision without a router in sight.

use sprintdesk_protocol::Role;

use crate::SessionState;

/// The login page. Every failure, expiry, and logout path ends here.
pub const LOGIN_PATH: &str = "/login";

/// Performs a redirect.
pub trait Navigator: Send + Sync + 'static {
    /// Navigate to `path`, replacing the current location.
    fn navigate(&self, path: &str);
}

/// A resolved navigation target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Destination {
    /// The login page.
    Login,
    /// The home page for a role.
    Landing(Role),
}

impl Destination {
    pub fn path(self) -> &'static str {
        match self {
            Self::Login => LOGIN_PATH,
            Self::Landing(role) => role.landing_path(),
        }
    }
}

/// Where an already-signed-in visitor of `/` or `/login` belongs.
///
/// Authenticated with a known user → that user's role landing page.
/// Anything else (signed out, or token without a confirmed identity) →
/// the login page.
pub fn resolve_landing(state: &SessionState) -> Destination {
    match (&state.user, state.is_authenticated) {
        (Some(user), true) => Destination::Landing(user.role),
        _ => Destination::Login,
    }
}
