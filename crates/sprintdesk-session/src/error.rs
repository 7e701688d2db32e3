//! Error types for the session layer.

use sprintdesk_protocol::ProtocolError;

/// Errors that can occur while establishing, verifying, or tearing down
/// a session.
///
/// Every variant is fatal to the current session: the guard answers all
/// of them by clearing credentials and redirecting to the login page.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The persisted credential store could not be read or written.
    #[error("credential storage failed: {0}")]
    Storage(String),

    /// I/O failure in a file-backed credential store.
    #[error("credential storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The "current user" request failed (network error, non-2xx, timeout).
    #[error("identity request failed: {0}")]
    IdentityFetch(String),

    /// The "current user" request succeeded but its body was not a
    /// well-formed `{ data: { user } }` payload.
    #[error("malformed identity response: {0}")]
    MalformedIdentity(#[from] ProtocolError),

    /// An operation that needs a signed-in user ran without one.
    #[error("no authenticated session")]
    NotAuthenticated,
}
