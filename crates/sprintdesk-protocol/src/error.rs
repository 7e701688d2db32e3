//! Error types for the protocol layer.
//!
//! Each crate in Sprintdesk defines its own error enum. A `ProtocolError`
//! always means the bytes themselves were the problem, never the network
//! or the session.

/// Errors that can occur in the protocol layer.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    ///
    /// Common causes: malformed JSON, a missing `data.user` wrapper,
    /// missing fields, or an unknown role string.
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The payload decoded but does not describe a usable identity,
    /// e.g. an empty user id or an email without `@`.
    #[error("invalid identity: {0}")]
    InvalidIdentity(String),
}
