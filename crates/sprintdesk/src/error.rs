//! Unified error type for Sprintdesk.

use sprintdesk_countdown::CountdownError;
use sprintdesk_protocol::ProtocolError;
use sprintdesk_session::SessionError;

/// Top-level error that wraps all crate-specific errors.
///
/// The `#[from]` attribute on each variant auto-generates `From` impls,
/// so `?` converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum SprintdeskError {
    /// A payload could not be encoded, decoded, or validated.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// Credential storage or identity verification failed.
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The countdown is gone or has stopped.
    #[error(transparent)]
    Countdown(#[from] CountdownError),

    /// The configuration file could not be read.
    #[error("failed to read config: {0}")]
    ConfigIo(#[from] std::io::Error),

    /// The configuration is not valid JSON for [`PortalConfig`](crate::PortalConfig).
    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),
}
