//! Error types for the countdown layer.

/// Errors returned by a [`CountdownHandle`](crate::CountdownHandle).
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CountdownError {
    /// The countdown actor is gone (unmounted, or its task ended).
    #[error("session countdown is not running")]
    Unavailable,

    /// The countdown already expired or was stopped by a logout; it can't
    /// be extended.
    #[error("session countdown has stopped")]
    Halted,
}
