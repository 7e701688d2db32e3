//! Identity fetch hook: "who does this token belong to?"
//!
//! Sprintdesk doesn't talk HTTP itself. The application supplies an
//! [`IdentityProvider`] that performs the backend's "get current user"
//! call; the session guard calls it on a cold reload, when a token was
//! found in storage but nobody in memory knows whose it is.
//!
//! The provider returns the raw response body. Decoding and validating it
//! is the guard's job, so a provider can't accidentally admit a payload of
//! the wrong shape.

use crate::SessionError;

/// Performs the "get current user" request.
///
/// # Example
///
/// ```rust
/// use sprintdesk_session::{IdentityProvider, SessionError};
///
/// /// Answers every token with the same canned body.
/// struct FixedIdentity(Vec<u8>);
///
/// impl IdentityProvider for FixedIdentity {
///     async fn current_user(&self, _token: &str) -> Result<Vec<u8>, SessionError> {
///         Ok(self.0.clone())
///     }
/// }
/// ```
pub trait IdentityProvider: Send + Sync + 'static {
    /// Fetch the identity behind `token`.
    ///
    /// # Returns
    /// - `Ok(body)` — the request succeeded; `body` should be
    ///   `{ "data": { "user": { ... } } }`
    /// - `Err(SessionError::IdentityFetch)` — the request failed
    fn current_user(
        &self,
        token: &str,
    ) -> impl std::future::Future<Output = Result<Vec<u8>, SessionError>> + Send;
}
