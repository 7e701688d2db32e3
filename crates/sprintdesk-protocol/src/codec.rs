//! Codec trait and implementations for serializing/deserializing payloads.
//!
//! A "codec" (coder/decoder) converts between Rust types and raw bytes.
//! The session layer never parses response bodies directly; it hands the
//! bytes to a [`Codec`] and gets typed values or a [`ProtocolError`] back.

use serde::{Serialize, de::DeserializeOwned};

use crate::{CurrentUserResponse, ProtocolError, UserIdentity};

/// A codec that can encode Rust types to bytes and decode bytes back.
///
/// `Send + Sync + 'static` because a codec lives inside long-lived
/// guards and actors that Tokio may move between threads.
pub trait Codec: Send + Sync + 'static {
    /// Serializes a value into bytes.
    ///
    /// # Errors
    /// Returns `ProtocolError::Encode` if serialization fails.
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError>;

    /// Deserializes bytes back into a value.
    ///
    /// # Errors
    /// Returns `ProtocolError::Decode` if the bytes are malformed,
    /// incomplete, or don't match the expected type.
    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError>;
}

/// Decodes a "current user" response body and checks that the identity
/// inside it is well formed.
///
/// Anything other than `{ "data": { "user": { ... } } }` with a valid
/// user is an error. Callers treat every error here the same way they
/// treat a failed request.
pub fn decode_current_user<C: Codec>(
    codec: &C,
    body: &[u8],
) -> Result<UserIdentity, ProtocolError> {
    let response: CurrentUserResponse = codec.decode(body)?;
    let user = response.data.user;
    user.validate()?;
    Ok(user)
}

// ---------------------------------------------------------------------------
// JsonCodec
// ---------------------------------------------------------------------------

/// A [`Codec`] that uses JSON (via `serde_json`).
///
/// The identity endpoint speaks JSON, so this is the codec the session
/// guard uses by default. Behind the `json` feature (enabled by default).
///
/// ## Example
///
/// ```rust
/// use sprintdesk_protocol::{JsonCodec, Role, decode_current_user};
///
/// let body = br#"{"data":{"user":{
///     "id":"u-1","email":"ada@example.com","firstName":"Ada",
///     "lastName":"Lovelace","role":"ADMIN","organizationId":"org-1"}}}"#;
///
/// let user = decode_current_user(&JsonCodec, body).unwrap();
/// assert_eq!(user.role, Role::Admin);
/// ```
#[cfg(feature = "json")]
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonCodec;

#[cfg(feature = "json")]
impl Codec for JsonCodec {
    fn encode<T: Serialize>(&self, value: &T) -> Result<Vec<u8>, ProtocolError> {
        serde_json::to_vec(value).map_err(ProtocolError::Encode)
    }

    fn decode<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ProtocolError> {
        serde_json::from_slice(data).map_err(ProtocolError::Decode)
    }
}
