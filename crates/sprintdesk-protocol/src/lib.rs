//! Identity payloads for the Sprintdesk client.
//!
//! This crate defines the data the session layer exchanges with the
//! outside world:
//!
//! - **Types** ([`UserIdentity`], [`Role`], [`CurrentUserResponse`]) —
//!   who the signed-in user is and how the "current user" endpoint
//!   shapes its answer.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how those payloads are
//!   converted to/from bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong while decoding or
//!   validating a payload.
//!
//! # Architecture
//!
//! ```text
//! Identity endpoint (bytes) → Protocol (UserIdentity) → Session (SessionState)
//! ```
//!
//! The protocol layer knows nothing about tokens, timers, or navigation.

mod codec;
mod error;
mod types;

pub use codec::{Codec, decode_current_user};
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    CurrentUserData, CurrentUserResponse, OrganizationId, Role, UserId,
    UserIdentity,
};
