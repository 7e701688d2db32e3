//! Identity types exchanged with the "current user" endpoint.
//!
//! These are read-only from the session layer's point of view: the
//! backend produces them, the client stores and displays them.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::ProtocolError;

// ---------------------------------------------------------------------------
// Identifiers
// ---------------------------------------------------------------------------

/// A unique identifier for a user account.
///
/// Newtype over the backend's opaque string id, so a `UserId` can't be
/// passed where an `OrganizationId` is expected. Serialized as the bare
/// string (`#[serde(transparent)]`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "U-{}", self.0)
    }
}

/// The organization (tenant) a user belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrganizationId(pub String);

impl fmt::Display for OrganizationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "O-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The fixed set of roles a Sprintdesk account can hold.
///
/// On the wire these are upper snake case: `"ADMIN"`, `"SCRUM_MASTER"`,
/// `"EMPLOYEE"`, `"CLIENT"`. Any other string fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Organization administrator.
    Admin,
    /// Runs sprints and boards for a team.
    ScrumMaster,
    /// Regular team member.
    Employee,
    /// External customer using the support portal.
    Client,
}

impl Role {
    /// The page a signed-in user of this role lands on.
    pub fn landing_path(self) -> &'static str {
        match self {
            Self::Admin => "/admin/dashboard",
            Self::ScrumMaster => "/scrum/dashboard",
            Self::Employee => "/employee/dashboard",
            Self::Client => "/client/portal",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => write!(f, "ADMIN"),
            Self::ScrumMaster => write!(f, "SCRUM_MASTER"),
            Self::Employee => write!(f, "EMPLOYEE"),
            Self::Client => write!(f, "CLIENT"),
        }
    }
}

// ---------------------------------------------------------------------------
// UserIdentity
// ---------------------------------------------------------------------------

/// Who the signed-in user is.
///
/// Field names follow the backend's camelCase JSON (`firstName`,
/// `organizationId`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserIdentity {
    pub id: UserId,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
    pub organization_id: OrganizationId,
}

impl UserIdentity {
    /// "First Last", trimmed, for greetings and menus.
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }

    /// Checks the fields serde can't: a non-empty id and a plausible email.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidIdentity`] describing the first
    /// problem found.
    pub fn validate(&self) -> Result<(), ProtocolError> {
        if self.id.0.trim().is_empty() {
            return Err(ProtocolError::InvalidIdentity("empty user id".into()));
        }
        if !self.email.contains('@') {
            return Err(ProtocolError::InvalidIdentity(format!(
                "email {:?} has no @",
                self.email
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Response envelope
// ---------------------------------------------------------------------------

/// Body of a successful "get current user" call:
/// `{ "data": { "user": { ... } } }`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUserResponse {
    pub data: CurrentUserData,
}

/// The `data` member of [`CurrentUserResponse`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUserData {
    pub user: UserIdentity,
}

impl From<UserIdentity> for CurrentUserResponse {
    fn from(user: UserIdentity) -> Self {
        Self {
            data: CurrentUserData { user },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn identity(role: Role) -> UserIdentity {
        UserIdentity {
            id: UserId("u-1".into()),
            email: "ada@example.com".into(),
            first_name: "Ada".into(),
            last_name: "Lovelace".into(),
            role,
            organization_id: OrganizationId("org-1".into()),
        }
    }

    #[test]
    fn test_role_landing_path_per_role() {
        assert_eq!(Role::Admin.landing_path(), "/admin/dashboard");
        assert_eq!(Role::ScrumMaster.landing_path(), "/scrum/dashboard");
        assert_eq!(Role::Employee.landing_path(), "/employee/dashboard");
        assert_eq!(Role::Client.landing_path(), "/client/portal");
    }

    #[test]
    fn test_role_serializes_screaming_snake_case() {
        let json = serde_json::to_string(&Role::ScrumMaster).unwrap();
        assert_eq!(json, "\"SCRUM_MASTER\"");

        let role: Role = serde_json::from_str("\"CLIENT\"").unwrap();
        assert_eq!(role, Role::Client);
    }

    #[test]
    fn test_role_display_matches_wire_name() {
        assert_eq!(Role::Admin.to_string(), "ADMIN");
        assert_eq!(Role::ScrumMaster.to_string(), "SCRUM_MASTER");
    }

    #[test]
    fn test_display_name_trims_missing_last_name() {
        let mut user = identity(Role::Employee);
        user.last_name.clear();

        assert_eq!(user.display_name(), "Ada");
    }

    #[test]
    fn test_validate_accepts_well_formed_identity() {
        assert!(identity(Role::Admin).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_email_without_at() {
        let mut user = identity(Role::Admin);
        user.email = "not-an-email".into();

        assert!(matches!(
            user.validate(),
            Err(ProtocolError::InvalidIdentity(_))
        ));
    }

    #[test]
    fn test_identifier_display_prefixes() {
        assert_eq!(UserId("42".into()).to_string(), "U-42");
        assert_eq!(OrganizationId("7".into()).to_string(), "O-7");
    }
}
