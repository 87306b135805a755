//! Wire types for the users REST API as the client sees them.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Role assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular account.
    #[default]
    User,
    /// Administrator.
    Admin,
    /// Moderator.
    Moderator,
}

impl Role {
    /// All roles in the order the form offers them.
    pub const ALL: [Self; 3] = [Self::User, Self::Admin, Self::Moderator];

    /// Wire representation.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Admin => "admin",
            Self::Moderator => "moderator",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raised when text does not name a known role.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown role '{0}', expected one of user, admin, moderator")]
pub struct UnknownRole(pub String);

impl FromStr for Role {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|role| role.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| UnknownRole(s.to_owned()))
    }
}

/// A stored user as returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Server-assigned identifier.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Normalised email address.
    pub email: String,
    /// Age, omitted by the server when unknown.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u32>,
    /// Assigned role.
    pub role: Role,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

/// Body sent for both create and update requests.
///
/// `age` is always sent: `null` means "no age" on create and clears the
/// stored age on update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
    /// Age in years.
    pub age: Option<u32>,
    /// Role.
    pub role: Role,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use serde_json::json;

    #[rstest]
    fn decodes_server_user_without_age() {
        let user: User = serde_json::from_value(json!({
            "id": "0f7c9a55-8d7c-4b0e-9a43-3f1f0e2d3c4b",
            "name": "Ann",
            "email": "ann@x.com",
            "role": "moderator",
            "createdAt": "2024-05-01T09:30:00Z"
        }))
        .expect("user decodes");

        assert_eq!(user.age, None);
        assert_eq!(user.role, Role::Moderator);
        assert_eq!(user.created_at.to_rfc3339(), "2024-05-01T09:30:00+00:00");
    }

    #[rstest]
    fn payload_sends_null_age() {
        let payload = UserPayload {
            name: "Ann".to_owned(),
            email: "ann@x.com".to_owned(),
            age: None,
            role: Role::Admin,
        };

        assert_eq!(
            serde_json::to_value(payload).expect("payload encodes"),
            json!({ "name": "Ann", "email": "ann@x.com", "age": null, "role": "admin" })
        );
    }

    #[rstest]
    #[case("user", Role::User)]
    #[case(" Admin ", Role::Admin)]
    #[case("MODERATOR", Role::Moderator)]
    fn parses_roles_loosely(#[case] raw: &str, #[case] expected: Role) {
        assert_eq!(raw.parse::<Role>(), Ok(expected));
    }

    #[rstest]
    fn rejects_unknown_roles() {
        assert_eq!(
            "owner".parse::<Role>(),
            Err(UnknownRole("owner".to_owned()))
        );
    }
}
