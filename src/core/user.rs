//! User accounts

use super::{Role, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A registered account: customer, agent, or administrator
///
/// `id` and `role` are immutable after creation; there are no mutators for
/// them. Credential issuance and verification live outside this crate — the
/// hash is stored here only so the record is complete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: UserId,
    /// Display name
    pub name: String,
    /// Email address, unique across the store
    pub email: String,
    /// Opaque credential hash, never exposed over the API
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credential_hash: Option<String>,
    /// Assigned role
    pub role: Role,
    /// When the account was created
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with the given role
    #[must_use]
    pub fn new(name: impl Into<String>, email: impl Into<String>, role: Role) -> Self {
        Self {
            id: UserId::new(),
            name: name.into(),
            email: email.into(),
            credential_hash: None,
            role,
            created_at: Utc::now(),
        }
    }

    /// Whether this user holds the Admin role
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Public identity of a user, as embedded in API responses
///
/// This is what gets populated into ticket and comment payloads; the
/// credential hash never travels with it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: Role,
}

impl From<&User> for UserRef {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
        }
    }
}
