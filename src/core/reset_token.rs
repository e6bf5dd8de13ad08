//! Password-reset tokens
//!
//! The reset flow itself (token mailing, redemption) is an external
//! collaborator's concern; the record is modeled here so the store's
//! interface is complete. A user has at most one active token — the
//! repository keys tokens by user id, so storing a new one replaces the
//! prior one.

use super::UserId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An outstanding password-reset token for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetToken {
    /// The user this token belongs to
    pub user_id: UserId,
    /// Hash of the token value; the raw token is never stored
    pub token_hash: String,
    /// When the token was issued
    pub created_at: DateTime<Utc>,
}

impl ResetToken {
    /// Issue a token record for a user
    #[must_use]
    pub fn new(user_id: UserId, token_hash: impl Into<String>) -> Self {
        Self {
            user_id,
            token_hash: token_hash.into(),
            created_at: Utc::now(),
        }
    }
}
