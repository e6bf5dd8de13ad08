//! Comments attached to a ticket thread

use super::{CommentId, TicketId, UserId, UserRef};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single comment in a ticket's thread
///
/// Comments are immutable once created; there is no edit or delete.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Unique comment identifier
    pub id: CommentId,
    /// The ticket this comment belongs to
    pub ticket_id: TicketId,
    /// Who wrote it
    pub author_id: UserId,
    /// Comment body, non-empty after trimming
    pub text: String,
    /// When the comment was created
    pub created_at: DateTime<Utc>,
}

impl Comment {
    /// Create a new comment on a ticket
    #[must_use]
    pub fn new(ticket_id: TicketId, author_id: UserId, text: impl Into<String>) -> Self {
        Self {
            id: CommentId::new(),
            ticket_id,
            author_id,
            text: text.into(),
            created_at: Utc::now(),
        }
    }
}

/// A comment with its author identity resolved for display
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    #[serde(flatten)]
    pub comment: Comment,
    /// Resolved author, absent if the account no longer exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<UserRef>,
}
