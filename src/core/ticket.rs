//! Ticket domain type

use super::{CommentId, Priority, Status, TicketId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A trackable support request
///
/// `customer_id` is fixed at creation and never changes. `comment_ids` is
/// append-only and preserves insertion order. Every mutator refreshes
/// `updated_at` through [`Ticket::touch`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ticket {
    /// Unique ticket identifier
    pub id: TicketId,
    /// The customer who filed the ticket (owner)
    pub customer_id: UserId,
    /// The agent assigned to the ticket, if any
    #[serde(default)]
    pub agent_id: Option<UserId>,
    /// Short summary of the request
    pub title: String,
    /// Full description of the request
    pub description: String,
    /// Current lifecycle status
    #[serde(default)]
    pub status: Status,
    /// Current priority
    #[serde(default)]
    pub priority: Priority,
    /// Ids of comments in the ticket's thread, in insertion order
    #[serde(default)]
    pub comment_ids: Vec<CommentId>,
    /// When the ticket was created
    pub created_at: DateTime<Utc>,
    /// When the ticket was last mutated
    pub updated_at: DateTime<Utc>,
}

impl Ticket {
    /// Create a new ticket for a customer
    ///
    /// Status is always `Open` at creation, regardless of anything the
    /// caller supplied; it is not client-settable here.
    #[must_use]
    pub fn new(
        customer_id: UserId,
        title: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: TicketId::new(),
            customer_id,
            agent_id: None,
            title: title.into(),
            description: description.into(),
            status: Status::Open,
            priority,
            comment_ids: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Refresh the `updated_at` timestamp
    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }

    /// Set the status and refresh `updated_at`
    pub fn set_status(&mut self, status: Status) {
        self.status = status;
        self.touch();
    }

    /// Bind an agent to the ticket and refresh `updated_at`
    pub fn assign_agent(&mut self, agent_id: UserId) {
        self.agent_id = Some(agent_id);
        self.touch();
    }

    /// Append a comment id to the thread and refresh `updated_at`
    pub fn push_comment(&mut self, comment_id: CommentId) {
        self.comment_ids.push(comment_id);
        self.touch();
    }

    /// Whether the given user owns this ticket
    #[must_use]
    pub fn is_owned_by(&self, user_id: &UserId) -> bool {
        &self.customer_id == user_id
    }

    /// Whether the given user is the assigned agent
    #[must_use]
    pub fn is_assigned_to(&self, user_id: &UserId) -> bool {
        self.agent_id.as_ref() == Some(user_id)
    }
}
