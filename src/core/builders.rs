use super::{CommentId, Priority, Status, Ticket, TicketId, UserId};
use chrono::{DateTime, Utc};

/// Builder for creating Ticket instances
///
/// Mostly useful in tests and seed tooling, where tickets need to be put
/// into arbitrary states without walking the lifecycle engine.
#[derive(Default)]
pub struct TicketBuilder {
    id: Option<TicketId>,
    customer_id: Option<UserId>,
    agent_id: Option<UserId>,
    title: Option<String>,
    description: Option<String>,
    priority: Option<Priority>,
    status: Option<Status>,
    comment_ids: Vec<CommentId>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl TicketBuilder {
    /// Create a new ticket builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ticket ID
    #[must_use]
    pub fn id(mut self, id: TicketId) -> Self {
        self.id = Some(id);
        self
    }

    /// Set the owning customer
    #[must_use]
    pub fn customer(mut self, customer_id: UserId) -> Self {
        self.customer_id = Some(customer_id);
        self
    }

    /// Set the assigned agent
    #[must_use]
    pub fn agent(mut self, agent_id: UserId) -> Self {
        self.agent_id = Some(agent_id);
        self
    }

    /// Set the title
    #[must_use]
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the description
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the priority
    #[must_use]
    pub const fn priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    /// Set the status
    #[must_use]
    pub const fn status(mut self, status: Status) -> Self {
        self.status = Some(status);
        self
    }

    /// Append a comment id to the thread
    #[must_use]
    pub fn comment(mut self, comment_id: CommentId) -> Self {
        self.comment_ids.push(comment_id);
        self
    }

    /// Set `created_at` timestamp
    #[must_use]
    pub const fn created_at(mut self, created_at: DateTime<Utc>) -> Self {
        self.created_at = Some(created_at);
        self
    }

    /// Set `updated_at` timestamp
    #[must_use]
    pub const fn updated_at(mut self, updated_at: DateTime<Utc>) -> Self {
        self.updated_at = Some(updated_at);
        self
    }

    /// Build the ticket
    pub fn build(self) -> Ticket {
        let created_at = self.created_at.unwrap_or_else(Utc::now);
        Ticket {
            id: self.id.unwrap_or_default(),
            customer_id: self.customer_id.unwrap_or_default(),
            agent_id: self.agent_id,
            title: self.title.unwrap_or_default(),
            description: self.description.unwrap_or_default(),
            priority: self.priority.unwrap_or_default(),
            status: self.status.unwrap_or_default(),
            comment_ids: self.comment_ids,
            created_at,
            updated_at: self.updated_at.unwrap_or(created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_builder() {
        let customer = UserId::new();
        let agent = UserId::new();
        let ticket = TicketBuilder::new()
            .customer(customer.clone())
            .agent(agent.clone())
            .title("Printer down")
            .description("Paper jam in tray 2")
            .priority(Priority::High)
            .status(Status::InProgress)
            .build();

        assert_eq!(ticket.customer_id, customer);
        assert_eq!(ticket.agent_id, Some(agent));
        assert_eq!(ticket.title, "Printer down");
        assert_eq!(ticket.priority, Priority::High);
        assert_eq!(ticket.status, Status::InProgress);
    }

    #[test]
    fn test_builder_defaults() {
        let ticket = TicketBuilder::new().title("bare").build();
        assert_eq!(ticket.status, Status::Open);
        assert_eq!(ticket.priority, Priority::Medium);
        assert!(ticket.comment_ids.is_empty());
        assert_eq!(ticket.created_at, ticket.updated_at);
    }
}
