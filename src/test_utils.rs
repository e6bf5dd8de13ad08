//! Test utilities for support-desk
//!
//! Common fixtures shared by the unit tests: a temp-dir-backed store with
//! one seeded user per role, plus shortcuts for wiring services to it.

#![cfg(test)]

use crate::core::{Priority, Role, Status, Ticket, TicketBuilder, TicketId, User, UserId};
use crate::engine::{CommentService, ReportService, TicketService};
use crate::notify::{Notification, NotificationDispatcher};
use crate::storage::{FileStorage, TicketRepository};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

/// Test fixture: a storage root with one user of each role
pub struct TestDesk {
    pub temp_dir: TempDir,
    pub storage: Arc<FileStorage>,
    pub customer: User,
    pub agent: User,
    pub admin: User,
}

impl TestDesk {
    /// Create a fresh desk with seeded users
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = Arc::new(FileStorage::new(temp_dir.path().join("desk-data")));

        let customer = User::new("Carol Customer", "carol@example.com", Role::Customer);
        let agent = User::new("Alex Agent", "alex@example.com", Role::Agent);
        let admin = User::new("Ada Admin", "ada@example.com", Role::Admin);
        for user in [&customer, &agent, &admin] {
            storage.save_user(user).expect("Failed to save user");
        }

        Self {
            temp_dir,
            storage,
            customer,
            agent,
            admin,
        }
    }

    /// Seed and persist an additional customer
    pub fn add_customer(&self, name: &str, email: &str) -> User {
        let user = User::new(name, email, Role::Customer);
        self.storage.save_user(&user).expect("Failed to save user");
        user
    }

    /// Seed and persist an additional agent
    pub fn add_agent(&self, name: &str, email: &str) -> User {
        let user = User::new(name, email, Role::Agent);
        self.storage.save_user(&user).expect("Failed to save user");
        user
    }

    /// Create and persist a ticket owned by the given customer
    pub fn create_ticket(&self, customer: &User, title: &str) -> Ticket {
        let ticket = TicketBuilder::new()
            .customer(customer.id.clone())
            .title(title)
            .description(format!("Description for {title}"))
            .build();
        self.storage.save(&ticket).expect("Failed to save ticket");
        ticket
    }

    /// Persist a ticket in an arbitrary state, for report scenarios
    pub fn seed_ticket(
        &self,
        status: Status,
        priority: Priority,
        agent_id: Option<UserId>,
    ) -> Ticket {
        let mut builder = TicketBuilder::new()
            .customer(self.customer.id.clone())
            .title(format!("{status} {priority}"))
            .description("seeded")
            .status(status)
            .priority(priority);
        if let Some(agent_id) = agent_id {
            builder = builder.agent(agent_id);
        }
        let ticket = builder.build();
        self.storage.save(&ticket).expect("Failed to save ticket");
        ticket
    }

    /// Bind an agent to a stored ticket directly, bypassing the engine
    pub fn assign(&self, ticket_id: &TicketId, agent_id: &UserId) {
        let mut ticket = self.storage.load(ticket_id).expect("Failed to load ticket");
        ticket.assign_agent(agent_id.clone());
        self.storage.save(&ticket).expect("Failed to save ticket");
    }

    /// Lifecycle service with notifications going nowhere
    pub fn ticket_service(&self) -> TicketService<FileStorage> {
        TicketService::new(self.storage.clone(), NotificationDispatcher::disconnected())
    }

    /// Lifecycle service plus the receiving end of its event channel
    pub fn ticket_service_with_events(
        &self,
    ) -> (TicketService<FileStorage>, UnboundedReceiver<Notification>) {
        let (dispatcher, receiver) = NotificationDispatcher::channel();
        (TicketService::new(self.storage.clone(), dispatcher), receiver)
    }

    /// Comment service with notifications going nowhere
    pub fn comment_service(&self) -> CommentService<FileStorage> {
        CommentService::new(self.storage.clone(), NotificationDispatcher::disconnected())
    }

    /// Comment service plus the receiving end of its event channel
    pub fn comment_service_with_events(
        &self,
    ) -> (CommentService<FileStorage>, UnboundedReceiver<Notification>) {
        let (dispatcher, receiver) = NotificationDispatcher::channel();
        (CommentService::new(self.storage.clone(), dispatcher), receiver)
    }

    /// Report service over the same store
    pub fn report_service(&self) -> ReportService<FileStorage> {
        ReportService::new(self.storage.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_desk_seeds_one_user_per_role() {
        let desk = TestDesk::new();
        assert_eq!(desk.customer.role, Role::Customer);
        assert_eq!(desk.agent.role, Role::Agent);
        assert_eq!(desk.admin.role, Role::Admin);

        let found = desk
            .storage
            .find_user_by_email("carol@example.com")
            .unwrap();
        assert_eq!(found.unwrap().id, desk.customer.id);
    }

    #[test]
    fn test_create_and_assign() {
        let desk = TestDesk::new();
        let ticket = desk.create_ticket(&desk.customer, "Sample");
        desk.assign(&ticket.id, &desk.agent.id);

        let stored = desk.storage.load(&ticket.id).unwrap();
        assert!(stored.is_assigned_to(&desk.agent.id));
    }
}
