//! Shared fixtures for the integration suites

#![allow(dead_code)]

use std::sync::Arc;
use support_desk::core::{Role, Ticket, TicketBuilder, User};
use support_desk::engine::{CommentService, ReportService, TicketService};
use support_desk::notify::{Notification, NotificationDispatcher};
use support_desk::storage::{FileStorage, TicketRepository};
use tempfile::TempDir;
use tokio::sync::mpsc::UnboundedReceiver;

/// A storage root with one user per role and fully wired services
pub struct Desk {
    pub _temp_dir: TempDir,
    pub storage: Arc<FileStorage>,
    pub events: UnboundedReceiver<Notification>,
    pub tickets: TicketService<FileStorage>,
    pub comments: CommentService<FileStorage>,
    pub reports: ReportService<FileStorage>,
    pub customer: User,
    pub agent: User,
    pub admin: User,
}

impl Desk {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let storage = Arc::new(FileStorage::new(temp_dir.path().join("desk-data")));

        let customer = User::new("Carol Customer", "carol@example.com", Role::Customer);
        let agent = User::new("Alex Agent", "alex@example.com", Role::Agent);
        let admin = User::new("Ada Admin", "ada@example.com", Role::Admin);
        for user in [&customer, &agent, &admin] {
            storage.save_user(user).expect("Failed to save user");
        }

        let (dispatcher, events) = NotificationDispatcher::channel();
        Self {
            tickets: TicketService::new(storage.clone(), dispatcher.clone()),
            comments: CommentService::new(storage.clone(), dispatcher),
            reports: ReportService::new(storage.clone()),
            _temp_dir: temp_dir,
            storage,
            events,
            customer,
            agent,
            admin,
        }
    }

    /// Seed and persist an extra user with the given role
    pub fn add_user(&self, name: &str, email: &str, role: Role) -> User {
        let user = User::new(name, email, role);
        self.storage.save_user(&user).expect("Failed to save user");
        user
    }

    /// Persist a ticket directly, bypassing the engine
    pub fn seed_ticket(&self, build: impl FnOnce(TicketBuilder) -> TicketBuilder) -> Ticket {
        let ticket = build(
            TicketBuilder::new()
                .customer(self.customer.id.clone())
                .title("Seeded")
                .description("seeded"),
        )
        .build();
        self.storage.save(&ticket).expect("Failed to save ticket");
        ticket
    }

    /// Assert no notification was dispatched
    pub fn assert_no_events(&mut self) {
        assert!(
            self.events.try_recv().is_err(),
            "expected no notifications to have been dispatched"
        );
    }
}
