//! Notification dispatch
//!
//! The core emits notification events and moves on: `NotificationDispatcher`
//! pushes onto an unbounded channel and never blocks, never fails, and never
//! reports delivery problems back to the mutation that triggered them. A
//! worker task drains the channel into a [`NotificationSink`] — the actual
//! delivery collaborator (mail, in production) — and logs sink failures at
//! `warn`. A lost notification is acceptable degradation; a lost ticket
//! mutation is not, so the two are kept strictly apart.

use crate::core::{Ticket, User};
use std::sync::Arc;
use tokio::sync::mpsc;

/// A notification event, carrying fully-resolved recipient and ticket data
#[derive(Debug, Clone)]
pub enum Notification {
    /// A ticket was assigned to an agent
    Assignment { agent: User, ticket: Ticket },
    /// A ticket's status changed; goes to the ticket's customer
    StatusChange { customer: User, ticket: Ticket },
    /// A new comment was added; goes to the ticket's customer
    NewComment {
        recipient: User,
        commenter: User,
        ticket: Ticket,
    },
}

impl Notification {
    /// The user this notification is addressed to
    #[must_use]
    pub const fn recipient(&self) -> &User {
        match self {
            Self::Assignment { agent, .. } => agent,
            Self::StatusChange { customer, .. } => customer,
            Self::NewComment { recipient, .. } => recipient,
        }
    }
}

/// Delivery collaborator the worker hands events to
///
/// Implementations own their transport and their failures; an `Err` here is
/// logged and dropped, never surfaced to the caller that mutated the ticket.
#[cfg_attr(test, mockall::automock)]
pub trait NotificationSink: Send + Sync {
    /// Deliver a single notification
    fn deliver(&self, notification: &Notification) -> anyhow::Result<()>;
}

/// Sink that only logs, standing in for the outbound-mail collaborator
#[derive(Debug, Default)]
pub struct LogSink;

impl NotificationSink for LogSink {
    fn deliver(&self, notification: &Notification) -> anyhow::Result<()> {
        match notification {
            Notification::Assignment { agent, ticket } => {
                tracing::info!(
                    to = %agent.email,
                    ticket = %ticket.id.short(),
                    "Ticket \"{}\" assigned", ticket.title
                );
            },
            Notification::StatusChange { customer, ticket } => {
                tracing::info!(
                    to = %customer.email,
                    ticket = %ticket.id.short(),
                    "Ticket \"{}\" is now {}", ticket.title, ticket.status
                );
            },
            Notification::NewComment {
                recipient,
                commenter,
                ticket,
            } => {
                tracing::info!(
                    to = %recipient.email,
                    from = %commenter.name,
                    ticket = %ticket.id.short(),
                    "New comment on \"{}\"", ticket.title
                );
            },
        }
        Ok(())
    }
}

/// Handle the core uses to emit notifications
///
/// Cloneable and cheap; every send is fire-and-forget. A closed channel
/// (receiver dropped, e.g. in tests that only probe the core) is silently
/// ignored.
#[derive(Debug, Clone)]
pub struct NotificationDispatcher {
    sender: mpsc::UnboundedSender<Notification>,
}

impl NotificationDispatcher {
    /// Create a dispatcher and the receiving end of its channel
    #[must_use]
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Notification>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        (Self { sender }, receiver)
    }

    /// Create a dispatcher whose events go nowhere
    #[must_use]
    pub fn disconnected() -> Self {
        let (dispatcher, _receiver) = Self::channel();
        dispatcher
    }

    /// Notify an agent that a ticket was assigned to them
    pub fn notify_assignment(&self, agent: &User, ticket: &Ticket) {
        self.emit(Notification::Assignment {
            agent: agent.clone(),
            ticket: ticket.clone(),
        });
    }

    /// Notify a customer that their ticket's status changed
    pub fn notify_status_change(&self, customer: &User, ticket: &Ticket) {
        self.emit(Notification::StatusChange {
            customer: customer.clone(),
            ticket: ticket.clone(),
        });
    }

    /// Notify a recipient that someone commented on a ticket
    pub fn notify_new_comment(&self, recipient: &User, commenter: &User, ticket: &Ticket) {
        self.emit(Notification::NewComment {
            recipient: recipient.clone(),
            commenter: commenter.clone(),
            ticket: ticket.clone(),
        });
    }

    fn emit(&self, notification: Notification) {
        tracing::debug!(
            recipient = %notification.recipient().email,
            "Queueing notification"
        );
        let _ = self.sender.send(notification);
    }
}

/// Spawn the worker that drains dispatched events into a sink
///
/// Runs until every dispatcher clone is dropped. Sink failures are logged
/// and swallowed.
pub fn spawn_worker(
    mut receiver: mpsc::UnboundedReceiver<Notification>,
    sink: Arc<dyn NotificationSink>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(notification) = receiver.recv().await {
            if let Err(e) = sink.deliver(&notification) {
                tracing::warn!(
                    recipient = %notification.recipient().email,
                    "Failed to deliver notification: {e}"
                );
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Priority, Role, TicketBuilder};

    fn sample() -> (User, User, Ticket) {
        let customer = User::new("Carol", "carol@example.com", Role::Customer);
        let agent = User::new("Alex", "alex@example.com", Role::Agent);
        let ticket = TicketBuilder::new()
            .customer(customer.id.clone())
            .title("Printer")
            .description("jam")
            .priority(Priority::High)
            .build();
        (customer, agent, ticket)
    }

    #[test]
    fn test_dispatch_is_observable() {
        let (dispatcher, mut receiver) = NotificationDispatcher::channel();
        let (customer, agent, ticket) = sample();

        dispatcher.notify_assignment(&agent, &ticket);
        dispatcher.notify_status_change(&customer, &ticket);

        match receiver.try_recv().unwrap() {
            Notification::Assignment { agent: a, .. } => assert_eq!(a.id, agent.id),
            other => panic!("unexpected notification: {other:?}"),
        }
        match receiver.try_recv().unwrap() {
            Notification::StatusChange { customer: c, .. } => assert_eq!(c.id, customer.id),
            other => panic!("unexpected notification: {other:?}"),
        }
        assert!(receiver.try_recv().is_err());
    }

    #[test]
    fn test_dispatch_with_dropped_receiver_does_not_panic() {
        let dispatcher = NotificationDispatcher::disconnected();
        let (customer, _, ticket) = sample();
        dispatcher.notify_status_change(&customer, &ticket);
    }

    #[tokio::test]
    async fn test_worker_swallows_sink_failures() {
        let (dispatcher, receiver) = NotificationDispatcher::channel();

        let mut sink = MockNotificationSink::new();
        sink.expect_deliver()
            .times(2)
            .returning(|_| Err(anyhow::anyhow!("smtp down")));

        let handle = spawn_worker(receiver, Arc::new(sink));

        let (customer, agent, ticket) = sample();
        dispatcher.notify_assignment(&agent, &ticket);
        dispatcher.notify_new_comment(&customer, &agent, &ticket);
        drop(dispatcher);

        // Worker exits cleanly once all senders are gone; failures stayed
        // inside the worker.
        handle.await.unwrap();
    }
}
