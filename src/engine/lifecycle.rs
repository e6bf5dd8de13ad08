//! Ticket lifecycle engine
//!
//! Creation, role-scoped listing, reads, and the status/assignment update
//! path, including the notifications those mutations trigger.

use super::{resolve_thread, resolve_user_ref};
use crate::core::{CommentView, Priority, Role, Status, Ticket, TicketId, User, UserId, UserRef};
use crate::error::{Result, SupportDeskError};
use crate::guard::{self, Action};
use crate::notify::NotificationDispatcher;
use crate::storage::{Repository, TicketRepository, UserRepository};
use std::sync::Arc;

/// Fields an update may change; anything absent is left alone
#[derive(Debug, Default, Clone)]
pub struct TicketUpdate {
    pub status: Option<Status>,
    pub agent_id: Option<UserId>,
}

/// A ticket with its references resolved for display
#[derive(Debug, Clone, serde::Serialize)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: Ticket,
    /// The owning customer, absent if the account no longer exists
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer: Option<UserRef>,
    /// The assigned agent, if any and still resolvable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub agent: Option<UserRef>,
    /// The comment thread in insertion order
    pub comments: Vec<CommentView>,
}

/// Service owning ticket creation and mutation
pub struct TicketService<R> {
    store: Arc<R>,
    dispatcher: NotificationDispatcher,
}

impl<R: Repository> TicketService<R> {
    /// Create a lifecycle service over the given store
    pub fn new(store: Arc<R>, dispatcher: NotificationDispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// File a new ticket on behalf of a customer
    ///
    /// Status is forced to `Open`; it is never client-settable at creation.
    /// An absent priority falls back to `Medium`.
    pub fn create_ticket(
        &self,
        actor: &User,
        title: &str,
        description: &str,
        priority: Option<Priority>,
    ) -> Result<Ticket> {
        if !guard::allows(actor, Action::CreateTicket, None) {
            return Err(SupportDeskError::forbidden(
                "Only customers may create tickets",
            ));
        }

        let title = title.trim();
        let description = description.trim();
        if title.is_empty() {
            return Err(SupportDeskError::validation("Title is required"));
        }
        if description.is_empty() {
            return Err(SupportDeskError::validation("Description is required"));
        }

        let ticket = Ticket::new(
            actor.id.clone(),
            title,
            description,
            priority.unwrap_or_default(),
        );
        self.store.save(&ticket)?;

        tracing::info!(
            ticket = %ticket.id.short(),
            customer = %actor.id.short(),
            "Ticket created"
        );
        Ok(ticket)
    }

    /// List the tickets visible to this actor
    ///
    /// Admins see everything, agents their assigned tickets, customers their
    /// own. Order is the store's deterministic creation order.
    pub fn list_tickets(&self, actor: &User) -> Result<Vec<Ticket>> {
        match actor.role {
            Role::Admin => self.store.load_all(),
            Role::Agent => self.store.find(|t| t.is_assigned_to(&actor.id)),
            Role::Customer => self.store.find(|t| t.is_owned_by(&actor.id)),
        }
    }

    /// Fetch a single ticket with its thread and references resolved
    pub fn get_ticket(&self, actor: &User, ticket_id: &TicketId) -> Result<TicketDetail> {
        let ticket = self.store.load(ticket_id)?;

        if !guard::allows(actor, Action::ReadTicket, Some(&ticket)) {
            return Err(SupportDeskError::forbidden(
                "User not authorized to view this ticket",
            ));
        }

        let customer = resolve_user_ref(self.store.as_ref(), &ticket.customer_id);
        let agent = ticket
            .agent_id
            .as_ref()
            .and_then(|id| resolve_user_ref(self.store.as_ref(), id));
        let comments = resolve_thread(self.store.as_ref(), &ticket)?;

        Ok(TicketDetail {
            ticket,
            customer,
            agent,
            comments,
        })
    }

    /// Apply a status and/or assignment update to a ticket
    ///
    /// Customers are rejected before the ticket is even loaded. Assignment
    /// is Admin-only and rejected before any write. Both permission checks
    /// run before either change is persisted, so a denied update leaves the
    /// ticket untouched.
    ///
    /// Dispatch happens only after the write succeeds: an assignment
    /// notification to the new agent (skipped when the agent id does not
    /// resolve — the assignment itself still sticks), and a status
    /// notification to the ticket's customer.
    pub fn update_ticket(
        &self,
        actor: &User,
        ticket_id: &TicketId,
        update: TicketUpdate,
    ) -> Result<Ticket> {
        if actor.role == Role::Customer {
            return Err(SupportDeskError::forbidden(
                "User not authorized for this action",
            ));
        }

        let mut ticket = self.store.load(ticket_id)?;

        let status_changed = match update.status {
            Some(status) if status != ticket.status => {
                if !guard::allows(actor, Action::UpdateStatus, Some(&ticket)) {
                    return Err(SupportDeskError::forbidden(
                        "User not authorized to update this ticket's status",
                    ));
                }
                true
            },
            _ => false,
        };

        let assignment_changed = match &update.agent_id {
            Some(agent_id) if ticket.agent_id.as_ref() != Some(agent_id) => {
                if !guard::allows(actor, Action::UpdateAssignment, Some(&ticket)) {
                    return Err(SupportDeskError::forbidden(
                        "Only an admin may assign tickets",
                    ));
                }
                true
            },
            _ => false,
        };

        if status_changed {
            // Status may jump freely between any two values; no ordering is
            // enforced and a Closed ticket may be reopened.
            ticket.status = update.status.unwrap_or(ticket.status);
        }
        if assignment_changed {
            ticket.agent_id.clone_from(&update.agent_id);
        }

        if status_changed || assignment_changed {
            ticket.touch();
            self.store.save(&ticket)?;
        }

        if assignment_changed {
            if let Some(agent_id) = &ticket.agent_id {
                // The id is persisted even when it resolves to nothing; only
                // the notification is skipped in that case.
                match self.store.load_user(agent_id) {
                    Ok(agent) => self.dispatcher.notify_assignment(&agent, &ticket),
                    Err(e) => {
                        tracing::warn!(
                            ticket = %ticket.id.short(),
                            agent = %agent_id.short(),
                            "Assigned agent did not resolve, skipping notification: {e}"
                        );
                    },
                }
            }
        }

        if status_changed {
            match self.store.load_user(&ticket.customer_id) {
                Ok(customer) => self.dispatcher.notify_status_change(&customer, &ticket),
                Err(e) => {
                    tracing::warn!(
                        ticket = %ticket.id.short(),
                        "Ticket customer did not resolve, skipping notification: {e}"
                    );
                },
            }
        }

        Ok(ticket)
    }
}
