//! Comment thread manager

use super::resolve_thread;
use crate::core::{Comment, CommentView, TicketId, User, UserRef};
use crate::error::{Result, SupportDeskError};
use crate::guard::{self, Action};
use crate::notify::NotificationDispatcher;
use crate::storage::{CommentRepository, Repository, TicketRepository, UserRepository};
use std::sync::Arc;

/// Service owning a ticket's comment thread
pub struct CommentService<R> {
    store: Arc<R>,
    dispatcher: NotificationDispatcher,
}

impl<R: Repository> CommentService<R> {
    /// Create a comment service over the given store
    pub fn new(store: Arc<R>, dispatcher: NotificationDispatcher) -> Self {
        Self { store, dispatcher }
    }

    /// Append a comment to a ticket's thread
    ///
    /// The ticket's customer is notified of the new comment unless the actor
    /// IS that customer; nobody is told about their own comment.
    pub fn add_comment(
        &self,
        actor: &User,
        ticket_id: &TicketId,
        text: &str,
    ) -> Result<CommentView> {
        let text = text.trim();
        if text.is_empty() {
            return Err(SupportDeskError::validation("Comment text is required"));
        }

        let mut ticket = self.store.load(ticket_id)?;

        if !guard::allows(actor, Action::Comment, Some(&ticket)) {
            return Err(SupportDeskError::forbidden(
                "User not authorized to comment on this ticket",
            ));
        }

        let comment = Comment::new(ticket_id.clone(), actor.id.clone(), text);
        self.store.save_comment(&comment)?;

        ticket.push_comment(comment.id.clone());
        self.store.save(&ticket)?;

        if !ticket.is_owned_by(&actor.id) {
            match self.store.load_user(&ticket.customer_id) {
                Ok(customer) => self.dispatcher.notify_new_comment(&customer, actor, &ticket),
                Err(e) => {
                    tracing::warn!(
                        ticket = %ticket.id.short(),
                        "Ticket customer did not resolve, skipping notification: {e}"
                    );
                },
            }
        }

        tracing::debug!(
            ticket = %ticket.id.short(),
            comment = %comment.id.short(),
            "Comment added"
        );
        Ok(CommentView {
            comment,
            author: Some(UserRef::from(actor)),
        })
    }

    /// Fetch a ticket's thread in creation order, authors resolved
    ///
    /// Subject to the same read eligibility as reading the ticket itself.
    pub fn get_thread(&self, actor: &User, ticket_id: &TicketId) -> Result<Vec<CommentView>> {
        let ticket = self.store.load(ticket_id)?;

        if !guard::allows(actor, Action::ReadTicket, Some(&ticket)) {
            return Err(SupportDeskError::forbidden(
                "User not authorized to view this ticket",
            ));
        }

        resolve_thread(self.store.as_ref(), &ticket)
    }
}
