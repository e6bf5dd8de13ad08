//! Core engine: ticket lifecycle, comment threads, and reporting
//!
//! Each service is constructed with an explicit store handle (and, where it
//! emits events, a dispatcher handle); there is no module-level state. Every
//! operation consults the guard before touching anything.

mod comments;
mod lifecycle;
mod reports;

pub use comments::CommentService;
pub use lifecycle::{TicketDetail, TicketService, TicketUpdate};
pub use reports::{ReportFilter, ReportService, StatusCount, TicketReport};

use crate::core::{CommentView, Ticket, UserId, UserRef};
use crate::error::Result;
use crate::storage::{CommentRepository, UserRepository};

/// Resolve a user id to its public identity, or `None` if the account is gone
///
/// A dangling reference (deleted user behind a ticket or comment) degrades
/// to an absent identity rather than failing the read.
pub(crate) fn resolve_user_ref<R: UserRepository>(store: &R, id: &UserId) -> Option<UserRef> {
    match store.load_user(id) {
        Ok(user) => Some(UserRef::from(&user)),
        Err(e) => {
            tracing::debug!(user = %id.short(), "Could not resolve user: {e}");
            None
        },
    }
}

/// Load a ticket's comments in thread order, with authors resolved
pub(crate) fn resolve_thread<R>(store: &R, ticket: &Ticket) -> Result<Vec<CommentView>>
where
    R: CommentRepository + UserRepository,
{
    let mut thread = Vec::with_capacity(ticket.comment_ids.len());
    for comment_id in &ticket.comment_ids {
        match store.load_comment(comment_id) {
            Ok(comment) => {
                let author = resolve_user_ref(store, &comment.author_id);
                thread.push(CommentView { comment, author });
            },
            Err(e) if e.is_not_found() => {
                tracing::warn!(
                    ticket = %ticket.id.short(),
                    comment = %comment_id.short(),
                    "Thread references a missing comment"
                );
            },
            Err(e) => return Err(e),
        }
    }
    Ok(thread)
}
