//! Core domain types for support-desk
//!
//! Everything the lifecycle engine, comment manager, and report aggregator
//! operate on lives here: ids, the role/status/priority enums, and the
//! `User`/`Ticket`/`Comment` records themselves.

mod builders;
mod comment;
mod id;
mod priority;
mod reset_token;
mod role;
mod status;
mod ticket;
mod user;

pub use builders::TicketBuilder;
pub use comment::{Comment, CommentView};
pub use id::{CommentId, TicketId, UserId};
pub use priority::Priority;
pub use reset_token::ResetToken;
pub use role::Role;
pub use status::Status;
pub use ticket::Ticket;
pub use user::{User, UserRef};
