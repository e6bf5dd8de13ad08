use crate::core::{Comment, CommentId, ResetToken, Ticket, TicketId, User, UserId};
use crate::error::Result;

/// Repository trait for ticket storage operations
///
/// This trait defines the interface for storing and retrieving tickets,
/// allowing for different storage implementations.
pub trait TicketRepository: Send + Sync {
    /// Saves a ticket to the repository
    fn save(&self, ticket: &Ticket) -> Result<()>;

    /// Loads a ticket by ID
    fn load(&self, id: &TicketId) -> Result<Ticket>;

    /// Loads all tickets, in deterministic store order
    fn load_all(&self) -> Result<Vec<Ticket>>;

    /// Checks if a ticket exists by ID
    fn exists(&self, id: &TicketId) -> Result<bool>;

    /// Finds tickets matching a predicate, preserving store order
    fn find<F>(&self, predicate: F) -> Result<Vec<Ticket>>
    where
        F: Fn(&Ticket) -> bool;

    /// Counts tickets matching a predicate
    fn count<F>(&self, predicate: F) -> Result<usize>
    where
        F: Fn(&Ticket) -> bool;
}

/// Repository trait for user accounts
pub trait UserRepository: Send + Sync {
    /// Saves a user to the repository
    fn save_user(&self, user: &User) -> Result<()>;

    /// Loads a user by ID
    fn load_user(&self, id: &UserId) -> Result<User>;

    /// Finds a user by their (unique) email address
    fn find_user_by_email(&self, email: &str) -> Result<Option<User>>;
}

/// Repository trait for comments
pub trait CommentRepository: Send + Sync {
    /// Saves a comment to the repository
    fn save_comment(&self, comment: &Comment) -> Result<()>;

    /// Loads a comment by ID
    fn load_comment(&self, id: &CommentId) -> Result<Comment>;
}

/// Repository trait for password-reset tokens
///
/// Storing a token for a user replaces any previously active token.
pub trait ResetTokenRepository: Send + Sync {
    /// Stores a token, invalidating the user's prior token if any
    fn store_token(&self, token: &ResetToken) -> Result<()>;

    /// Loads the active token for a user, if one exists
    fn load_token(&self, user_id: &UserId) -> Result<Option<ResetToken>>;

    /// Deletes the active token for a user
    fn delete_token(&self, user_id: &UserId) -> Result<()>;
}

/// Combined repository trait
pub trait Repository:
    TicketRepository + UserRepository + CommentRepository + ResetTokenRepository
{
}

/// Implementation of Repository for types that implement all four traits
impl<T> Repository for T where
    T: TicketRepository + UserRepository + CommentRepository + ResetTokenRepository
{
}

use super::file::FileStorage;

impl TicketRepository for FileStorage {
    fn save(&self, ticket: &Ticket) -> Result<()> {
        self.save_ticket(ticket)
    }

    fn load(&self, id: &TicketId) -> Result<Ticket> {
        self.load_ticket(id)
    }

    fn load_all(&self) -> Result<Vec<Ticket>> {
        self.load_all_tickets()
    }

    fn exists(&self, id: &TicketId) -> Result<bool> {
        match self.load_ticket(id) {
            Ok(_) => Ok(true),
            Err(crate::error::SupportDeskError::TicketNotFound { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    fn find<F>(&self, predicate: F) -> Result<Vec<Ticket>>
    where
        F: Fn(&Ticket) -> bool,
    {
        let tickets = self.load_all_tickets()?;
        Ok(tickets.into_iter().filter(predicate).collect())
    }

    fn count<F>(&self, predicate: F) -> Result<usize>
    where
        F: Fn(&Ticket) -> bool,
    {
        let tickets = self.load_all_tickets()?;
        Ok(tickets.iter().filter(|t| predicate(t)).count())
    }
}

impl UserRepository for FileStorage {
    fn save_user(&self, user: &User) -> Result<()> {
        self.save_user(user)
    }

    fn load_user(&self, id: &UserId) -> Result<User> {
        self.load_user(id)
    }

    fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.find_user_by_email(email)
    }
}

impl CommentRepository for FileStorage {
    fn save_comment(&self, comment: &Comment) -> Result<()> {
        self.save_comment(comment)
    }

    fn load_comment(&self, id: &CommentId) -> Result<Comment> {
        self.load_comment(id)
    }
}

impl ResetTokenRepository for FileStorage {
    fn store_token(&self, token: &ResetToken) -> Result<()> {
        self.store_reset_token(token)
    }

    fn load_token(&self, user_id: &UserId) -> Result<Option<ResetToken>> {
        self.load_reset_token(user_id)
    }

    fn delete_token(&self, user_id: &UserId) -> Result<()> {
        self.delete_reset_token(user_id)
    }
}
