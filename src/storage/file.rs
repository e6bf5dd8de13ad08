//! File-backed persistence
//!
//! One YAML document per record, grouped by collection directory:
//!
//! ```text
//! <root>/
//!   tickets/<ticket-id>.yaml
//!   users/<user-id>.yaml
//!   comments/<comment-id>.yaml
//!   tokens/<user-id>.yaml
//! ```
//!
//! Writes go to a sibling `.tmp` file and are renamed into place, so a
//! single document is always either the old version or the new one. Nothing
//! is locked across documents; concurrent writers of the same ticket are
//! last-write-wins by design.

use crate::core::{Comment, CommentId, ResetToken, Ticket, TicketId, User, UserId};
use crate::error::{Result, SupportDeskError};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::path::{Path, PathBuf};

/// File-based storage for users, tickets, comments, and reset tokens
#[derive(Debug, Clone)]
pub struct FileStorage {
    root: PathBuf,
}

impl FileStorage {
    /// Create a storage handle rooted at the given directory
    ///
    /// Collection directories are created lazily on first write.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory this store writes under
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn collection(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    fn document_path(&self, collection: &str, id: &str) -> PathBuf {
        self.collection(collection).join(format!("{id}.yaml"))
    }

    /// Serialize a record and rename it into place
    fn write_document<T: Serialize>(&self, collection: &str, id: &str, value: &T) -> Result<()> {
        let dir = self.collection(collection);
        fs::create_dir_all(&dir)?;

        let path = self.document_path(collection, id);
        let tmp = dir.join(format!("{id}.yaml.tmp"));
        let content = serde_yaml::to_string(value)?;
        fs::write(&tmp, content)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    /// Read and parse a record, mapping a missing file through `not_found`
    fn read_document<T, F>(&self, collection: &str, id: &str, not_found: F) -> Result<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> SupportDeskError,
    {
        let path = self.document_path(collection, id);
        if !path.exists() {
            return Err(not_found());
        }
        let content = fs::read_to_string(&path)?;
        Ok(serde_yaml::from_str(&content)?)
    }

    /// Load every record in a collection directory
    fn read_collection<T: DeserializeOwned>(&self, collection: &str) -> Result<Vec<T>> {
        let dir = self.collection(collection);
        if !dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("yaml") {
                continue;
            }
            let content = fs::read_to_string(&path)?;
            records.push(serde_yaml::from_str(&content)?);
        }
        Ok(records)
    }

    // --- tickets ---

    pub fn save_ticket(&self, ticket: &Ticket) -> Result<()> {
        self.write_document("tickets", &ticket.id.to_string(), ticket)
    }

    pub fn load_ticket(&self, id: &TicketId) -> Result<Ticket> {
        self.read_document("tickets", &id.to_string(), || {
            SupportDeskError::TicketNotFound { id: id.to_string() }
        })
    }

    /// Load all tickets in deterministic store order
    ///
    /// Directory iteration order is not stable across filesystems, so the
    /// result is sorted by creation time (id as a tiebreaker). List views
    /// and the report aggregator both rely on this ordering.
    pub fn load_all_tickets(&self) -> Result<Vec<Ticket>> {
        let mut tickets: Vec<Ticket> = self.read_collection("tickets")?;
        tickets.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.to_string().cmp(&b.id.to_string()))
        });
        Ok(tickets)
    }

    // --- users ---

    pub fn save_user(&self, user: &User) -> Result<()> {
        self.write_document("users", &user.id.to_string(), user)
    }

    pub fn load_user(&self, id: &UserId) -> Result<User> {
        self.read_document("users", &id.to_string(), || SupportDeskError::UserNotFound {
            id: id.to_string(),
        })
    }

    /// Look a user up by email (unique across the store)
    pub fn find_user_by_email(&self, email: &str) -> Result<Option<User>> {
        let users: Vec<User> = self.read_collection("users")?;
        Ok(users.into_iter().find(|u| u.email == email))
    }

    // --- comments ---

    pub fn save_comment(&self, comment: &Comment) -> Result<()> {
        self.write_document("comments", &comment.id.to_string(), comment)
    }

    pub fn load_comment(&self, id: &CommentId) -> Result<Comment> {
        self.read_document("comments", &id.to_string(), || {
            SupportDeskError::CommentNotFound { id: id.to_string() }
        })
    }

    // --- reset tokens ---

    /// Store a reset token, replacing any prior token for the same user
    ///
    /// Tokens are keyed by user id, so "single active token per user" falls
    /// out of the layout rather than needing an invalidation pass.
    pub fn store_reset_token(&self, token: &ResetToken) -> Result<()> {
        self.write_document("tokens", &token.user_id.to_string(), token)
    }

    pub fn load_reset_token(&self, user_id: &UserId) -> Result<Option<ResetToken>> {
        match self.read_document("tokens", &user_id.to_string(), || {
            SupportDeskError::UserNotFound {
                id: user_id.to_string(),
            }
        }) {
            Ok(token) => Ok(Some(token)),
            Err(e) if e.is_not_found() => Ok(None),
            Err(e) => Err(e),
        }
    }

    pub fn delete_reset_token(&self, user_id: &UserId) -> Result<()> {
        let path = self.document_path("tokens", &user_id.to_string());
        if path.exists() {
            fs::remove_file(&path)?;
        }
        Ok(())
    }
}
