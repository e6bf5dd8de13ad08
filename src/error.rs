//! Error types for support-desk
//!
//! The four public error kinds map one-to-one onto HTTP status codes at the
//! API boundary: Validation (400), Authentication (401), Authorization (403),
//! and the NotFound family (404). Everything else is an internal failure.

use thiserror::Error;

/// Result type alias used throughout the crate
pub type Result<T> = std::result::Result<T, SupportDeskError>;

/// Error type for all support-desk operations
#[derive(Debug, Error)]
pub enum SupportDeskError {
    /// A required field is missing or malformed
    #[error("{message}")]
    Validation { message: String },

    /// No valid actor credential was presented
    #[error("{message}")]
    Authentication { message: String },

    /// The actor is authenticated but not permitted to perform the action
    #[error("{message}")]
    Authorization { message: String },

    /// Referenced ticket does not exist
    #[error("Ticket not found: {id}")]
    TicketNotFound { id: String },

    /// Referenced user does not exist
    #[error("User not found: {id}")]
    UserNotFound { id: String },

    /// Referenced comment does not exist
    #[error("Comment not found: {id}")]
    CommentNotFound { id: String },

    /// Storage I/O failure
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Stored document could not be serialized or parsed
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_yaml::Error),

    /// Any other internal failure
    #[error(transparent)]
    Custom(#[from] anyhow::Error),
}

impl SupportDeskError {
    /// Create a validation error from any message
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }

    /// Create an authentication error from any message
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Authentication {
            message: message.into(),
        }
    }

    /// Create an authorization error from any message
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::Authorization {
            message: message.into(),
        }
    }

    /// Create a custom error from any message
    pub fn custom(message: impl Into<String>) -> Self {
        Self::Custom(anyhow::anyhow!(message.into()))
    }

    /// Whether this error refers to a missing record
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::TicketNotFound { .. } | Self::UserNotFound { .. } | Self::CommentNotFound { .. }
        )
    }
}
