//! Persistence layer
//!
//! A file-backed store with one YAML document per record, plus repository
//! traits so the engine can be driven by any conforming implementation.

mod file;
mod repository;

pub use file::FileStorage;
pub use repository::{
    CommentRepository, Repository, ResetTokenRepository, TicketRepository, UserRepository,
};
