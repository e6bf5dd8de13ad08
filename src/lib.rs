//! support-desk - A help-desk ticket tracker
//!
//! This crate provides the ticket lifecycle and authorization engine for a
//! help-desk: customers file support tickets, agents and administrators
//! triage and resolve them, and all parties exchange threaded comments.
//! Key pieces:
//! - A pure authorization guard consulted uniformly by every operation
//! - A ticket lifecycle engine (create, list, read, status/assignment updates)
//! - A comment thread manager with per-role eligibility
//! - A read-only report aggregator for administrators
//! - Fire-and-forget notification dispatch for assignment, status, and
//!   comment events
//!
//! Session and credential handling live outside this crate: operations take
//! an already-authenticated [`core::User`] as the acting identity.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use support_desk::engine::TicketService;
//! use support_desk::notify::NotificationDispatcher;
//! use support_desk::storage::FileStorage;
//!
//! let storage = Arc::new(FileStorage::new("./desk-data"));
//! let (dispatcher, events) = NotificationDispatcher::channel();
//! let tickets = TicketService::new(storage, dispatcher);
//!
//! let ticket = tickets.create_ticket(&customer, "Printer", "Paper jam", None)?;
//! ```

#![allow(clippy::missing_errors_doc)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod core;
pub mod engine;
pub mod error;
pub mod guard;
pub mod notify;
pub mod storage;

#[cfg(feature = "api")]
pub mod api;

#[cfg(test)]
pub mod test_utils;

// Re-export commonly used types
pub use error::{Result, SupportDeskError};
