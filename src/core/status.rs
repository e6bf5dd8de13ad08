//! Ticket status

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a ticket
///
/// Transitions are deliberately unconstrained: any authorized actor may move
/// a ticket between any two statuses, reopening a `Closed` ticket included.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    /// Newly filed, not yet picked up
    #[default]
    Open,
    /// An agent is actively working the ticket
    #[serde(rename = "In Progress")]
    InProgress,
    /// The underlying issue has been addressed
    Resolved,
    /// The ticket is closed out
    Closed,
}

impl Status {
    /// All statuses, in canonical order
    pub const ALL: [Self; 4] = [Self::Open, Self::InProgress, Self::Resolved, Self::Closed];
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Resolved => "Resolved",
            Self::Closed => "Closed",
        };
        write!(f, "{s}")
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "in progress" | "in-progress" | "in_progress" | "inprogress" => Ok(Self::InProgress),
            "resolved" => Ok(Self::Resolved),
            "closed" => Ok(Self::Closed),
            other => Err(format!("Invalid status: {other}")),
        }
    }
}
