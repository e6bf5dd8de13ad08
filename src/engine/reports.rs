//! Report aggregator
//!
//! A read-only grouping view over tickets for administrators: filter, group
//! by status, order by count.

use crate::core::{Priority, Status, User, UserId};
use crate::error::{Result, SupportDeskError};
use crate::guard::{self, Action};
use crate::storage::{Repository, TicketRepository};
use serde::Serialize;
use std::sync::Arc;

/// Conjunctive ticket filters; an omitted filter imposes no constraint
#[derive(Debug, Default, Clone)]
pub struct ReportFilter {
    pub status: Option<Status>,
    pub priority: Option<Priority>,
    pub agent_id: Option<UserId>,
}

impl ReportFilter {
    fn matches(&self, ticket: &crate::core::Ticket) -> bool {
        self.status.is_none_or(|s| ticket.status == s)
            && self.priority.is_none_or(|p| ticket.priority == p)
            && self
                .agent_id
                .as_ref()
                .is_none_or(|id| ticket.agent_id.as_ref() == Some(id))
    }
}

/// Number of matching tickets in one status
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusCount {
    pub status: Status,
    pub count: usize,
}

/// Aggregated report over the filtered ticket set
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketReport {
    /// Total matching tickets; always equals the sum of `report` counts
    pub total_tickets: usize,
    /// Per-status counts, descending, covering only statuses present
    pub report: Vec<StatusCount>,
}

/// Service producing ticket reports
pub struct ReportService<R> {
    store: Arc<R>,
}

impl<R: Repository> ReportService<R> {
    /// Create a report service over the given store
    pub fn new(store: Arc<R>) -> Self {
        Self { store }
    }

    /// Aggregate tickets matching the filter, grouped by status
    ///
    /// Admin-only. Counts are ordered descending; ties keep the order the
    /// statuses were first encountered in the store.
    pub fn aggregate(&self, actor: &User, filter: &ReportFilter) -> Result<TicketReport> {
        if !guard::allows(actor, Action::ReadReport, None) {
            return Err(SupportDeskError::forbidden("Not authorized as an admin"));
        }

        let matching = self.store.find(|t| filter.matches(t))?;
        let total_tickets = matching.len();

        let mut counts: Vec<StatusCount> = Vec::new();
        for ticket in &matching {
            match counts.iter_mut().find(|c| c.status == ticket.status) {
                Some(entry) => entry.count += 1,
                None => counts.push(StatusCount {
                    status: ticket.status,
                    count: 1,
                }),
            }
        }
        // Stable sort keeps first-encountered order for equal counts
        counts.sort_by(|a, b| b.count.cmp(&a.count));

        Ok(TicketReport {
            total_tickets,
            report: counts,
        })
    }
}
