//! Authorization guard
//!
//! A single pure capability table consulted by every core operation, in
//! place of role checks scattered across handlers. It holds no state and
//! never touches the store: callers load the ticket first and pass it in.
//!
//! Capability table:
//!
//! | Role     | Create | Read            | Status          | Assign | Comment         | List all | Report |
//! |----------|--------|-----------------|-----------------|--------|-----------------|----------|--------|
//! | Customer | yes    | own only        | no              | no     | own only        | no       | no     |
//! | Agent    | no     | any (see below) | assigned only   | no     | assigned only   | no       | no     |
//! | Admin    | no     | all             | all             | all    | all             | yes      | yes    |
//!
//! Read-by-id is deliberately looser for Agents than list scoping: an Agent
//! may read any ticket by id even though their list is limited to assigned
//! tickets. Kept as-is pending a product decision.

use crate::core::{Role, Ticket, User};

/// An action an actor may attempt against the ticket store
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// File a new ticket
    CreateTicket,
    /// Read a single ticket (and its thread) by id
    ReadTicket,
    /// Change a ticket's status
    UpdateStatus,
    /// Bind or rebind an agent to a ticket
    UpdateAssignment,
    /// Append a comment to a ticket's thread
    Comment,
    /// Enumerate every ticket in the store
    ListAllTickets,
    /// Read the aggregated ticket report
    ReadReport,
}

/// Decide whether `actor` may perform `action` on `ticket`
///
/// Pure and total. `ticket` is `None` for actions that do not target a
/// specific ticket (create, list-all, report); passing `None` for a
/// ticket-scoped action denies everything but Admin.
#[must_use]
pub fn allows(actor: &User, action: Action, ticket: Option<&Ticket>) -> bool {
    let owns = ticket.is_some_and(|t| t.is_owned_by(&actor.id));
    let assigned = ticket.is_some_and(|t| t.is_assigned_to(&actor.id));

    match (actor.role, action) {
        (Role::Admin, Action::CreateTicket) => false,
        (Role::Admin, _) => true,

        (Role::Customer, Action::CreateTicket) => true,
        (Role::Customer, Action::ReadTicket | Action::Comment) => owns,
        (Role::Customer, _) => false,

        // Agents may read any ticket by id; see module docs.
        (Role::Agent, Action::ReadTicket) => true,
        (Role::Agent, Action::UpdateStatus | Action::Comment) => assigned,
        (Role::Agent, _) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Priority, TicketBuilder};

    fn user(role: Role) -> User {
        User::new(format!("{role} user"), format!("{role}@example.com"), role)
    }

    fn ticket_of(customer: &User) -> Ticket {
        TicketBuilder::new()
            .customer(customer.id.clone())
            .title("Printer")
            .description("jam")
            .priority(Priority::High)
            .build()
    }

    #[test]
    fn test_customer_capabilities() {
        let customer = user(Role::Customer);
        let own = ticket_of(&customer);
        let other = ticket_of(&user(Role::Customer));

        assert!(allows(&customer, Action::CreateTicket, None));
        assert!(allows(&customer, Action::ReadTicket, Some(&own)));
        assert!(allows(&customer, Action::Comment, Some(&own)));

        assert!(!allows(&customer, Action::ReadTicket, Some(&other)));
        assert!(!allows(&customer, Action::Comment, Some(&other)));
        assert!(!allows(&customer, Action::UpdateStatus, Some(&own)));
        assert!(!allows(&customer, Action::UpdateAssignment, Some(&own)));
        assert!(!allows(&customer, Action::ListAllTickets, None));
        assert!(!allows(&customer, Action::ReadReport, None));
    }

    #[test]
    fn test_agent_capabilities() {
        let agent = user(Role::Agent);
        let customer = user(Role::Customer);
        let mut assigned = ticket_of(&customer);
        assigned.assign_agent(agent.id.clone());
        let unassigned = ticket_of(&customer);

        assert!(!allows(&agent, Action::CreateTicket, None));
        assert!(allows(&agent, Action::UpdateStatus, Some(&assigned)));
        assert!(allows(&agent, Action::Comment, Some(&assigned)));
        assert!(!allows(&agent, Action::UpdateStatus, Some(&unassigned)));
        assert!(!allows(&agent, Action::Comment, Some(&unassigned)));
        assert!(!allows(&agent, Action::UpdateAssignment, Some(&assigned)));
        assert!(!allows(&agent, Action::ListAllTickets, None));
        assert!(!allows(&agent, Action::ReadReport, None));
    }

    #[test]
    fn test_agent_read_by_id_is_unscoped() {
        // Read-by-id does not require assignment, only listing does.
        let agent = user(Role::Agent);
        let unassigned = ticket_of(&user(Role::Customer));
        assert!(allows(&agent, Action::ReadTicket, Some(&unassigned)));
    }

    #[test]
    fn test_admin_capabilities() {
        let admin = user(Role::Admin);
        let ticket = ticket_of(&user(Role::Customer));

        assert!(!allows(&admin, Action::CreateTicket, None));
        assert!(allows(&admin, Action::ReadTicket, Some(&ticket)));
        assert!(allows(&admin, Action::UpdateStatus, Some(&ticket)));
        assert!(allows(&admin, Action::UpdateAssignment, Some(&ticket)));
        assert!(allows(&admin, Action::Comment, Some(&ticket)));
        assert!(allows(&admin, Action::ListAllTickets, None));
        assert!(allows(&admin, Action::ReadReport, None));
    }

    #[test]
    fn test_missing_ticket_denies_scoped_actions() {
        let customer = user(Role::Customer);
        let agent = user(Role::Agent);
        assert!(!allows(&customer, Action::ReadTicket, None));
        assert!(!allows(&agent, Action::UpdateStatus, None));
    }
}
