//! Session ticket ledger.
//!
//! An ordered, append-only collection of issued tickets, scoped to the
//! current session. Only the navigation reducer writes to it, exactly once
//! per confirmed purchase.

use crate::types::{EventId, PurchaseId, Ticket};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// Errors raised by the ticket ledger
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    /// A ticket for this purchase attempt was already committed
    ///
    /// Guards against double-issuance from a stale confirmation. Under the
    /// single-threaded dispatch discipline this should never occur; it is an
    /// internal invariant violation, not a user-facing failure.
    #[error("ticket for purchase {0} already committed")]
    DuplicateTicket(PurchaseId),
}

/// Append-only store of issued tickets, in purchase order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TicketLedger {
    tickets: Vec<Ticket>,
    committed: HashSet<PurchaseId>,
}

impl TicketLedger {
    /// Creates an empty ledger
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a ticket to the ledger
    ///
    /// # Errors
    ///
    /// Returns [`LedgerError::DuplicateTicket`] when a ticket for the same
    /// purchase attempt has already been committed.
    pub fn commit(&mut self, ticket: Ticket) -> Result<(), LedgerError> {
        if !self.committed.insert(ticket.purchase_id.clone()) {
            return Err(LedgerError::DuplicateTicket(ticket.purchase_id));
        }
        self.tickets.push(ticket);
        Ok(())
    }

    /// All tickets, oldest first
    ///
    /// An empty ledger is a valid, first-class state ("no tickets yet").
    #[must_use]
    pub fn list_all(&self) -> &[Ticket] {
        &self.tickets
    }

    /// All tickets for a given event
    #[must_use]
    pub fn find_by_event(&self, event_id: &EventId) -> Vec<&Ticket> {
        self.tickets
            .iter()
            .filter(|t| &t.event_id == event_id)
            .collect()
    }

    /// Number of tickets in the ledger
    #[must_use]
    pub fn len(&self) -> usize {
        self.tickets.len()
    }

    /// Whether the ledger holds no tickets
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tickets.is_empty()
    }
}
