//! Checkout draft state.

use crate::types::{Event, Fees, PurchaseId, Section, Ticket};
use serde::{Deserialize, Serialize};

/// Progress of a purchase attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutStatus {
    /// Buyer is choosing an admission section
    SelectingSection,
    /// Section chosen; waiting for the buyer to submit payment
    AwaitingPayment,
    /// Payment submitted; simulated gateway round trip in flight
    Processing,
    /// Payment settled and the ticket issued
    Confirmed,
}

/// Transient record of one in-progress ticket purchase
///
/// Owned exclusively by the navigation shell for the duration of a single
/// checkout; nothing survives it except the ticket it issues.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutState {
    /// Identity of this purchase attempt
    pub purchase_id: PurchaseId,
    /// The event being purchased
    pub event: Event,
    /// Chosen section; `None` until the buyer picks one
    pub section: Option<Section>,
    /// Fee schedule applied to the order
    pub fees: Fees,
    /// Current workflow status
    pub status: CheckoutStatus,
    /// Issued ticket, set exactly once on confirmation
    pub ticket: Option<Ticket>,
}

impl CheckoutState {
    /// Starts a fresh purchase attempt for an event
    #[must_use]
    pub fn new(event: Event) -> Self {
        Self {
            purchase_id: PurchaseId::new(),
            event,
            section: None,
            fees: Fees::default(),
            status: CheckoutStatus::SelectingSection,
            ticket: None,
        }
    }

    /// Order total: section price plus fees
    ///
    /// Defined only once a section has been chosen.
    #[must_use]
    pub fn total(&self) -> Option<i64> {
        self.section
            .map(|s| s.price_for(&self.event.price) + self.fees.total())
    }

    /// Whether a payment attempt is in flight
    ///
    /// The rendering layer uses this to disable re-entrant submission.
    #[must_use]
    pub const fn is_processing(&self) -> bool {
        matches!(self.status, CheckoutStatus::Processing)
    }

    /// Whether the purchase has been confirmed
    #[must_use]
    pub const fn is_confirmed(&self) -> bool {
        matches!(self.status, CheckoutStatus::Confirmed)
    }

    /// Whether the draft may still be discarded
    ///
    /// Payment is irrevocable once submitted: no cancellation from
    /// `Processing` onwards.
    #[must_use]
    pub const fn can_cancel(&self) -> bool {
        matches!(
            self.status,
            CheckoutStatus::SelectingSection | CheckoutStatus::AwaitingPayment
        )
    }
}
