//! Checkout workflow actions.

use crate::types::{PurchaseId, Section};
use serde::{Deserialize, Serialize};

/// Inputs to the checkout workflow
///
/// The first four are buyer intents; `PaymentSettled` is produced by the
/// simulated gateway round trip and fed back by the runtime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum CheckoutAction {
    /// Choose an admission section (only while selecting)
    SelectSection(Section),

    /// Move on to payment (requires a chosen section)
    ProceedToPayment,

    /// Return from payment to section selection, keeping the choice
    Back,

    /// Submit payment (only while awaiting payment; one attempt in flight)
    SubmitPayment,

    /// The simulated gateway settled the payment
    ///
    /// Carries the purchase id so settlements for a replaced or discarded
    /// draft are recognized as stale and ignored.
    PaymentSettled {
        /// Purchase attempt the settlement belongs to
        purchase_id: PurchaseId,
    },
}
