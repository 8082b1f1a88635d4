//! Purchase checkout workflow.
//!
//! One [`CheckoutState`] instance exists per purchase attempt: created when
//! checkout starts, discarded on cancel, consumed on completion. The
//! workflow walks `SelectingSection → AwaitingPayment → Processing →
//! Confirmed`; payment is simulated by a delayed settlement action and
//! cannot fail, matching the product behavior this models. The settlement
//! carries the purchase id, so a declined-payment branch could be added
//! later without reshaping the machine.

mod actions;
mod reducer;
mod types;

pub use actions::CheckoutAction;
pub use reducer::CheckoutReducer;
pub use types::{CheckoutState, CheckoutStatus};
