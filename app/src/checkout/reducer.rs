//! Reducer for the checkout workflow.

use crate::checkout::{CheckoutAction, CheckoutState, CheckoutStatus};
use crate::environment::AppEnvironment;
use crate::types::Ticket;
use stagepass_core::{Effect, Reducer, SmallVec, smallvec};

/// Reducer for a single purchase attempt
///
/// Every transition is total: an action that is invalid in the current
/// status leaves the draft untouched. Invalid submissions are how the
/// workflow stays idempotent - a second `SubmitPayment` while processing,
/// or a stale `PaymentSettled`, simply does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct CheckoutReducer;

impl CheckoutReducer {
    /// Creates a new checkout reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for CheckoutReducer {
    type State = CheckoutState;
    type Action = CheckoutAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            CheckoutAction::SelectSection(section) => {
                if state.status != CheckoutStatus::SelectingSection {
                    tracing::debug!(?section, status = ?state.status, "Section change ignored");
                    return smallvec![Effect::None];
                }
                if state.section == Some(section) {
                    return smallvec![Effect::None];
                }

                state.section = Some(section);
                tracing::debug!(%section, total = ?state.total(), "Section selected");
                smallvec![Effect::None]
            },

            CheckoutAction::ProceedToPayment => {
                if state.status != CheckoutStatus::SelectingSection || state.section.is_none() {
                    tracing::debug!(status = ?state.status, "Proceed to payment blocked");
                    return smallvec![Effect::None];
                }

                state.status = CheckoutStatus::AwaitingPayment;
                smallvec![Effect::None]
            },

            CheckoutAction::Back => {
                if state.status == CheckoutStatus::AwaitingPayment {
                    // The chosen section survives the trip back
                    state.status = CheckoutStatus::SelectingSection;
                }
                smallvec![Effect::None]
            },

            CheckoutAction::SubmitPayment => {
                if state.status != CheckoutStatus::AwaitingPayment {
                    tracing::debug!(status = ?state.status, "Payment submission ignored");
                    return smallvec![Effect::None];
                }

                state.status = CheckoutStatus::Processing;
                tracing::info!(
                    purchase_id = %state.purchase_id,
                    total = ?state.total(),
                    "Payment submitted, awaiting gateway"
                );

                smallvec![Effect::Delay {
                    duration: env.payment_latency,
                    action: Box::new(CheckoutAction::PaymentSettled {
                        purchase_id: state.purchase_id.clone(),
                    }),
                }]
            },

            CheckoutAction::PaymentSettled { purchase_id } => {
                if state.status != CheckoutStatus::Processing {
                    tracing::debug!(%purchase_id, status = ?state.status, "Settlement ignored");
                    return smallvec![Effect::None];
                }
                if purchase_id != state.purchase_id {
                    tracing::debug!(%purchase_id, "Stale settlement for a replaced draft");
                    return smallvec![Effect::None];
                }
                let Some(section) = state.section else {
                    // Unreachable through the workflow; recover without issuing
                    tracing::error!(%purchase_id, "Processing draft has no section");
                    return smallvec![Effect::None];
                };

                state.status = CheckoutStatus::Confirmed;
                let ticket = Ticket::issue(
                    state.event.id.clone(),
                    state.purchase_id.clone(),
                    section,
                    env.clock.now(),
                );
                tracing::info!(ticket_id = %ticket.id, event_id = %ticket.event_id, "Ticket issued");
                state.ticket = Some(ticket);

                smallvec![Effect::None]
            },
        }
    }
}
