//! Reducer for the navigation shell.

use crate::checkout::{CheckoutReducer, CheckoutState};
use crate::environment::AppEnvironment;
use crate::navigation::{AppAction, AppState, View};
use stagepass_core::{Effect, Reducer, SmallVec, smallvec};
use std::sync::Arc;

/// Reducer for the whole session
///
/// Owns the screen transitions and orchestrates the handoff into and out of
/// the checkout workflow: a purchase begins by minting a draft, and a
/// confirmed purchase ends by committing its ticket to the ledger. Only
/// this reducer writes to the ledger.
#[derive(Debug, Clone, Copy, Default)]
pub struct AppReducer;

impl AppReducer {
    /// Creates a new session reducer
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl Reducer for AppReducer {
    type State = AppState;
    type Action = AppAction;
    type Environment = AppEnvironment;

    fn reduce(
        &self,
        state: &mut Self::State,
        action: Self::Action,
        env: &Self::Environment,
    ) -> SmallVec<[Effect<Self::Action>; 4]> {
        match action {
            AppAction::GoHome => {
                state.view = View::Home;
                smallvec![Effect::None]
            },

            AppAction::GoToArtist => {
                state.view = View::ArtistProfile;
                smallvec![Effect::None]
            },

            AppAction::GoToWallet => {
                state.view = View::Wallet;
                smallvec![Effect::None]
            },

            AppAction::GoToDashboard => {
                state.view = View::Dashboard;
                smallvec![Effect::None]
            },

            AppAction::SelectEvent(event) => {
                tracing::debug!(event_id = %event.id, "Event selected");
                state.selected_event = Some(event);
                state.view = View::EventDetail;
                smallvec![Effect::None]
            },

            AppAction::StartCheckout => {
                if state.view != View::EventDetail {
                    tracing::debug!(view = ?state.view, "Checkout can only start from event detail");
                    return smallvec![Effect::None];
                }
                let Some(event) = state.selected_event.clone() else {
                    tracing::debug!("Checkout requested with no event in focus");
                    return smallvec![Effect::None];
                };

                let draft = CheckoutState::new(event);
                tracing::info!(purchase_id = %draft.purchase_id, event_id = %draft.event.id, "Checkout started");
                state.checkout = Some(draft);
                state.view = View::Checkout;
                smallvec![Effect::None]
            },

            AppAction::CancelCheckout => {
                let cancellable = state.view == View::Checkout
                    && state.checkout.as_ref().is_some_and(CheckoutState::can_cancel);
                if !cancellable {
                    tracing::debug!("Cancel ignored: no cancellable checkout");
                    return smallvec![Effect::None];
                }

                state.checkout = None;
                state.view = View::EventDetail;
                smallvec![Effect::None]
            },

            AppAction::CompleteCheckout => {
                let confirmed = state.view == View::Checkout
                    && state.checkout.as_ref().is_some_and(CheckoutState::is_confirmed);
                if !confirmed {
                    tracing::debug!("Complete ignored: no confirmed checkout");
                    return smallvec![Effect::None];
                }
                let Some(draft) = state.checkout.take() else {
                    return smallvec![Effect::None];
                };

                if let Some(ticket) = draft.ticket {
                    match state.ledger.commit(ticket) {
                        Ok(()) => {
                            tracing::info!(wallet_size = state.ledger.len(), "Ticket added to wallet");
                        },
                        Err(error) => {
                            // Internal invariant violation; not a user-facing failure
                            tracing::error!(%error, "Ticket commit rejected");
                        },
                    }
                } else {
                    tracing::error!(purchase_id = %draft.purchase_id, "Confirmed draft has no ticket");
                }

                state.view = View::Wallet;
                smallvec![Effect::None]
            },

            AppAction::Checkout(inner) => {
                let Some(draft) = state.checkout.as_mut() else {
                    tracing::debug!("Checkout action with no draft in progress");
                    return smallvec![Effect::None];
                };

                CheckoutReducer::new()
                    .reduce(draft, inner, env)
                    .into_iter()
                    .map(|effect| effect.map(AppAction::Checkout))
                    .collect()
            },

            AppAction::RefreshInsights => {
                if state.dashboard.loading_insights {
                    return smallvec![Effect::None];
                }

                state.dashboard.loading_insights = true;
                let insights = Arc::clone(&env.insights);
                let artist = state.dashboard.artist_name.clone();
                let cities = state.dashboard.city_stats.clone();

                smallvec![Effect::Future(Box::pin(async move {
                    let insights = match insights.tour_insights(&artist, &cities).await {
                        Ok(insights) => insights,
                        Err(error) => {
                            // Advisory call: degrade to the fixed fallback
                            tracing::warn!(%error, "Tour insights unavailable, using fallback");
                            stagepass_insights::fallback_insights()
                        },
                    };
                    Some(AppAction::InsightsLoaded(insights))
                }))]
            },

            AppAction::InsightsLoaded(insights) => {
                state.dashboard.insights = insights;
                state.dashboard.loading_insights = false;
                smallvec![Effect::None]
            },
        }
    }
}
