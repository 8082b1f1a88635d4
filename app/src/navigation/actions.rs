//! Session-level actions.

use crate::checkout::CheckoutAction;
use crate::types::Event;
use serde::{Deserialize, Serialize};

/// User intents and effect feedback for the whole session
///
/// Navigation intents are total: from any screen, each either performs its
/// transition or is a guarded no-op. None of them require a selected event
/// except where documented.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AppAction {
    /// Go to the event feed
    GoHome,

    /// Go to the artist profile
    GoToArtist,

    /// Go to the ticket wallet
    GoToWallet,

    /// Go to the artist dashboard
    GoToDashboard,

    /// Focus an event and open its detail page
    SelectEvent(Event),

    /// Begin a purchase for the selected event
    ///
    /// Only from the event detail page with an event in focus; mints a
    /// fresh checkout draft.
    StartCheckout,

    /// Abandon the in-progress purchase and return to the event detail
    ///
    /// Only while the draft can still be discarded (before payment is
    /// submitted).
    CancelCheckout,

    /// Leave a confirmed purchase: commit the ticket and open the wallet
    CompleteCheckout,

    /// An action for the in-progress checkout workflow
    Checkout(CheckoutAction),

    /// Ask the tour-insights service for fresh dashboard insights
    RefreshInsights,

    /// Insights arrived (or the fallback content substituted for them)
    InsightsLoaded(Vec<String>),
}
