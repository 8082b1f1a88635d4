//! Navigation state.

use crate::checkout::CheckoutState;
use crate::dashboard::DashboardState;
use crate::ledger::TicketLedger;
use crate::types::Event;
use serde::{Deserialize, Serialize};

/// The screens of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum View {
    /// Event feed
    Home,
    /// Artist profile with upcoming shows
    ArtistProfile,
    /// Detail page for the selected event
    EventDetail,
    /// Multi-step purchase flow for the selected event
    Checkout,
    /// Purchased tickets
    Wallet,
    /// Artist tour dashboard
    Dashboard,
}

/// Top-level session state
///
/// `EventDetail` and `Checkout` only make sense with an event in focus;
/// [`AppState::current_view`] enforces that invariant at render time by
/// falling back to `Home` instead of faulting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppState {
    /// Requested screen
    pub view: View,
    /// Event currently in focus, if any
    pub selected_event: Option<Event>,
    /// In-progress purchase attempt, if any
    pub checkout: Option<CheckoutState>,
    /// Tickets purchased this session
    pub ledger: TicketLedger,
    /// Artist dashboard
    pub dashboard: DashboardState,
}

impl AppState {
    /// Creates the initial session state: home screen, demo dashboard
    #[must_use]
    pub fn new() -> Self {
        Self {
            view: View::Home,
            selected_event: None,
            checkout: None,
            ledger: TicketLedger::new(),
            dashboard: DashboardState::demo(),
        }
    }

    /// The view to render, with the safe fallback applied
    ///
    /// A detail or checkout screen with no selected event (e.g. after
    /// direct navigation) renders as `Home` rather than faulting.
    #[must_use]
    pub const fn current_view(&self) -> View {
        match self.view {
            View::EventDetail | View::Checkout => {
                if self.selected_event.is_none() {
                    View::Home
                } else {
                    self.view
                }
            },
            view => view,
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
