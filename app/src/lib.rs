//! # Stagepass
//!
//! A live-events ticketing session built on the Stagepass reducer
//! architecture.
//!
//! The application is two explicit state machines and a ledger:
//!
//! ```text
//! ┌──────────────────────┐
//! │      AppReducer      │◄──── user intents (navigate, select, buy)
//! │  (navigation shell)  │
//! └─────────┬────────────┘
//!           │ owns
//!           ├─► CheckoutReducer    one instance per purchase attempt:
//!           │                      SelectingSection → AwaitingPayment
//!           │                      → Processing → Confirmed
//!           │
//!           └─► TicketLedger       append-only wallet, fed exactly once
//!                                  per confirmed purchase
//! ```
//!
//! Events and artists come from an injected [`catalog::EventCatalog`];
//! the dashboard's tour insights come from an injected
//! [`stagepass_insights::TourInsights`] provider with fixed fallback
//! content. The simulated payment gateway is an
//! [`stagepass_core::Effect::Delay`] whose duration is injected through the
//! environment, so tests settle payments instantly while the demo keeps the
//! original two-second round trip.

pub mod catalog;
pub mod checkout;
pub mod dashboard;
pub mod environment;
pub mod ledger;
pub mod navigation;
pub mod types;

pub use checkout::{CheckoutAction, CheckoutReducer, CheckoutState, CheckoutStatus};
pub use environment::AppEnvironment;
pub use ledger::{LedgerError, TicketLedger};
pub use navigation::{AppAction, AppReducer, AppState, View};
pub use types::{Artist, Event, EventStatus, Fees, PriceRange, Section, Ticket};

/// Store type for a full application session
pub type AppStore =
    stagepass_runtime::Store<AppState, AppAction, AppEnvironment, AppReducer>;
