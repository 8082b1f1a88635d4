//! Property tests for the navigation shell.
//!
//! These run the reducer synchronously over arbitrary intent sequences,
//! dropping effects: in this model no timer ever fires, so a payment can
//! only settle when a test injects the settlement itself.

use proptest::prelude::*;
use stagepass_app::catalog::{DemoCatalog, EventCatalog};
use stagepass_app::{
    AppAction, AppEnvironment, AppReducer, AppState, CheckoutAction, Section, View,
};
use stagepass_core::Reducer;
use stagepass_insights::mocks::CannedInsights;
use stagepass_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

fn test_env() -> AppEnvironment {
    AppEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(CannedInsights::new(Vec::new())),
    )
    .with_payment_latency(Duration::ZERO)
}

fn intent_strategy() -> impl Strategy<Value = AppAction> {
    let event = DemoCatalog::new().list_events().remove(0);
    prop_oneof![
        Just(AppAction::GoHome),
        Just(AppAction::GoToArtist),
        Just(AppAction::GoToWallet),
        Just(AppAction::GoToDashboard),
        Just(AppAction::SelectEvent(event)),
        Just(AppAction::StartCheckout),
        Just(AppAction::CancelCheckout),
        Just(AppAction::CompleteCheckout),
        Just(AppAction::Checkout(CheckoutAction::SelectSection(Section::Vip))),
        Just(AppAction::Checkout(CheckoutAction::SelectSection(
            Section::GeneralAdmission
        ))),
        Just(AppAction::Checkout(CheckoutAction::ProceedToPayment)),
        Just(AppAction::Checkout(CheckoutAction::SubmitPayment)),
        Just(AppAction::Checkout(CheckoutAction::Back)),
    ]
}

proptest! {
    /// A detail or checkout screen is never rendered without an event in
    /// focus, no matter the intent history.
    #[test]
    fn focused_views_always_have_a_selected_event(
        intents in prop::collection::vec(intent_strategy(), 0..64)
    ) {
        let env = test_env();
        let reducer = AppReducer::new();
        let mut state = AppState::new();

        for intent in intents {
            let _ = reducer.reduce(&mut state, intent, &env);

            let view = state.current_view();
            if matches!(view, View::EventDetail | View::Checkout) {
                prop_assert!(state.selected_event.is_some());
            }
        }
    }

    /// No intent sequence can mint a ticket without a settled payment.
    #[test]
    fn tickets_require_a_settled_payment(
        intents in prop::collection::vec(intent_strategy(), 0..64)
    ) {
        let env = test_env();
        let reducer = AppReducer::new();
        let mut state = AppState::new();

        for intent in intents {
            let _ = reducer.reduce(&mut state, intent, &env);
        }

        prop_assert!(state.ledger.is_empty());
    }

    /// The machine never wedges: whatever happened before, a scripted
    /// purchase still runs to completion.
    #[test]
    fn a_purchase_always_completes_after_any_history(
        intents in prop::collection::vec(intent_strategy(), 0..48)
    ) {
        let env = test_env();
        let reducer = AppReducer::new();
        let mut state = AppState::new();

        for intent in intents {
            let _ = reducer.reduce(&mut state, intent, &env);
        }

        let event = DemoCatalog::new().list_events().remove(0);
        let _ = reducer.reduce(&mut state, AppAction::SelectEvent(event), &env);
        let _ = reducer.reduce(&mut state, AppAction::StartCheckout, &env);
        let _ = reducer.reduce(
            &mut state,
            AppAction::Checkout(CheckoutAction::SelectSection(Section::Vip)),
            &env,
        );
        let _ = reducer.reduce(
            &mut state,
            AppAction::Checkout(CheckoutAction::ProceedToPayment),
            &env,
        );
        let _ = reducer.reduce(
            &mut state,
            AppAction::Checkout(CheckoutAction::SubmitPayment),
            &env,
        );

        let purchase_id = state.checkout.as_ref().map(|d| d.purchase_id.clone());
        prop_assert!(purchase_id.is_some());
        if let Some(purchase_id) = purchase_id {
            let _ = reducer.reduce(
                &mut state,
                AppAction::Checkout(CheckoutAction::PaymentSettled { purchase_id }),
                &env,
            );
        }
        let _ = reducer.reduce(&mut state, AppAction::CompleteCheckout, &env);

        prop_assert_eq!(state.current_view(), View::Wallet);
        prop_assert_eq!(state.ledger.len(), 1);
    }
}
