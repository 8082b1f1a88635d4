//! Integration tests for the purchase flow, driven through the Store.
//!
//! These exercise the full feedback loop: user intents go in, the simulated
//! gateway settles through a delayed action, and the ticket lands in the
//! wallet.

use stagepass_app::catalog::{DemoCatalog, EventCatalog};
use stagepass_app::{
    AppAction, AppEnvironment, AppReducer, AppState, AppStore, CheckoutAction, CheckoutStatus,
    Section, View,
};
use stagepass_app::types::{Event, EventId};
use stagepass_insights::mocks::CannedInsights;
use stagepass_runtime::Store;
use stagepass_testing::test_clock;
use std::sync::Arc;
use std::time::Duration;

fn store_with_latency(latency: Duration) -> AppStore {
    let env = AppEnvironment::new(
        Arc::new(test_clock()),
        Arc::new(CannedInsights::new(Vec::new())),
    )
    .with_payment_latency(latency);
    Store::new(AppState::new(), AppReducer::new(), env)
}

fn instant_store() -> AppStore {
    store_with_latency(Duration::ZERO)
}

fn first_event() -> Event {
    DemoCatalog::new().list_events().remove(0)
}

/// Drive a session up to `AwaitingPayment` for the given section
async fn reach_payment(store: &AppStore, section: Section) {
    let _ = store.send(AppAction::SelectEvent(first_event())).await;
    let _ = store.send(AppAction::StartCheckout).await;
    let _ = store
        .send(AppAction::Checkout(CheckoutAction::SelectSection(section)))
        .await;
    let _ = store
        .send(AppAction::Checkout(CheckoutAction::ProceedToPayment))
        .await;
}

/// Submit payment and wait until the settlement has been applied
async fn submit_and_settle(store: &AppStore) {
    let settled = store
        .send_and_wait_for(
            AppAction::Checkout(CheckoutAction::SubmitPayment),
            |a| matches!(a, AppAction::Checkout(CheckoutAction::PaymentSettled { .. })),
            Duration::from_secs(5),
        )
        .await;
    assert!(settled.is_ok(), "payment never settled: {settled:?}");
}

#[tokio::test]
async fn fresh_session_has_no_tickets() {
    let store = instant_store();

    let (view, wallet_empty) = store
        .state(|s| (s.current_view(), s.ledger.is_empty()))
        .await;

    assert_eq!(view, View::Home);
    assert!(wallet_empty);
}

#[tokio::test]
async fn vip_purchase_lands_in_wallet() {
    let store = instant_store();

    reach_payment(&store, Section::Vip).await;

    let total = store
        .state(|s| s.checkout.as_ref().and_then(|d| d.total()))
        .await;
    assert_eq!(total, Some(5250));

    submit_and_settle(&store).await;
    let _ = store.send(AppAction::CompleteCheckout).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.current_view(), View::Wallet);
    assert!(state.checkout.is_none());

    let tickets = state.ledger.list_all();
    assert_eq!(tickets.len(), 1);
    assert_eq!(tickets[0].event_id, EventId::new("e1"));
    assert_eq!(tickets[0].section, Section::Vip);
    assert_eq!(state.ledger.find_by_event(&EventId::new("e1")).len(), 1);
}

#[tokio::test]
async fn double_submission_issues_at_most_one_ticket() {
    let store = instant_store();

    reach_payment(&store, Section::GeneralAdmission).await;

    // Subscribe before submitting so the settlement cannot slip past
    let mut actions = store.subscribe_actions();

    // Second submission races the first; the workflow accepts only one
    let _ = store
        .send(AppAction::Checkout(CheckoutAction::SubmitPayment))
        .await;
    let _ = store
        .send(AppAction::Checkout(CheckoutAction::SubmitPayment))
        .await;

    let settled = tokio::time::timeout(Duration::from_secs(5), async {
        loop {
            match actions.recv().await {
                Ok(AppAction::Checkout(CheckoutAction::PaymentSettled { .. })) => break true,
                Ok(_) => {},
                Err(_) => break false,
            }
        }
    })
    .await;
    assert_eq!(settled, Ok(true), "payment never settled");

    let _ = store.send(AppAction::CompleteCheckout).await;

    // Even a repeated completion cannot grow the wallet further
    let _ = store.send(AppAction::CompleteCheckout).await;

    let ledger_len = store.state(|s| s.ledger.len()).await;
    assert_eq!(ledger_len, 1);
}

#[tokio::test]
async fn cancel_during_selection_leaves_ledger_unchanged() {
    let store = instant_store();

    let _ = store.send(AppAction::SelectEvent(first_event())).await;
    let _ = store.send(AppAction::StartCheckout).await;
    let _ = store.send(AppAction::CancelCheckout).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.current_view(), View::EventDetail);
    assert!(state.checkout.is_none());
    assert!(state.ledger.is_empty());
}

#[tokio::test]
async fn cancel_after_submission_is_rejected() {
    // Long gateway latency keeps the workflow in Processing
    let store = store_with_latency(Duration::from_secs(60));

    reach_payment(&store, Section::Vip).await;
    let _ = store
        .send(AppAction::Checkout(CheckoutAction::SubmitPayment))
        .await;

    let _ = store.send(AppAction::CancelCheckout).await;

    let state = store.state(Clone::clone).await;
    assert_eq!(state.current_view(), View::Checkout);
    match &state.checkout {
        Some(draft) => assert!(draft.is_processing()),
        None => unreachable!("in-flight payment must not be cancellable"),
    }
    assert!(state.ledger.is_empty());
}

#[tokio::test]
async fn back_from_payment_keeps_the_chosen_section() {
    let store = instant_store();

    reach_payment(&store, Section::UpperBalcony).await;
    let _ = store.send(AppAction::Checkout(CheckoutAction::Back)).await;

    let draft = store.state(|s| s.checkout.clone()).await;
    match draft {
        Some(draft) => {
            assert_eq!(draft.status, CheckoutStatus::SelectingSection);
            assert_eq!(draft.section, Some(Section::UpperBalcony));
        },
        None => unreachable!("back never discards the draft"),
    }
}

#[tokio::test]
async fn two_purchases_append_in_order() {
    let store = instant_store();
    let events = DemoCatalog::new().list_events();

    for event in &events {
        let _ = store.send(AppAction::SelectEvent(event.clone())).await;
        let _ = store.send(AppAction::StartCheckout).await;
        let _ = store
            .send(AppAction::Checkout(CheckoutAction::SelectSection(
                Section::GeneralAdmission,
            )))
            .await;
        let _ = store
            .send(AppAction::Checkout(CheckoutAction::ProceedToPayment))
            .await;
        submit_and_settle(&store).await;
        let _ = store.send(AppAction::CompleteCheckout).await;
    }

    let ids: Vec<EventId> = store
        .state(|s| s.ledger.list_all().iter().map(|t| t.event_id.clone()).collect())
        .await;
    assert_eq!(ids, vec![EventId::new("e1"), EventId::new("e2")]);
}
