//! Stagepass demo binary
//!
//! Walks one full session: browse the catalog, pick an event, buy a VIP
//! ticket through the simulated checkout, show the wallet, then load the
//! dashboard insights (falling back to the fixed content when no insights
//! backend is configured).

use stagepass_app::catalog::{DemoCatalog, EventCatalog};
use stagepass_app::types::ArtistId;
use stagepass_app::{
    AppAction, AppEnvironment, AppReducer, AppState, CheckoutAction, Section,
};
use stagepass_core::environment::SystemClock;
use stagepass_insights::{InsightsClient, TourInsights, mocks::FailingInsights};
use stagepass_runtime::Store;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "stagepass_app=info,stagepass_runtime=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    println!("=== Stagepass: live events ticketing demo ===\n");

    // Insights backend is optional; without a key the dashboard degrades to
    // the fixed fallback insights
    let insights: Arc<dyn TourInsights> = match InsightsClient::from_env() {
        Ok(client) => Arc::new(client),
        Err(_) => {
            println!("(no TOUR_INSIGHTS_API_KEY set, dashboard will use fallback insights)\n");
            Arc::new(FailingInsights)
        },
    };

    let env = AppEnvironment::new(Arc::new(SystemClock), insights);
    let store = Store::new(AppState::new(), AppReducer::new(), env);

    // Browse the catalog
    let catalog = DemoCatalog::new();
    let events = catalog.list_events();
    println!("On sale now:");
    for event in &events {
        println!(
            "  {} - {} at {}, {} ({}{}-{}{})",
            event.id,
            event.artist_name,
            event.venue,
            event.city,
            event.price.currency,
            event.price.min,
            event.price.currency,
            event.price.max,
        );
    }

    // Stop by the artist profile on the way
    if let Some(artist) = catalog.get_artist(&ArtistId::new("a1")) {
        let _ = store.send(AppAction::GoToArtist).await;
        println!(
            "\n{} - {} monthly listeners{}",
            artist.name,
            artist.listeners,
            if artist.is_touring { ", on tour now" } else { "" },
        );
        for show in &artist.upcoming_shows {
            println!("  upcoming: {} in {}, {}", show.venue, show.city, show.date);
        }
    }

    let Some(event) = events.first().cloned() else {
        println!("Catalog is empty, nothing to demo.");
        return;
    };

    // Pick the Bangalore show and start checkout
    println!("\n>>> Selecting {} in {}", event.artist_name, event.city);
    let _ = store.send(AppAction::SelectEvent(event.clone())).await;
    let _ = store.send(AppAction::StartCheckout).await;

    println!(">>> Choosing section: {}", Section::Vip);
    let _ = store
        .send(AppAction::Checkout(CheckoutAction::SelectSection(
            Section::Vip,
        )))
        .await;

    let total = store
        .state(|s| s.checkout.as_ref().and_then(|d| d.total()))
        .await;
    if let Some(total) = total {
        println!(">>> Order total: {}{total} (incl. fees)", event.price.currency);
    }

    let _ = store
        .send(AppAction::Checkout(CheckoutAction::ProceedToPayment))
        .await;

    // Submit and wait out the simulated gateway round trip
    println!(">>> Submitting payment...");
    let settled = store
        .send_and_wait_for(
            AppAction::Checkout(CheckoutAction::SubmitPayment),
            |a| matches!(a, AppAction::Checkout(CheckoutAction::PaymentSettled { .. })),
            Duration::from_secs(10),
        )
        .await;

    match settled {
        Ok(_) => println!(">>> Payment confirmed, you're going!"),
        Err(error) => {
            println!("Payment never settled: {error}");
            return;
        },
    }

    let _ = store.send(AppAction::CompleteCheckout).await;

    // Show the wallet
    let tickets = store.state(|s| s.ledger.list_all().to_vec()).await;
    println!("\nYour tickets:");
    for ticket in &tickets {
        println!(
            "  {} - section {}, {} (qr {})",
            ticket.event_id, ticket.section, ticket.seat_label, ticket.qr_payload,
        );
    }

    // Visit the dashboard and refresh insights
    println!("\n>>> Opening the tour dashboard");
    let _ = store.send(AppAction::GoToDashboard).await;
    let loaded = store
        .send_and_wait_for(
            AppAction::RefreshInsights,
            |a| matches!(a, AppAction::InsightsLoaded(_)),
            Duration::from_secs(10),
        )
        .await;

    if loaded.is_ok() {
        let insights = store.state(|s| s.dashboard.insights.clone()).await;
        println!("Tour intelligence:");
        for insight in &insights {
            println!("  • {insight}");
        }
    }

    println!("\n=== Session complete ===");
}
