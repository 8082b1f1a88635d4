//! Injected dependencies for the application reducers.

use stagepass_core::environment::Clock;
use stagepass_insights::TourInsights;
use std::sync::Arc;
use std::time::Duration;

/// Simulated payment-gateway round-trip time used in production wiring
pub const PAYMENT_LATENCY: Duration = Duration::from_secs(2);

/// Dependencies for the navigation and checkout reducers
///
/// Everything non-deterministic enters here: time, the insights backend,
/// and the simulated gateway latency. Tests wire a fixed clock, a canned or
/// failing insights provider, and zero latency.
#[derive(Clone)]
pub struct AppEnvironment {
    /// Clock for purchase timestamps
    pub clock: Arc<dyn Clock>,
    /// Tour-insights provider for the dashboard
    pub insights: Arc<dyn TourInsights>,
    /// Simulated payment-gateway round-trip time
    pub payment_latency: Duration,
}

impl AppEnvironment {
    /// Creates an environment with the default payment latency
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>, insights: Arc<dyn TourInsights>) -> Self {
        Self {
            clock,
            insights,
            payment_latency: PAYMENT_LATENCY,
        }
    }

    /// Overrides the simulated payment latency
    ///
    /// Tests pass `Duration::ZERO` so settlement happens on the next tick.
    #[must_use]
    pub fn with_payment_latency(mut self, latency: Duration) -> Self {
        self.payment_latency = latency;
        self
    }
}
