//! # Stagepass Insights
//!
//! Client for the tour-insights service: given an artist and their per-city
//! demand figures, the service returns a short list of strategic insights
//! for the tour management team.
//!
//! The service is advisory only. Callers are expected to substitute
//! [`fallback_insights`] whenever a call fails - an unreachable or
//! misconfigured insights backend must never surface as a user-facing
//! error, and must never block navigation or purchase.

use async_trait::async_trait;

pub mod client;
pub mod error;
pub mod mocks;
pub mod types;

pub use client::InsightsClient;
pub use error::InsightsError;
pub use types::CityStat;

/// Tour-insights provider abstraction
///
/// Production uses [`InsightsClient`]; tests use the implementations in
/// [`mocks`].
#[async_trait]
pub trait TourInsights: Send + Sync {
    /// Generate strategic insights for an artist's tour data
    ///
    /// `cities` is an ordered sequence of per-city demand/capacity records.
    /// Returns an ordered sequence of short insight strings.
    ///
    /// # Errors
    ///
    /// Returns an [`InsightsError`] on network, auth, or parse failures.
    async fn tour_insights(
        &self,
        artist_name: &str,
        cities: &[CityStat],
    ) -> Result<Vec<String>, InsightsError>;
}

/// Fixed insights used when the service is unavailable
pub const FALLBACK_INSIGHTS: [&str; 3] = [
    "Demand in Bangalore is outpacing venue capacity by 20%.",
    "Pune shows low engagement; consider a targeted promo.",
    "Superfan conversion is highest in Mumbai.",
];

/// The fallback insight sequence as owned strings
#[must_use]
pub fn fallback_insights() -> Vec<String> {
    FALLBACK_INSIGHTS.iter().map(|s| (*s).to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_has_three_insights() {
        let insights = fallback_insights();
        assert_eq!(insights.len(), 3);
        assert!(insights[0].contains("Bangalore"));
    }
}
