//! Mock insights providers for tests and offline development

use crate::{CityStat, InsightsError, TourInsights};
use async_trait::async_trait;

/// Insights provider that always returns a fixed set of insights
#[derive(Debug, Clone)]
pub struct CannedInsights {
    insights: Vec<String>,
}

impl CannedInsights {
    /// Create a provider returning the given insights
    #[must_use]
    pub const fn new(insights: Vec<String>) -> Self {
        Self { insights }
    }
}

#[async_trait]
impl TourInsights for CannedInsights {
    async fn tour_insights(
        &self,
        _artist_name: &str,
        _cities: &[CityStat],
    ) -> Result<Vec<String>, InsightsError> {
        Ok(self.insights.clone())
    }
}

/// Insights provider that always fails
///
/// Used to verify that callers degrade to the fallback content instead of
/// surfacing the error.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailingInsights;

#[async_trait]
impl TourInsights for FailingInsights {
    async fn tour_insights(
        &self,
        _artist_name: &str,
        _cities: &[CityStat],
    ) -> Result<Vec<String>, InsightsError> {
        Err(InsightsError::RequestFailed(
            "insights service unreachable".to_string(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn canned_insights_returns_fixed_content() {
        let provider = CannedInsights::new(vec!["Sell more in Pune.".to_string()]);
        let insights = provider.tour_insights("Anyone", &[]).await;
        assert_eq!(insights.ok(), Some(vec!["Sell more in Pune.".to_string()]));
    }

    #[tokio::test]
    async fn failing_insights_always_errors() {
        let provider = FailingInsights;
        let result = provider.tour_insights("Anyone", &[]).await;
        assert!(matches!(result, Err(InsightsError::RequestFailed(_))));
    }
}
