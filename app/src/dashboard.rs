//! Artist dashboard state.
//!
//! The dashboard shows per-city demand against venue capacity and a short
//! list of strategic insights fetched from the tour-insights service. The
//! insights call is advisory: when it fails, the fixed fallback content is
//! shown instead and the failure never reaches the user.

use serde::{Deserialize, Serialize};
use stagepass_insights::CityStat;

/// State of the artist dashboard
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardState {
    /// Artist whose tour is being analyzed
    pub artist_name: String,
    /// Per-city demand/capacity figures, in tour order
    pub city_stats: Vec<CityStat>,
    /// Most recently loaded insights (empty until the first refresh)
    pub insights: Vec<String>,
    /// Whether an insights refresh is in flight
    pub loading_insights: bool,
}

impl DashboardState {
    /// Creates a dashboard for the given artist and tour data
    #[must_use]
    pub fn new(artist_name: impl Into<String>, city_stats: Vec<CityStat>) -> Self {
        Self {
            artist_name: artist_name.into(),
            city_stats,
            insights: Vec::new(),
            loading_insights: false,
        }
    }

    /// Dashboard fixture for the demo tour
    #[must_use]
    pub fn demo() -> Self {
        Self::new(
            "The Midnight Echo",
            vec![
                CityStat::new("Bangalore", 4000, 2500),
                CityStat::new("Mumbai", 3000, 3000),
                CityStat::new("Delhi", 2000, 5000),
                CityStat::new("Pune", 2780, 2000),
            ],
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demo_dashboard_covers_four_cities() {
        let dashboard = DashboardState::demo();
        assert_eq!(dashboard.artist_name, "The Midnight Echo");
        assert_eq!(dashboard.city_stats.len(), 4);
        assert_eq!(dashboard.city_stats[0].name, "Bangalore");
        assert!(dashboard.insights.is_empty());
        assert!(!dashboard.loading_insights);
    }
}
