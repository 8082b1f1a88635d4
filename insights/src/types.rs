//! Request and response types for the tour-insights service

use serde::{Deserialize, Serialize};

/// Per-city tour data point: projected demand against venue capacity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityStat {
    /// City name
    pub name: String,
    /// Projected ticket demand
    pub demand: u32,
    /// Venue capacity in that city
    pub capacity: u32,
}

impl CityStat {
    /// Create a new city data point
    #[must_use]
    pub fn new(name: impl Into<String>, demand: u32, capacity: u32) -> Self {
        Self {
            name: name.into(),
            demand,
            capacity,
        }
    }
}

/// Request body for the insights endpoint
#[derive(Debug, Clone, Serialize)]
pub struct InsightsRequest {
    /// Artist whose tour data is being analyzed
    pub artist: String,
    /// Ordered per-city data points
    pub cities: Vec<CityStat>,
    /// Maximum number of insights to return
    pub max_insights: u8,
}

impl InsightsRequest {
    /// Default insight count, matching the dashboard layout
    pub const DEFAULT_MAX_INSIGHTS: u8 = 3;

    /// Build a request for the given artist and city data
    #[must_use]
    pub fn new(artist: impl Into<String>, cities: Vec<CityStat>) -> Self {
        Self {
            artist: artist.into(),
            cities,
            max_insights: Self::DEFAULT_MAX_INSIGHTS,
        }
    }
}

/// Response body from the insights endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct InsightsResponse {
    /// Ordered insight strings
    pub insights: Vec<String>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)] // Test code
mod tests {
    use super::*;

    #[test]
    fn city_stat_serializes_with_plain_field_names() {
        let stat = CityStat::new("Bangalore", 4000, 2500);
        let json = serde_json::to_string(&stat).unwrap();
        assert_eq!(json, r#"{"name":"Bangalore","demand":4000,"capacity":2500}"#);
    }

    #[test]
    fn request_defaults_to_three_insights() {
        let request = InsightsRequest::new("The Midnight Echo", vec![]);
        assert_eq!(request.max_insights, 3);
    }

    #[test]
    fn response_parses_insight_array() {
        let json = r#"{"insights":["a","b"]}"#;
        let response: InsightsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.insights.len(), 2);
    }
}
