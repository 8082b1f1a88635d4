//! HTTP client for the tour-insights service

use crate::{
    TourInsights,
    error::InsightsError,
    types::{CityStat, InsightsRequest, InsightsResponse},
};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};

/// Tour-insights API client
#[derive(Clone)]
pub struct InsightsClient {
    client: Client,
    api_key: String,
    api_url: String,
}

impl InsightsClient {
    /// Create a new client with API key from environment
    ///
    /// # Errors
    ///
    /// Returns `InsightsError::MissingApiKey` if `TOUR_INSIGHTS_API_KEY` is
    /// not set
    pub fn from_env() -> Result<Self, InsightsError> {
        let api_key =
            std::env::var("TOUR_INSIGHTS_API_KEY").map_err(|_| InsightsError::MissingApiKey)?;

        Ok(Self::new(api_key))
    }

    /// Create a new client with explicit API key
    #[must_use]
    pub fn new(api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_key,
            api_url: "https://api.tourinsights.example/v1".to_string(),
        }
    }

    /// Override the service base URL (staging, local stub)
    #[must_use]
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    /// Generate tour insights (non-streaming)
    ///
    /// # Errors
    ///
    /// Returns errors for network failures, service errors, or parsing
    /// failures
    pub async fn generate(
        &self,
        request: InsightsRequest,
    ) -> Result<InsightsResponse, InsightsError> {
        let response = self
            .client
            .post(format!("{}/insights", self.api_url))
            .header("x-api-key", &self.api_key)
            .header("content-type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| InsightsError::RequestFailed(e.to_string()))?;

        match response.status() {
            StatusCode::OK => response
                .json::<InsightsResponse>()
                .await
                .map_err(|e| InsightsError::ResponseParseFailed(e.to_string())),
            StatusCode::TOO_MANY_REQUESTS => Err(InsightsError::RateLimited),
            StatusCode::UNAUTHORIZED => Err(InsightsError::Unauthorized),
            status => {
                let body = response.text().await.unwrap_or_default();
                Err(InsightsError::ApiError {
                    status: status.as_u16(),
                    message: body,
                })
            },
        }
    }
}

#[async_trait]
impl TourInsights for InsightsClient {
    async fn tour_insights(
        &self,
        artist_name: &str,
        cities: &[CityStat],
    ) -> Result<Vec<String>, InsightsError> {
        let request = InsightsRequest::new(artist_name, cities.to_vec());
        let response = self.generate(request).await?;
        Ok(response.insights)
    }
}
