//! Error taxonomy for the tour-insights client.
//!
//! Every variant here is recoverable from the application's point of view:
//! callers substitute the fixed fallback insights and move on.

use thiserror::Error;

/// Failures when talking to the tour-insights service
#[derive(Debug, Error)]
pub enum InsightsError {
    /// `TOUR_INSIGHTS_API_KEY` was not set in the environment
    #[error("TOUR_INSIGHTS_API_KEY is not set")]
    MissingApiKey,

    /// The HTTP request never completed
    #[error("insights request failed: {0}")]
    RequestFailed(String),

    /// The service answered with a body the client could not parse
    #[error("insights response could not be parsed: {0}")]
    ResponseParseFailed(String),

    /// The service throttled this client
    #[error("insights service rate limit hit")]
    RateLimited,

    /// The API key was rejected
    #[error("insights API key rejected")]
    Unauthorized,

    /// The service reported an error of its own
    #[error("insights service error (status {status}): {message}")]
    ApiError {
        /// HTTP status code
        status: u16,
        /// Error body returned by the service
        message: String,
    },
}
