//! Error types for market data access.

use thiserror::Error;

/// Errors from market data providers.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Http error (e.g.: connection error, timeout, etc.)
    #[error("http error: {0}")]
    Http(String),

    /// JSON serialization/deserialization error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The provider requires an API key that is not configured.
    #[error("missing api key: {0}")]
    MissingApiKey(String),

    /// Non-success response from the provider.
    #[error("provider error: {message}")]
    Provider {
        /// HTTP status code if available.
        status: Option<u16>,
        /// Error message.
        message: String,
    },

    /// The provider returned a payload we cannot use.
    #[error("invalid data: {0}")]
    InvalidData(String),
}
