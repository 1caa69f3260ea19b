//! Error types for feed operations.

use ratio_core::PriceError;
use thiserror::Error;

/// Errors that can occur while fetching a price.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("No pair data for {0}")]
    PairNotFound(String),

    #[error("Missing priceUsd for {0}")]
    MissingPrice(String),

    #[error("Invalid price: {0}")]
    InvalidPrice(#[from] PriceError),
}

impl From<serde_json::Error> for FeedError {
    fn from(err: serde_json::Error) -> Self {
        FeedError::ParseError(err.to_string())
    }
}

/// Result type for feed operations.
pub type FeedResult<T> = Result<T, FeedError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_http_error_display() {
        let err = FeedError::Http {
            status: 503,
            url: "https://api.dexscreener.com/x".into(),
        };
        assert_eq!(err.to_string(), "HTTP 503 from https://api.dexscreener.com/x");
    }

    #[test]
    fn test_from_serde_error() {
        let err: FeedError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, FeedError::ParseError(_)));
    }
}
