//! Error types for data operations.

use thiserror::Error;

/// Result type for data operations.
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while querying a quote source.
///
/// None of these are fatal for a screening run: the aggregator treats every
/// one of them as "no data for this symbol".
#[derive(Debug, Error)]
pub enum DataError {
    /// Yahoo Finance API reported an error in its payload
    #[error("Yahoo Finance API error: {0}")]
    YahooApi(String),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Non-success HTTP status
    #[error("HTTP {status} for {symbol}")]
    Http {
        /// Symbol that was queried
        symbol: String,
        /// HTTP status code
        status: u16,
    },

    /// Data parsing error
    #[error("Data parsing error: {0}")]
    Parse(String),

    /// Missing data
    #[error("Missing data for {symbol}: {reason}")]
    MissingData {
        /// Symbol that was queried
        symbol: String,
        /// Reason for missing data
        reason: String,
    },

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Rate limit error
    #[error("Rate limit exceeded: {0}")]
    RateLimit(String),

    /// Invalid symbol
    #[error("Invalid symbol: {0}")]
    InvalidSymbol(String),

    /// Source is missing required configuration (e.g. an API key)
    #[error("Source not configured: {0}")]
    NotConfigured(String),
}

impl DataError {
    /// Shorthand for a [`DataError::MissingData`].
    pub fn missing(symbol: &str, reason: impl Into<String>) -> Self {
        Self::MissingData {
            symbol: symbol.to_string(),
            reason: reason.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_data_message() {
        let err = DataError::missing("TCS.NS", "chart.result is empty");
        assert_eq!(err.to_string(), "Missing data for TCS.NS: chart.result is empty");
    }

    #[test]
    fn test_http_message() {
        let err = DataError::Http {
            symbol: "INFY.NS".to_string(),
            status: 404,
        };
        assert_eq!(err.to_string(), "HTTP 404 for INFY.NS");
    }
}
