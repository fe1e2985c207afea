//! Quote source abstraction.
//!
//! Every external data feed implements [`QuoteSource`]. A source is only
//! responsible for fetching and parsing its own payload into a [`RawQuote`];
//! naming, sector lookup and metric synthesis happen downstream.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Source-neutral snapshot of what a feed returned for one ticker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawQuote {
    /// Ticker as queried, including any exchange suffix (e.g. `TCS.NS`)
    pub raw_symbol: String,
    /// Company name, if the feed supplies one
    pub long_name: Option<String>,
    /// Live price
    pub regular_market_price: Option<f64>,
    /// Previous session close
    pub previous_close: Option<f64>,
    /// Session volume
    pub volume: Option<u64>,
    /// Market capitalisation
    pub market_cap: Option<f64>,
    /// Close history, oldest first, gaps removed
    pub closes: Vec<f64>,
}

impl RawQuote {
    /// Create an empty snapshot for a ticker.
    pub fn new(raw_symbol: impl Into<String>) -> Self {
        Self {
            raw_symbol: raw_symbol.into(),
            ..Default::default()
        }
    }

    /// Live price, or previous close when the live price is absent.
    pub fn effective_price(&self) -> Option<f64> {
        self.regular_market_price
            .filter(|p| p.is_finite() && *p > 0.0)
            .or(self.previous_close)
            .filter(|p| p.is_finite() && *p > 0.0)
    }
}

/// A ranked data feed the aggregator can query per symbol.
#[async_trait]
pub trait QuoteSource: Send + Sync {
    /// Short name used in logs and acquisition reports.
    fn name(&self) -> &'static str;

    /// Fetch one ticker.
    ///
    /// # Errors
    ///
    /// Returns an error on network failure, non-success status, malformed
    /// payload or a payload without data for the ticker.
    async fn query(&self, raw_symbol: &str) -> Result<RawQuote>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_price_prefers_live() {
        let raw = RawQuote {
            regular_market_price: Some(101.0),
            previous_close: Some(99.0),
            ..RawQuote::new("TCS.NS")
        };
        assert_eq!(raw.effective_price(), Some(101.0));
    }

    #[test]
    fn test_effective_price_falls_back_to_close() {
        let raw = RawQuote {
            regular_market_price: None,
            previous_close: Some(99.0),
            ..RawQuote::new("TCS.NS")
        };
        assert_eq!(raw.effective_price(), Some(99.0));

        let raw = RawQuote {
            regular_market_price: Some(0.0),
            previous_close: Some(99.0),
            ..RawQuote::new("TCS.NS")
        };
        assert_eq!(raw.effective_price(), Some(99.0));
    }

    #[test]
    fn test_effective_price_none() {
        assert_eq!(RawQuote::new("TCS.NS").effective_price(), None);
    }
}
