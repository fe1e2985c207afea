//! Quote data from the Alpha Vantage `GLOBAL_QUOTE` endpoint.
//!
//! Alpha Vantage lists Indian equities under a `.BSE` suffix and requires an
//! API key. Its prices are BSE prices, so parsed quotes carry the `.BO`
//! listing whatever ticker was asked for. Without a key every query fails with
//! [`DataError::NotConfigured`], which the aggregator treats as an empty
//! source.

use crate::error::{DataError, Result};
use crate::model::Exchange;
use crate::source::{QuoteSource, RawQuote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

/// Alpha Vantage API base URL
const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co";

/// Configuration for the Alpha Vantage source.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AlphaVantageConfig {
    /// API key; `None` disables the source
    pub api_key: Option<String>,
    /// Endpoint base URL (default: `https://www.alphavantage.co`)
    pub base_url: Option<String>,
    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: Option<u64>,
}

impl AlphaVantageConfig {
    /// Config with the given key and default endpoint.
    pub fn with_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Default::default()
        }
    }
}

/// Map a Yahoo-style ticker onto Alpha Vantage's `.BSE` convention.
pub fn alpha_vantage_symbol(raw_symbol: &str) -> String {
    let (symbol, _) = Exchange::split_symbol(raw_symbol);
    format!("{}.BSE", symbol)
}

/// The BSE listing of a ticker, e.g. `TCS.NS` becomes `TCS.BO`.
pub fn bse_listing(raw_symbol: &str) -> String {
    let (symbol, _) = Exchange::split_symbol(raw_symbol);
    format!("{}{}", symbol, Exchange::BSE_SUFFIX)
}

fn numeric_field(quote: &serde_json::Map<String, Value>, key: &str) -> Option<f64> {
    quote
        .get(key)
        .and_then(Value::as_str)
        .and_then(|s| s.trim().parse::<f64>().ok())
        .filter(|v| v.is_finite())
}

/// Parse a `GLOBAL_QUOTE` body into a [`RawQuote`] for the BSE listing of
/// `raw_symbol`.
///
/// # Errors
///
/// Returns [`DataError::RateLimit`] for throttling notices,
/// [`DataError::MissingData`] for an empty quote object and
/// [`DataError::Serialization`] for malformed JSON.
pub fn parse_global_quote(raw_symbol: &str, body: &str) -> Result<RawQuote> {
    let value: Value = serde_json::from_str(body)?;

    for notice in ["Note", "Information"] {
        if let Some(msg) = value.get(notice).and_then(Value::as_str) {
            return Err(DataError::RateLimit(msg.to_string()));
        }
    }
    if let Some(msg) = value.get("Error Message").and_then(Value::as_str) {
        return Err(DataError::InvalidSymbol(msg.to_string()));
    }

    let quote = value
        .get("Global Quote")
        .and_then(Value::as_object)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| DataError::missing(raw_symbol, "empty Global Quote"))?;

    let price = numeric_field(quote, "05. price");
    if price.is_none() {
        return Err(DataError::Parse(format!(
            "{}: Global Quote has no usable price",
            raw_symbol
        )));
    }

    Ok(RawQuote {
        raw_symbol: bse_listing(raw_symbol),
        long_name: None,
        regular_market_price: price,
        previous_close: numeric_field(quote, "08. previous close"),
        volume: numeric_field(quote, "06. volume").map(|v| v.max(0.0) as u64),
        market_cap: None,
        closes: Vec::new(),
    })
}

/// Alpha Vantage global quote source.
#[derive(Debug)]
pub struct AlphaVantageSource {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl AlphaVantageSource {
    /// Create a source from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new(config: AlphaVantageConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs.unwrap_or(10)))
            .build()?;

        Ok(Self {
            client,
            base_url: config
                .base_url
                .unwrap_or_else(|| ALPHA_VANTAGE_URL.to_string()),
            api_key: config.api_key.filter(|k| !k.trim().is_empty()),
        })
    }

    /// Whether an API key is present.
    pub const fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl QuoteSource for AlphaVantageSource {
    fn name(&self) -> &'static str {
        "alpha_vantage"
    }

    async fn query(&self, raw_symbol: &str) -> Result<RawQuote> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(DataError::NotConfigured(
                "Alpha Vantage API key is not set".to_string(),
            ));
        };
        if raw_symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let symbol = alpha_vantage_symbol(raw_symbol);
        let response = self
            .client
            .get(format!("{}/query", self.base_url))
            .query(&[
                ("function", "GLOBAL_QUOTE"),
                ("symbol", symbol.as_str()),
                ("apikey", api_key),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(DataError::Http {
                symbol: raw_symbol.to_string(),
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        parse_global_quote(raw_symbol, &body)
    }
}
