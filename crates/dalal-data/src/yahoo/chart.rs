//! Quote data from the Yahoo Finance v8 chart endpoint.

use crate::error::{DataError, Result};
use crate::source::{QuoteSource, RawQuote};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Yahoo Finance chart API base URL
const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart/";

/// Browser-like user agent; Yahoo rejects requests without one
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7)";

/// Configuration for the Yahoo chart source.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YahooConfig {
    /// Endpoint prefix; the ticker is appended directly
    pub base_url: String,
    /// Bar interval (default: `1d`)
    pub interval: String,
    /// History range (default: `1mo`, enough for a 14-period RSI)
    pub range: String,
    /// Per-request timeout in seconds (default: 10)
    pub timeout_secs: u64,
    /// User agent header
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: YAHOO_CHART_URL.to_string(),
            interval: "1d".to_string(),
            range: "1mo".to_string(),
            timeout_secs: 10,
            user_agent: USER_AGENT.to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    #[serde(default)]
    indicators: Option<Indicators>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    #[serde(default)]
    long_name: Option<String>,
    #[serde(default)]
    regular_market_price: Option<f64>,
    #[serde(default)]
    previous_close: Option<f64>,
    #[serde(default)]
    chart_previous_close: Option<f64>,
    #[serde(default)]
    regular_market_volume: Option<u64>,
    #[serde(default)]
    market_cap: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<IndicatorQuote>,
}

#[derive(Debug, Deserialize)]
struct IndicatorQuote {
    #[serde(default)]
    close: Option<Vec<Option<f64>>>,
}

/// Parse a chart endpoint body into a [`RawQuote`].
///
/// # Errors
///
/// Returns [`DataError::Serialization`] for malformed JSON,
/// [`DataError::YahooApi`] when the payload carries an error object, and
/// [`DataError::MissingData`] when `chart.result[0]` is absent.
pub fn parse_chart(raw_symbol: &str, body: &str) -> Result<RawQuote> {
    let response: ChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(DataError::YahooApi(format!(
            "{}: {}",
            error.code.unwrap_or_else(|| "unknown".to_string()),
            error.description.unwrap_or_default()
        )));
    }

    let result = response
        .chart
        .result
        .and_then(|results| results.into_iter().next())
        .ok_or_else(|| DataError::missing(raw_symbol, "chart.result[0] is absent"))?;

    let meta = result.meta;
    let closes = result
        .indicators
        .and_then(|ind| ind.quote.into_iter().next())
        .and_then(|q| q.close)
        .unwrap_or_default()
        .into_iter()
        .flatten()
        .filter(|c| c.is_finite())
        .collect();

    Ok(RawQuote {
        raw_symbol: raw_symbol.to_string(),
        long_name: meta.long_name,
        regular_market_price: meta.regular_market_price,
        previous_close: meta.previous_close.or(meta.chart_previous_close),
        volume: meta.regular_market_volume,
        market_cap: meta.market_cap,
        closes,
    })
}

/// Yahoo Finance chart endpoint source.
#[derive(Debug)]
pub struct YahooChartSource {
    client: reqwest::Client,
    config: YahooConfig,
}

impl YahooChartSource {
    /// Create a source with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn new() -> Result<Self> {
        Self::with_config(YahooConfig::default())
    }

    /// Create a source with custom configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built.
    pub fn with_config(config: YahooConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self { client, config })
    }

    /// Get the configuration.
    pub const fn config(&self) -> &YahooConfig {
        &self.config
    }
}

#[async_trait]
impl QuoteSource for YahooChartSource {
    fn name(&self) -> &'static str {
        "yahoo"
    }

    async fn query(&self, raw_symbol: &str) -> Result<RawQuote> {
        if raw_symbol.is_empty() {
            return Err(DataError::InvalidSymbol("Empty symbol".to_string()));
        }

        let url = format!("{}{}", self.config.base_url, raw_symbol);
        let response = self
            .client
            .get(&url)
            .query(&[
                ("interval", self.config.interval.as_str()),
                ("range", self.config.range.as_str()),
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
        let raw = parse_chart(raw_symbol, &body)?;
        debug!(symbol = raw_symbol, closes = raw.closes.len(), "Parsed Yahoo chart");
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TCS_BODY: &str = r#"{
        "chart": {
            "result": [{
                "meta": {
                    "currency": "INR",
                    "symbol": "TCS.NS",
                    "longName": "Tata Consultancy Services Limited",
                    "regularMarketPrice": 3456.75,
                    "chartPreviousClose": 3401.1,
                    "regularMarketVolume": 2456789
                },
                "timestamp": [1, 2, 3],
                "indicators": {
                    "quote": [{ "close": [3400.0, null, 3456.75] }]
                }
            }],
            "error": null
        }
    }"#;

    #[test]
    fn test_parse_chart() {
        let raw = parse_chart("TCS.NS", TCS_BODY).unwrap();

        assert_eq!(raw.raw_symbol, "TCS.NS");
        assert_eq!(raw.long_name.as_deref(), Some("Tata Consultancy Services Limited"));
        assert_eq!(raw.regular_market_price, Some(3456.75));
        assert_eq!(raw.previous_close, Some(3401.1));
        assert_eq!(raw.volume, Some(2_456_789));
        assert_eq!(raw.market_cap, None);
        assert_eq!(raw.closes, vec![3400.0, 3456.75]);
    }

    #[test]
    fn test_parse_chart_without_result() {
        let body = r#"{"chart": {"result": [], "error": null}}"#;
        let err = parse_chart("TCS.NS", body).unwrap_err();
        assert!(matches!(err, DataError::MissingData { .. }));

        let body = r#"{"chart": {"result": null, "error": null}}"#;
        let err = parse_chart("TCS.NS", body).unwrap_err();
        assert!(matches!(err, DataError::MissingData { .. }));
    }

    #[test]
    fn test_parse_chart_error_object() {
        let body = r#"{"chart": {"result": null, "error": {"code": "Not Found", "description": "No data found, symbol may be delisted"}}}"#;
        let err = parse_chart("ZZZ.NS", body).unwrap_err();
        assert!(matches!(err, DataError::YahooApi(msg) if msg.starts_with("Not Found")));
    }

    #[test]
    fn test_parse_chart_malformed() {
        let err = parse_chart("TCS.NS", "<html>rate limited</html>").unwrap_err();
        assert!(matches!(err, DataError::Serialization(_)));
    }

    #[test]
    fn test_config_default() {
        let config = YahooConfig::default();
        assert_eq!(config.interval, "1d");
        assert_eq!(config.range, "1mo");
        assert!(config.base_url.ends_with('/'));
    }

    #[tokio::test]
    async fn test_empty_symbol_rejected() {
        let source = YahooChartSource::new().unwrap();
        let result = source.query("").await;
        assert!(matches!(result, Err(DataError::InvalidSymbol(_))));
    }
}
