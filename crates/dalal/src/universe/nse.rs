//! Watch list of NSE-listed equities.

use dalal_data::Exchange;
use std::collections::HashSet;

/// Raw Yahoo tickers tracked by default, in request order.
const DEFAULT_TICKERS: [&str; 34] = [
    // Large caps
    "TCS.NS",
    "RELIANCE.NS",
    "HDFCBANK.NS",
    "INFY.NS",
    "ICICIBANK.NS",
    "HINDUNILVR.NS",
    "ITC.NS",
    "SBIN.NS",
    "BHARTIARTL.NS",
    "ASIANPAINT.NS",
    "LT.NS",
    "AXISBANK.NS",
    "KOTAKBANK.NS",
    "MARUTI.NS",
    "SUNPHARMA.NS",
    // Mid caps
    "BAJFINANCE.NS",
    "HCLTECH.NS",
    "WIPRO.NS",
    "ULTRACEMCO.NS",
    "TITAN.NS",
    "NESTLEIND.NS",
    "POWERGRID.NS",
    "TECHM.NS",
    "NTPC.NS",
    "ONGC.NS",
    // Small caps
    "MINDTREE.NS",
    "MPHASIS.NS",
    "PAGEIND.NS",
    "DELTACORP.NS",
    "TATASTEEL.NS",
    "RAJESHEXPO.NS",
    "IDFCFIRSTB.NS",
    "ZEEL.NS",
    "RPOWER.NS",
];

/// Ordered list of raw tickers the aggregator requests.
///
/// Tickers carry their exchange suffix (`.NS` or `.BO`). Order is the order
/// quotes come back in, so it also decides which listing wins when the same
/// company appears twice.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndianUniverse {
    tickers: Vec<String>,
}

impl IndianUniverse {
    /// Create the default watch list.
    pub fn new() -> Self {
        Self::from_tickers(DEFAULT_TICKERS)
    }

    /// Create a watch list from arbitrary tickers. Blank entries and exact
    /// repeats are dropped, first occurrence kept.
    pub fn from_tickers<I, S>(tickers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut seen = HashSet::new();
        let tickers = tickers
            .into_iter()
            .map(|t| t.as_ref().trim().to_string())
            .filter(|t| !t.is_empty() && seen.insert(t.clone()))
            .collect();
        Self { tickers }
    }

    /// All raw tickers, in order.
    pub fn tickers(&self) -> &[String] {
        &self.tickers
    }

    /// Number of tickers.
    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    /// Whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }

    /// Canonical symbols (suffix removed) with their exchange.
    pub fn canonical(&self) -> impl Iterator<Item = (&str, Exchange)> {
        self.tickers.iter().map(|t| Exchange::split_symbol(t))
    }
}

impl Default for IndianUniverse {
    fn default() -> Self {
        Self::new()
    }
}
