//! Canonical quote record shared by every stage of the screener.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Indian stock exchange a quote was listed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Exchange {
    /// National Stock Exchange
    #[serde(rename = "NSE")]
    Nse,
    /// Bombay Stock Exchange
    #[serde(rename = "BSE")]
    Bse,
}

impl Exchange {
    /// Ticker suffix used by Yahoo Finance for NSE listings.
    pub const NSE_SUFFIX: &'static str = ".NS";
    /// Ticker suffix used by Yahoo Finance for BSE listings.
    pub const BSE_SUFFIX: &'static str = ".BO";

    /// Returns both exchanges.
    pub const fn all() -> [Self; 2] {
        [Self::Nse, Self::Bse]
    }

    /// Short exchange code.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Nse => "NSE",
            Self::Bse => "BSE",
        }
    }

    /// Split a raw source ticker into its canonical symbol and exchange.
    ///
    /// `.NS` maps to NSE, `.BO` to BSE; any other ticker is taken whole and
    /// defaults to NSE.
    ///
    /// ```
    /// use dalal_data::Exchange;
    ///
    /// assert_eq!(Exchange::split_symbol("TCS.NS"), ("TCS", Exchange::Nse));
    /// assert_eq!(Exchange::split_symbol("TCS.BO"), ("TCS", Exchange::Bse));
    /// assert_eq!(Exchange::split_symbol("TCS"), ("TCS", Exchange::Nse));
    /// ```
    pub fn split_symbol(raw: &str) -> (&str, Self) {
        if let Some(symbol) = raw.strip_suffix(Self::NSE_SUFFIX) {
            (symbol, Self::Nse)
        } else if let Some(symbol) = raw.strip_suffix(Self::BSE_SUFFIX) {
            (symbol, Self::Bse)
        } else {
            (raw, Self::Nse)
        }
    }
}

impl fmt::Display for Exchange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Exchange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "NSE" => Ok(Self::Nse),
            "BSE" => Ok(Self::Bse),
            other => Err(format!("Unknown exchange: {}", other)),
        }
    }
}

/// Analyst-style recommendation attached to a quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Recommendation {
    /// Buy
    Buy,
    /// Hold
    Hold,
    /// Sell
    Sell,
}

impl Recommendation {
    /// Sort priority: buy (3) > hold (2) > sell (1).
    pub const fn priority(&self) -> u8 {
        match self {
            Self::Buy => 3,
            Self::Hold => 2,
            Self::Sell => 1,
        }
    }

    /// Lowercase label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Hold => "hold",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for Recommendation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of institutional block/bulk deal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderType {
    /// Foreign institutional investor purchase
    #[serde(rename = "FII Buy")]
    FiiBuy,
    /// Domestic institutional investor purchase
    #[serde(rename = "DII Buy")]
    DiiBuy,
    /// Mutual fund purchase
    #[serde(rename = "Mutual Fund Buy")]
    MutualFundBuy,
    /// Insurance company purchase
    #[serde(rename = "Insurance Buy")]
    InsuranceBuy,
    /// Promoter purchase
    #[serde(rename = "Promoter Buy")]
    PromoterBuy,
    /// Unclassified institutional purchase
    #[serde(rename = "Institutional Buy")]
    InstitutionalBuy,
}

impl OrderType {
    /// Labels that simulated metrics draw from.
    pub const SIMULATED: [Self; 5] = [
        Self::FiiBuy,
        Self::DiiBuy,
        Self::MutualFundBuy,
        Self::InsuranceBuy,
        Self::PromoterBuy,
    ];

    /// Display label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::FiiBuy => "FII Buy",
            Self::DiiBuy => "DII Buy",
            Self::MutualFundBuy => "Mutual Fund Buy",
            Self::InsuranceBuy => "Insurance Buy",
            Self::PromoterBuy => "Promoter Buy",
            Self::InstitutionalBuy => "Institutional Buy",
        }
    }
}

impl fmt::Display for OrderType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Bulk order activity on a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BulkOrders {
    /// Whether any bulk order was seen
    pub has_orders: bool,
    /// Order value in crore rupees
    pub order_value: f64,
    /// Order classification
    pub order_type: Option<OrderType>,
    /// Formatted share count, e.g. `"2.16L shares"`
    pub quantity: String,
}

impl BulkOrders {
    /// No bulk order activity.
    pub const fn none() -> Self {
        Self {
            has_orders: false,
            order_value: 0.0,
            order_type: None,
            quantity: String::new(),
        }
    }

    /// A bulk order of the given size.
    pub fn new(order_value: f64, order_type: OrderType, quantity: impl Into<String>) -> Self {
        Self {
            has_orders: true,
            order_value,
            order_type: Some(order_type),
            quantity: quantity.into(),
        }
    }
}

impl Default for BulkOrders {
    fn default() -> Self {
        Self::none()
    }
}

/// A single equity with market data, fundamentals and technicals.
///
/// Category memberships (winner, bulk order, cap tier) are never stored here;
/// the screening engine derives them from these fields on each pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    /// Exchange-stripped ticker, unique within a screening run
    pub symbol: String,
    /// Company name
    pub name: String,
    /// Listing exchange
    pub exchange: Exchange,
    /// Free-form sector label
    pub sector: String,

    /// Last traded price
    pub price: f64,
    /// Previous session close
    pub previous_close: f64,
    /// Session volume
    pub volume: u64,

    /// Market capitalisation in crore rupees
    pub market_cap: f64,
    /// Price to earnings
    pub pe: f64,
    /// Return on equity (%)
    pub roe: f64,
    /// Debt to equity
    pub debt_to_equity: f64,
    /// Revenue growth (%)
    pub revenue_growth: f64,
    /// EPS growth (%)
    pub eps_growth: f64,
    /// Profit growth (%)
    pub profit_growth: f64,
    /// Sales growth (%)
    pub sales_growth: f64,
    /// Current EPS
    #[serde(rename = "currentEPS")]
    pub current_eps: f64,
    /// Previous period EPS
    #[serde(rename = "previousEPS")]
    pub previous_eps: f64,
    /// 200-day exponential moving average
    pub ema200: f64,

    /// FII holding (%)
    pub fii_holding: f64,
    /// Change in FII holding (percentage points)
    pub fii_change: f64,
    /// DII holding (%)
    pub dii_holding: f64,
    /// Change in DII holding (percentage points)
    pub dii_change: f64,

    /// Relative strength index, 0 to 100
    pub rsi: f64,
    /// Recommendation
    pub recommendation: Recommendation,
    /// Bulk order activity
    pub bulk_orders: BulkOrders,
    /// Time the price was last refreshed
    pub last_updated: DateTime<Utc>,
}

impl Quote {
    /// Whether the quote has the positive price, market cap, EMA and EPS
    /// values and bounded RSI that a screenable quote requires.
    pub fn is_valid(&self) -> bool {
        !self.symbol.is_empty()
            && self.price > 0.0
            && self.market_cap > 0.0
            && self.ema200 > 0.0
            && self.current_eps > 0.0
            && self.previous_eps > 0.0
            && (0.0..=100.0).contains(&self.rsi)
    }

    /// Distance of price above (or below) the 200-day EMA, in percent.
    pub fn ema200_premium_pct(&self) -> f64 {
        (self.price - self.ema200) / self.ema200 * 100.0
    }

    /// Day change versus previous close, in percent. Zero when there is no
    /// previous close.
    pub fn change_pct(&self) -> f64 {
        if self.previous_close > 0.0 {
            (self.price - self.previous_close) / self.previous_close * 100.0
        } else {
            0.0
        }
    }

    /// Whether the quote has bulk order activity.
    pub const fn has_bulk_orders(&self) -> bool {
        self.bulk_orders.has_orders
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    /// A quote with every field populated, suitable for tweaking in tests.
    pub(crate) fn quote(symbol: &str) -> Quote {
        Quote {
            symbol: symbol.to_string(),
            name: format!("{} Limited", symbol),
            exchange: Exchange::Nse,
            sector: "IT".to_string(),
            price: 100.0,
            previous_close: 98.0,
            volume: 1_000,
            market_cap: 10_000.0,
            pe: 20.0,
            roe: 20.0,
            debt_to_equity: 0.5,
            revenue_growth: 10.0,
            eps_growth: 10.0,
            profit_growth: 10.0,
            sales_growth: 10.0,
            current_eps: 10.0,
            previous_eps: 9.0,
            ema200: 95.0,
            fii_holding: 20.0,
            fii_change: 1.0,
            dii_holding: 10.0,
            dii_change: 0.5,
            rsi: 50.0,
            recommendation: Recommendation::Hold,
            bulk_orders: BulkOrders::none(),
            last_updated: Utc::now(),
        }
    }
}
