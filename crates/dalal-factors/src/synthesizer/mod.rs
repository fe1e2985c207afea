//! Fundamental metric synthesis.
//!
//! [`MetricsSource`] is the seam between quote normalization and wherever
//! fundamentals come from. The only implementation today is
//! [`SimulatedMetrics`], which draws every field from a fixed interval using
//! an injected random generator.

pub mod simulated;

pub use simulated::{SimulatedMetrics, SynthesisRanges};

use dalal_data::{BulkOrders, Recommendation};
use serde::{Deserialize, Serialize};

/// Fundamental, ownership and activity metrics for one quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MetricsBundle {
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
    /// 200-day exponential moving average
    pub ema200: f64,
    /// Current EPS
    pub current_eps: f64,
    /// Previous period EPS
    pub previous_eps: f64,
    /// Profit growth (%)
    pub profit_growth: f64,
    /// Sales growth (%)
    pub sales_growth: f64,
    /// FII holding (%)
    pub fii_holding: f64,
    /// Change in FII holding
    pub fii_change: f64,
    /// DII holding (%)
    pub dii_holding: f64,
    /// Change in DII holding
    pub dii_change: f64,
    /// Recommendation
    pub recommendation: Recommendation,
    /// Bulk order activity
    pub bulk_orders: BulkOrders,
}

/// Provider of per-symbol fundamentals.
pub trait MetricsSource: Send + Sync {
    /// Metrics for `symbol` trading at `price`.
    fn synthesize(&self, symbol: &str, price: f64) -> MetricsBundle;
}
