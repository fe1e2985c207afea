#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod alpha_vantage;
pub mod error;
pub mod fallback;
pub mod model;
pub mod source;
pub mod yahoo;

pub use alpha_vantage::{AlphaVantageConfig, AlphaVantageSource};
pub use error::{DataError, Result};
pub use model::{BulkOrders, Exchange, OrderType, Quote, Recommendation};
pub use source::{QuoteSource, RawQuote};
pub use yahoo::{YahooChartSource, YahooConfig};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
