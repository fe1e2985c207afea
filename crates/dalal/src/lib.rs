#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod aggregator;
pub mod board;
pub mod config;
pub mod error;
pub mod status;
pub mod universe;

// Re-export main types from sub-crates
pub use dalal_data as data;
pub use dalal_factors as factors;
pub use dalal_screen as screen;

pub use aggregator::{Acquisition, QuoteAggregator, QuoteAggregatorBuilder, QuoteOrigin};
pub use board::{MarketBoard, spawn_auto_refresh, spawn_price_simulation};
pub use config::{AggregatorConfig, ScreenerConfig};
pub use error::{DalalError, Result};
pub use status::ConnectivityStatus;
pub use universe::{IndianUniverse, ReferenceData, Universe};

/// Version information.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
