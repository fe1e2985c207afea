#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/dalal/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod error;
pub mod indicator;
pub mod synthesizer;

pub use error::FactorError;
pub use indicator::rsi::{NEUTRAL_RSI, RSI_PERIOD, rsi};
pub use synthesizer::{MetricsBundle, MetricsSource, SimulatedMetrics, SynthesisRanges};
