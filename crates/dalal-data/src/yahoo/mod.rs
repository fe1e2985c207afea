//! Yahoo Finance data source.

pub mod chart;

pub use chart::{YahooChartSource, YahooConfig, parse_chart};
