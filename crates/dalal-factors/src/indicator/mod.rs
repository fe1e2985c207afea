//! Technical indicators computed from a close history.

pub mod rsi;

pub use rsi::rsi;
