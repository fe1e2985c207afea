//! Universe management for the screener.
//!
//! This module provides the Indian equity watch list and the reference
//! tables used to name and classify its members.

pub mod nse;
pub mod reference;

pub use nse::IndianUniverse;
pub use reference::{DEFAULT_SECTOR, ReferenceData};

/// Trait for stock universes.
pub trait Universe {
    /// Get all raw tickers in the universe, suffix included.
    fn symbols(&self) -> Vec<String>;

    /// Check if a raw ticker is in the universe.
    fn contains(&self, symbol: &str) -> bool {
        self.symbols().iter().any(|s| s == symbol)
    }

    /// Get the number of constituents.
    fn size(&self) -> usize {
        self.symbols().len()
    }
}

impl Universe for IndianUniverse {
    fn symbols(&self) -> Vec<String> {
        self.tickers().to_vec()
    }

    fn contains(&self, symbol: &str) -> bool {
        self.tickers().iter().any(|s| s == symbol)
    }

    fn size(&self) -> usize {
        self.len()
    }
}
