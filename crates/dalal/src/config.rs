//! Runtime configuration.

use crate::error::{DalalError, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default auto-refresh period in seconds.
pub const DEFAULT_REFRESH_SECS: u64 = 60;

/// Default price simulation period in seconds.
pub const DEFAULT_TICK_SECS: u64 = 5;

/// Aggregator tuning.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatorConfig {
    /// Maximum in-flight requests per source. `None` means one per symbol.
    pub concurrency: Option<usize>,
    /// Seed for metric synthesis and fallback jitter. `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl AggregatorConfig {
    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the concurrency limit is zero.
    pub fn validate(&self) -> Result<()> {
        if self.concurrency == Some(0) {
            return Err(DalalError::InvalidConfig(
                "concurrency must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Effective in-flight limit for a universe of `size` tickers.
    pub fn effective_concurrency(&self, size: usize) -> usize {
        self.concurrency.unwrap_or(size).max(1)
    }
}

/// Top-level screener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScreenerConfig {
    /// Auto-refresh period in seconds
    pub refresh_secs: u64,
    /// Price simulation period in seconds
    pub tick_secs: u64,
    /// Skip live sources and serve the fallback dataset
    pub offline: bool,
    /// Alpha Vantage key; the secondary source stays silent without one
    pub alpha_vantage_key: Option<String>,
    /// Aggregator tuning
    pub aggregator: AggregatorConfig,
}

impl Default for ScreenerConfig {
    fn default() -> Self {
        Self {
            refresh_secs: DEFAULT_REFRESH_SECS,
            tick_secs: DEFAULT_TICK_SECS,
            offline: false,
            alpha_vantage_key: None,
            aggregator: AggregatorConfig::default(),
        }
    }
}

impl ScreenerConfig {
    /// Auto-refresh period.
    pub const fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }

    /// Price simulation period.
    pub const fn tick_interval(&self) -> Duration {
        Duration::from_secs(self.tick_secs)
    }

    /// Validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when either period is zero or the aggregator
    /// settings are invalid.
    pub fn validate(&self) -> Result<()> {
        if self.refresh_secs == 0 {
            return Err(DalalError::InvalidConfig(
                "refresh period must be at least 1 second".to_string(),
            ));
        }
        if self.tick_secs == 0 {
            return Err(DalalError::InvalidConfig(
                "tick period must be at least 1 second".to_string(),
            ));
        }
        self.aggregator.validate()
    }
}
