//! Connectivity signal reported to the presentation layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Which acquisition branch produced the quotes currently on display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectivityStatus {
    /// An acquisition is in flight
    #[default]
    Connecting,
    /// Quotes came from a live source
    Connected,
    /// Quotes are the fallback dataset
    Disconnected,
}

impl ConnectivityStatus {
    /// Banner text for this state.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Connecting => "Connecting to Market Data...",
            Self::Connected => "Live Market Data Connected",
            Self::Disconnected => "Using Fallback Data",
        }
    }

    /// Whether the displayed quotes are live.
    pub const fn is_live(&self) -> bool {
        matches!(self, Self::Connected)
    }
}

impl fmt::Display for ConnectivityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
