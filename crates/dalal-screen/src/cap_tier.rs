//! Market capitalisation tiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Market cap above which a company is large cap (crore).
pub const LARGE_CAP_THRESHOLD: f64 = 200_000.0;

/// Market cap above which a company is mid cap (crore).
pub const MID_CAP_THRESHOLD: f64 = 50_000.0;

/// Market capitalisation tier.
///
/// A total partition of market cap: `> 200,000` is large, `(50,000, 200,000]`
/// is mid, everything else (including exactly 50,000) is small.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CapTier {
    /// Large cap
    Large,
    /// Mid cap
    Mid,
    /// Small cap
    Small,
}

impl CapTier {
    /// Returns all tiers, largest first.
    pub const fn all() -> [Self; 3] {
        [Self::Large, Self::Mid, Self::Small]
    }

    /// Classify a market cap in crore.
    ///
    /// ```
    /// use dalal_screen::CapTier;
    ///
    /// assert_eq!(CapTier::classify(200_001.0), CapTier::Large);
    /// assert_eq!(CapTier::classify(200_000.0), CapTier::Mid);
    /// assert_eq!(CapTier::classify(50_000.0), CapTier::Small);
    /// ```
    pub fn classify(market_cap: f64) -> Self {
        if market_cap > LARGE_CAP_THRESHOLD {
            Self::Large
        } else if market_cap > MID_CAP_THRESHOLD {
            Self::Mid
        } else {
            Self::Small
        }
    }

    /// Lowercase label.
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Large => "large",
            Self::Mid => "mid",
            Self::Small => "small",
        }
    }

    /// Human-readable title.
    pub const fn title(&self) -> &'static str {
        match self {
            Self::Large => "Large Cap",
            Self::Mid => "Mid Cap",
            Self::Small => "Small Cap",
        }
    }
}

impl fmt::Display for CapTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CapTier {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "large" => Ok(Self::Large),
            "mid" => Ok(Self::Mid),
            "small" => Ok(Self::Small),
            other => Err(format!("Unknown cap tier: {}", other)),
        }
    }
}
