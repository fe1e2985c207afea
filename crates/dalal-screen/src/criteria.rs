//! Screening criteria.

use crate::cap_tier::CapTier;
use dalal_data::{Exchange, Quote};
use std::str::FromStr;
use tracing::warn;

/// Wildcard label accepted by every categorical filter.
pub const WILDCARD: &str = "all";

/// A categorical filter: either anything, or exactly one value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Selection<T> {
    /// Matches every value
    #[default]
    Any,
    /// Matches one value exactly
    Only(T),
}

impl<T> Selection<T> {
    /// Whether `value` passes this filter.
    pub fn matches<Q: ?Sized>(&self, value: &Q) -> bool
    where
        T: PartialEq<Q>,
    {
        match self {
            Self::Any => true,
            Self::Only(expected) => *expected == *value,
        }
    }

    /// Whether this is the wildcard.
    pub const fn is_any(&self) -> bool {
        matches!(self, Self::Any)
    }
}

impl<T: FromStr> Selection<T> {
    /// Parse a UI label. `"all"` and blank input are the wildcard; labels
    /// that do not parse are logged and treated as the wildcard too.
    pub fn parse_lenient(raw: &str, field: &'static str) -> Self {
        let raw = raw.trim();
        if raw.is_empty() || raw.eq_ignore_ascii_case(WILDCARD) {
            return Self::Any;
        }
        raw.parse().map_or_else(
            |_| {
                warn!(field, value = raw, "Unrecognised filter value, matching all");
                Self::Any
            },
            Self::Only,
        )
    }
}

/// The longest decimal number at the start of `raw`, ignoring leading
/// whitespace and anything after the number (`"12abc"` reads as 12).
fn leading_number(raw: &str) -> Option<f64> {
    let s = raw.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |from: usize| {
        bytes
            .get(from..)
            .map_or(0, |rest| rest.iter().take_while(|b| b.is_ascii_digit()).count())
    };

    let mut end = usize::from(matches!(bytes.first(), Some(b'+' | b'-')));
    let int_digits = digits_from(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits_from(end + 1);
        end += 1 + frac_digits;
    }
    if int_digits + frac_digits == 0 {
        return None;
    }
    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_digits = digits_from(exp);
        if exp_digits > 0 {
            end = exp + exp_digits;
        }
    }
    s[..end].parse().ok()
}

/// Parse a numeric filter field the way the dashboard form does: the
/// leading number is read, and anything missing, non-numeric, non-finite or
/// zero falls back to `default`.
fn parse_number_or(raw: &str, default: f64) -> f64 {
    match leading_number(raw) {
        Some(value) if value.is_finite() && value != 0.0 => value,
        _ => default,
    }
}

/// Filters applied by [`screen`](crate::screen).
#[derive(Debug, Clone, PartialEq)]
pub struct ScreeningCriteria {
    /// Exchange filter
    pub exchange: Selection<Exchange>,
    /// Sector filter, exact label match
    pub sector: Selection<String>,
    /// Cap tier filter
    pub cap_tier: Selection<CapTier>,
    /// Minimum P/E, inclusive (default: 0)
    pub min_pe: f64,
    /// Maximum P/E, inclusive (default: +inf)
    pub max_pe: f64,
    /// Minimum ROE, inclusive (default: 0)
    pub min_roe: f64,
}

impl Default for ScreeningCriteria {
    fn default() -> Self {
        Self {
            exchange: Selection::Any,
            sector: Selection::Any,
            cap_tier: Selection::Any,
            min_pe: 0.0,
            max_pe: f64::INFINITY,
            min_roe: 0.0,
        }
    }
}

impl ScreeningCriteria {
    /// Criteria that match every quote with non-negative P/E and ROE.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build criteria from raw form input, coercing anything unusable to the
    /// permissive default instead of rejecting it.
    ///
    /// ```
    /// use dalal_screen::{ScreeningCriteria, Selection};
    ///
    /// let criteria = ScreeningCriteria::lenient("all", "IT", "large", "", "abc", "15");
    /// assert_eq!(criteria.sector, Selection::Only("IT".to_string()));
    /// assert_eq!(criteria.min_pe, 0.0);
    /// assert_eq!(criteria.max_pe, f64::INFINITY);
    /// assert_eq!(criteria.min_roe, 15.0);
    /// ```
    pub fn lenient(
        exchange: &str,
        sector: &str,
        cap_tier: &str,
        min_pe: &str,
        max_pe: &str,
        min_roe: &str,
    ) -> Self {
        Self {
            exchange: Selection::parse_lenient(exchange, "exchange"),
            sector: Selection::parse_lenient(sector, "sector"),
            cap_tier: Selection::parse_lenient(cap_tier, "cap_tier"),
            min_pe: parse_number_or(min_pe, 0.0),
            max_pe: parse_number_or(max_pe, f64::INFINITY),
            min_roe: parse_number_or(min_roe, 0.0),
        }
    }

    /// Restrict to one exchange.
    pub fn with_exchange(mut self, exchange: Exchange) -> Self {
        self.exchange = Selection::Only(exchange);
        self
    }

    /// Restrict to one sector label.
    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Selection::Only(sector.into());
        self
    }

    /// Restrict to one cap tier.
    pub fn with_cap_tier(mut self, tier: CapTier) -> Self {
        self.cap_tier = Selection::Only(tier);
        self
    }

    /// Set the inclusive P/E band.
    pub fn with_pe_range(mut self, min_pe: f64, max_pe: f64) -> Self {
        self.min_pe = min_pe;
        self.max_pe = max_pe;
        self
    }

    /// Set the minimum ROE.
    pub fn with_min_roe(mut self, min_roe: f64) -> Self {
        self.min_roe = min_roe;
        self
    }

    /// Whether a quote passes every filter.
    pub fn matches(&self, quote: &Quote) -> bool {
        self.exchange.matches(&quote.exchange)
            && self.sector.matches(quote.sector.as_str())
            && self.cap_tier.matches(&CapTier::classify(quote.market_cap))
            && quote.pe >= self.min_pe
            && quote.pe <= self.max_pe
            && quote.roe >= self.min_roe
    }
}
