//! Company name and sector reference tables.

use std::collections::{BTreeSet, HashMap};

/// Sector assigned to symbols missing from the sector table.
pub const DEFAULT_SECTOR: &str = "Others";

const COMPANY_NAMES: [(&str, &str); 34] = [
    ("TCS", "Tata Consultancy Services Limited"),
    ("RELIANCE", "Reliance Industries Limited"),
    ("HDFCBANK", "HDFC Bank Limited"),
    ("INFY", "Infosys Limited"),
    ("ICICIBANK", "ICICI Bank Limited"),
    ("HINDUNILVR", "Hindustan Unilever Limited"),
    ("ITC", "ITC Limited"),
    ("SBIN", "State Bank of India"),
    ("BHARTIARTL", "Bharti Airtel Limited"),
    ("ASIANPAINT", "Asian Paints Limited"),
    ("LT", "Larsen & Toubro Limited"),
    ("AXISBANK", "Axis Bank Limited"),
    ("KOTAKBANK", "Kotak Mahindra Bank Limited"),
    ("MARUTI", "Maruti Suzuki India Limited"),
    ("SUNPHARMA", "Sun Pharmaceutical Industries Limited"),
    ("BAJFINANCE", "Bajaj Finance Limited"),
    ("HCLTECH", "HCL Technologies Limited"),
    ("WIPRO", "Wipro Limited"),
    ("ULTRACEMCO", "UltraTech Cement Limited"),
    ("TITAN", "Titan Company Limited"),
    ("NESTLEIND", "Nestle India Limited"),
    ("POWERGRID", "Power Grid Corporation of India Limited"),
    ("TECHM", "Tech Mahindra Limited"),
    ("NTPC", "NTPC Limited"),
    ("ONGC", "Oil and Natural Gas Corporation Limited"),
    ("MINDTREE", "Mindtree Limited"),
    ("MPHASIS", "Mphasis Limited"),
    ("PAGEIND", "Page Industries Limited"),
    ("DELTACORP", "Delta Corp Limited"),
    ("TATASTEEL", "Tata Steel Limited"),
    ("RAJESHEXPO", "Rajesh Exports Limited"),
    ("IDFCFIRSTB", "IDFC First Bank Limited"),
    ("ZEEL", "Zee Entertainment Enterprises Limited"),
    ("RPOWER", "Reliance Power Limited"),
];

const SECTORS: [(&str, &str); 15] = [
    ("TCS", "IT"),
    ("INFY", "IT"),
    ("WIPRO", "IT"),
    ("MINDTREE", "IT"),
    ("RELIANCE", "Energy"),
    ("ONGC", "Energy"),
    ("HDFCBANK", "Banking"),
    ("ICICIBANK", "Banking"),
    ("SBIN", "Banking"),
    ("ASIANPAINT", "Paints"),
    ("PAGEIND", "Textiles"),
    ("MARUTI", "Automotive"),
    ("TATAMOTORS", "Automotive"),
    ("DELTACORP", "Gaming"),
    ("RAJESHEXPO", "Gems & Jewellery"),
];

/// Immutable lookup tables keyed by canonical symbol (no exchange suffix).
///
/// Built once and shared read-only between the aggregator and the CLI.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    names: HashMap<String, String>,
    sectors: HashMap<String, String>,
}

impl ReferenceData {
    /// Create empty tables. Every lookup falls through to its default.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Tables covering the default Indian universe.
    pub fn indian_equities() -> Self {
        let mut data = Self::empty();
        for (symbol, name) in COMPANY_NAMES {
            data = data.with_name(symbol, name);
        }
        for (symbol, sector) in SECTORS {
            data = data.with_sector(symbol, sector);
        }
        data
    }

    /// Add or replace a company name.
    pub fn with_name(mut self, symbol: impl Into<String>, name: impl Into<String>) -> Self {
        self.names.insert(symbol.into(), name.into());
        self
    }

    /// Add or replace a sector.
    pub fn with_sector(mut self, symbol: impl Into<String>, sector: impl Into<String>) -> Self {
        self.sectors.insert(symbol.into(), sector.into());
        self
    }

    /// Tabled company name, if any.
    pub fn name(&self, symbol: &str) -> Option<&str> {
        self.names.get(symbol).map(String::as_str)
    }

    /// Tabled sector, if any.
    pub fn sector(&self, symbol: &str) -> Option<&str> {
        self.sectors.get(symbol).map(String::as_str)
    }

    /// Display name for a symbol: the table first, then the name the source
    /// reported, then `"<symbol> Limited"`.
    pub fn resolve_name(&self, symbol: &str, source_name: Option<&str>) -> String {
        self.name(symbol)
            .or_else(|| source_name.map(str::trim).filter(|n| !n.is_empty()))
            .map_or_else(|| format!("{} Limited", symbol), str::to_string)
    }

    /// Sector for a symbol, [`DEFAULT_SECTOR`] when untabled.
    pub fn resolve_sector(&self, symbol: &str) -> String {
        self.sector(symbol).unwrap_or(DEFAULT_SECTOR).to_string()
    }

    /// Distinct tabled sector labels, sorted.
    pub fn sector_labels(&self) -> Vec<&str> {
        self.sectors
            .values()
            .map(String::as_str)
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }
}
