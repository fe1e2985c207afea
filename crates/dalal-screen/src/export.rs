//! CSV and JSON export of screening results.

use crate::cap_tier::CapTier;
use crate::engine::ScreeningResult;
use crate::winner::is_potential_winner;
use dalal_data::Quote;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;
use std::str::FromStr;
use thiserror::Error;

/// Errors that can occur during export operations.
#[derive(Debug, Error)]
pub enum ExportError {
    /// CSV serialization error.
    #[error("CSV serialization error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Output was not valid UTF-8.
    #[error("Invalid UTF-8 in export: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),
}

/// Export format options.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// Comma-separated values, one row per matching quote.
    Csv,

    /// Compact JSON of the whole result.
    Json,

    /// Pretty-printed JSON of the whole result.
    PrettyJson,
}

impl ExportFormat {
    /// Get the file extension for this format.
    pub const fn extension(&self) -> &str {
        match self {
            Self::Csv => "csv",
            Self::Json | Self::PrettyJson => "json",
        }
    }
}

impl FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            "pretty-json" | "pretty_json" => Ok(Self::PrettyJson),
            other => Err(format!("Unknown export format: {}", other)),
        }
    }
}

/// One flattened quote with its derived memberships.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct QuoteRow {
    /// Symbol
    pub symbol: String,
    /// Company name
    pub name: String,
    /// Exchange code
    pub exchange: String,
    /// Sector label
    pub sector: String,
    /// Cap tier
    pub cap_tier: CapTier,
    /// Recommendation
    pub recommendation: String,
    /// Price
    pub price: f64,
    /// Market cap (crore)
    pub market_cap: f64,
    /// P/E
    pub pe: f64,
    /// ROE (%)
    pub roe: f64,
    /// Profit growth (%)
    pub profit_growth: f64,
    /// Sales growth (%)
    pub sales_growth: f64,
    /// FII holding (%)
    pub fii_holding: f64,
    /// FII change
    pub fii_change: f64,
    /// RSI
    pub rsi: f64,
    /// Meets every winner condition
    pub potential_winner: bool,
    /// Has bulk order activity
    pub bulk_orders: bool,
    /// Bulk order value (crore), zero without orders
    pub order_value: f64,
    /// Bulk order type label, empty without orders
    pub order_type: String,
    /// Last update, RFC 3339
    pub last_updated: String,
}

impl From<&Quote> for QuoteRow {
    fn from(q: &Quote) -> Self {
        Self {
            symbol: q.symbol.clone(),
            name: q.name.clone(),
            exchange: q.exchange.to_string(),
            sector: q.sector.clone(),
            cap_tier: CapTier::classify(q.market_cap),
            recommendation: q.recommendation.to_string(),
            price: q.price,
            market_cap: q.market_cap,
            pe: q.pe,
            roe: q.roe,
            profit_growth: q.profit_growth,
            sales_growth: q.sales_growth,
            fii_holding: q.fii_holding,
            fii_change: q.fii_change,
            rsi: q.rsi,
            potential_winner: is_potential_winner(q),
            bulk_orders: q.has_bulk_orders(),
            order_value: q.bulk_orders.order_value,
            order_type: q
                .bulk_orders
                .order_type
                .map(|t| t.label().to_string())
                .unwrap_or_default(),
            last_updated: q.last_updated.to_rfc3339(),
        }
    }
}

/// Trait for types that can be exported.
pub trait Exporter {
    /// Export data to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError>;

    /// Export data to a file in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or file writing fails.
    fn export_to_file(&self, path: &Path, format: ExportFormat) -> Result<(), ExportError> {
        let content = self.export_to_string(format)?;
        let mut file = File::create(path)?;
        file.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn rows_to_csv(rows: &[QuoteRow]) -> Result<String, ExportError> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    for row in rows {
        wtr.serialize(row)?;
    }
    let bytes = wtr.into_inner().map_err(|e| e.into_error())?;
    Ok(String::from_utf8(bytes)?)
}

impl Exporter for ScreeningResult {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let rows: Vec<QuoteRow> = self.matches.iter().map(QuoteRow::from).collect();
                rows_to_csv(&rows)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

impl Exporter for Vec<Quote> {
    fn export_to_string(&self, format: ExportFormat) -> Result<String, ExportError> {
        match format {
            ExportFormat::Csv => {
                let rows: Vec<QuoteRow> = self.iter().map(QuoteRow::from).collect();
                rows_to_csv(&rows)
            }
            ExportFormat::Json => Ok(serde_json::to_string(self)?),
            ExportFormat::PrettyJson => Ok(serde_json::to_string_pretty(self)?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::criteria::ScreeningCriteria;
    use crate::engine::screen;
    use crate::testing::quote;
    use dalal_data::{BulkOrders, OrderType};

    #[test]
    fn test_format_parse() {
        assert_eq!("CSV".parse::<ExportFormat>(), Ok(ExportFormat::Csv));
        assert_eq!("pretty-json".parse::<ExportFormat>(), Ok(ExportFormat::PrettyJson));
        assert!("xml".parse::<ExportFormat>().is_err());
        assert_eq!(ExportFormat::PrettyJson.extension(), "json");
    }

    #[test]
    fn test_row_from_quote() {
        let mut q = quote("TCS");
        q.market_cap = 1_256_789.0;
        q.bulk_orders = BulkOrders::new(987.4, OrderType::FiiBuy, "2.16L shares");
        let row = QuoteRow::from(&q);

        assert_eq!(row.cap_tier, CapTier::Large);
        assert_eq!(row.exchange, "NSE");
        assert_eq!(row.order_type, "FII Buy");
        assert!(row.bulk_orders);
        assert!(!row.potential_winner);
    }

    #[test]
    fn test_csv_has_header_and_rows() {
        let result = screen(&[quote("A"), quote("B")], &ScreeningCriteria::default());
        let csv = result.export_to_string(ExportFormat::Csv).unwrap();
        let lines: Vec<_> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("symbol,name,exchange,sector,cap_tier"));
        assert!(lines[1].starts_with("A,A Limited,NSE,IT,small,hold"));
    }

    #[test]
    fn test_json_uses_camel_case_buckets() {
        let result = screen(&[quote("A")], &ScreeningCriteria::default());
        let json = result.export_to_string(ExportFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value["totalCount"], 1);
        assert!(value["potentialWinners"].as_array().unwrap().is_empty());
        assert!(value["topBuysByTier"]["large"].as_array().unwrap().is_empty());
    }
}
