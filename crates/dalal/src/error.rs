//! Error types for screener wiring.

use dalal_data::DataError;
use dalal_factors::FactorError;
use thiserror::Error;

/// Errors raised while assembling the screener.
///
/// Acquisition itself never fails; per-symbol errors are logged and
/// swallowed. These variants cover construction only.
#[derive(Debug, Error)]
pub enum DalalError {
    /// Configuration value out of range
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Data source could not be constructed
    #[error("Data source error: {0}")]
    Data(#[from] DataError),

    /// Metrics synthesizer rejected its ranges
    #[error("Metrics error: {0}")]
    Factor(#[from] FactorError),
}

/// Result type for screener wiring.
pub type Result<T> = std::result::Result<T, DalalError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_source_errors_convert() {
        let err: DalalError = DataError::missing("TCS", "empty Global Quote").into();
        assert!(matches!(err, DalalError::Data(DataError::MissingData { .. })));
        assert!(err.to_string().starts_with("Data source error: "));
    }
}
