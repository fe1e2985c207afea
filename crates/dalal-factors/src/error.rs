//! Error types for metric computation.

use thiserror::Error;

/// Errors raised while configuring metric computation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FactorError {
    /// A sampling interval is empty or not finite
    #[error("Invalid range for {field}: [{low}, {high}]")]
    InvalidRange {
        /// Field the range belongs to
        field: &'static str,
        /// Lower bound
        low: f64,
        /// Upper bound
        high: f64,
    },
}
