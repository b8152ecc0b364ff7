//! Analyzer error types.

use thiserror::Error;

pub type AnalyzerResult<T> = Result<T, AnalyzerError>;

#[derive(Debug, Error)]
pub enum AnalyzerError {
    #[error("Bin size must be a positive number of seconds, got {0}")]
    InvalidBinSize(f64),

    #[error("Percentile must be within 0-100, got {0}")]
    InvalidPercentile(f64),

    #[error("Minimum duration {min}s exceeds maximum duration {max}s")]
    InvalidDurationBounds { min: f64, max: f64 },

    #[error("Invalid keyword pattern: {0}")]
    BadKeyword(#[from] regex::Error),
}
