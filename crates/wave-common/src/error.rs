//! Error types for shared wave-data types.

use thiserror::Error;

/// Result type alias using WaveError.
pub type WaveResult<T> = Result<T, WaveError>;

/// Validation errors raised while building or checking shared types.
#[derive(Debug, Error)]
pub enum WaveError {
    #[error("Invalid date '{0}': expected {1}")]
    InvalidDate(String, &'static str),

    #[error("Invalid cycle hour '{0}': expected one of 00, 06, 12, 18")]
    InvalidHour(String),

    #[error("Invalid bounding box: {0}")]
    InvalidBbox(String),

    #[error("Invalid timestamp '{0}': expected YYYY-MM-DDThh:mm:ssZ")]
    InvalidTimestamp(String),

    #[error("Shape mismatch: expected {expected} samples, got {actual}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

impl WaveError {
    /// Get the HTTP status code for this error.
    ///
    /// Everything here is caused by caller input, except shape problems which
    /// come from decoded data.
    pub fn http_status_code(&self) -> u16 {
        match self {
            WaveError::InvalidDate(..)
            | WaveError::InvalidHour(_)
            | WaveError::InvalidBbox(_)
            | WaveError::InvalidTimestamp(_) => 400,

            WaveError::ShapeMismatch { .. } | WaveError::InvalidRecord(_) => 500,
        }
    }
}
