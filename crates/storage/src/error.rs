//! Error types for record stores.

use thiserror::Error;
use wave_common::WaveError;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by record stores.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database connection failed: {0}")]
    Connection(String),

    #[error("Migration failed: {0}")]
    Migration(String),

    #[error("Insert failed: {0}")]
    Write(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("Record rejected: {0}")]
    InvalidRecord(#[from] WaveError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
