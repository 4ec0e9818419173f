//! Error types for the ingestion crate.

use std::path::PathBuf;

use thiserror::Error;

use grid_processor::CropError;
use storage::StoreError;
use wave_common::WaveError;

/// Errors fetching a GRIB file from upstream.
#[derive(Error, Debug)]
pub enum DownloadError {
    #[error("Upstream returned HTTP {status} for {url}: {body}")]
    Status { url: String, status: u16, body: String },

    #[error("Downloaded file is too small ({size} bytes, expected at least {min}); the cycle may not be published yet")]
    TooSmall { size: u64, min: u64 },

    #[error("HTTP request failed: {0}")]
    Network(String),

    #[error("Download timed out after {0} seconds")]
    Timeout(u64),

    #[error("Failed to write download: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors turning a GRIB file into a raster field.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Failed to run decoder '{program}': {message}")]
    Invocation { program: PathBuf, message: String },

    #[error("Decoder exited with status {status}: {stderr}")]
    DecoderFailed { status: String, stderr: String },

    #[error("Variable '{0}' not found in GRIB file")]
    VariableNotFound(String),

    #[error("Decoded field has {actual} values, expected {expected}")]
    ShapeMismatch { expected: usize, actual: usize },

    #[error("Invalid value '{token}' at position {index} in decoder output")]
    Parse { index: usize, token: String },

    #[error("Decoder I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Any failure of a pipeline run, tagged by the stage that produced it.
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("{0}")]
    Validation(#[from] WaveError),

    #[error("Download failed: {0}")]
    Download(#[from] DownloadError),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Crop failed: {0}")]
    Crop(#[from] CropError),

    #[error("Store failed: {0}")]
    Store(#[from] StoreError),

    #[error("Worker task failed: {0}")]
    Task(String),
}

impl PipelineError {
    /// HTTP status to report to the trigger caller.
    pub fn http_status_code(&self) -> u16 {
        match self {
            PipelineError::Validation(e) => e.http_status_code(),
            PipelineError::Download(DownloadError::Timeout(_)) => 504,
            PipelineError::Download(DownloadError::Io(_)) => 500,
            PipelineError::Download(_) => 502,
            _ => 500,
        }
    }

    /// Short stage name, used as a metrics label.
    pub fn stage(&self) -> &'static str {
        match self {
            PipelineError::Validation(_) => "validation",
            PipelineError::Download(_) => "download",
            PipelineError::Decode(_) => "decode",
            PipelineError::Crop(_) => "crop",
            PipelineError::Store(_) => "store",
            PipelineError::Task(_) => "task",
        }
    }
}

/// Result type for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;
