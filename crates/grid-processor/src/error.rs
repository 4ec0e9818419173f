//! Error types for grid cropping.

use thiserror::Error;

/// Which coordinate axis an error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AxisKind {
    Latitude,
    Longitude,
}

impl std::fmt::Display for AxisKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AxisKind::Latitude => write!(f, "latitude"),
            AxisKind::Longitude => write!(f, "longitude"),
        }
    }
}

/// Precondition failures that stop a crop before it starts.
#[derive(Error, Debug)]
pub enum CropError {
    /// The axis is neither length-N nor the field's full shape.
    #[error("{axis} axis shape {actual:?} does not fit field shape {field:?}")]
    AxisShape {
        axis: AxisKind,
        actual: Vec<usize>,
        field: (usize, usize),
    },

    /// Fewer than two samples along the axis, so no step can be derived.
    #[error("{axis} axis has {len} sample(s) along its dimension; at least 2 are required")]
    AxisTooShort { axis: AxisKind, len: usize },
}

/// Result type for crop operations.
pub type Result<T> = std::result::Result<T, CropError>;
