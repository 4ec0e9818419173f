//! Common types shared across the GFS Wave cropper crates and services.

pub mod bbox;
pub mod error;
pub mod grid;
pub mod record;
pub mod time;

pub use bbox::{normalize_lon, BoundingBox};
pub use error::{WaveError, WaveResult};
pub use grid::{Axis, GridPoint, RasterField, Resolution};
pub use record::{GridRecord, StoredRecord};
pub use time::{day_range, parse_timestamp, ForecastCycle, ModelCycle};
