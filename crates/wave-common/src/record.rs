//! Persisted grid records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{WaveError, WaveResult};
use crate::grid::{GridPoint, Resolution};
use crate::time::parse_timestamp;
use crate::BoundingBox;

/// Cropped points of one variable at one forecast time, ready for storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridRecord {
    /// ISO-8601 UTC, e.g. `2025-06-17T06:00:00Z`
    pub timestamp: String,
    pub variable: String,
    pub bbox: BoundingBox,
    pub resolution: Resolution,
    pub data: Vec<GridPoint>,
}

impl GridRecord {
    /// Parsed form of `timestamp`.
    pub fn timestamp_utc(&self) -> WaveResult<DateTime<Utc>> {
        parse_timestamp(&self.timestamp)
    }

    /// Check the record's shape before it is persisted.
    pub fn validate(&self) -> WaveResult<()> {
        self.timestamp_utc()?;

        if self.variable.trim().is_empty() {
            return Err(WaveError::InvalidRecord("variable name is empty".into()));
        }

        self.bbox.validate()?;

        let [lon_step, lat_step] = self.resolution.to_array();
        if !(lon_step.is_finite() && lat_step.is_finite()) || lon_step < 0.0 || lat_step < 0.0 {
            return Err(WaveError::InvalidRecord(format!(
                "resolution must be finite and non-negative, got [{}, {}]",
                lon_step, lat_step
            )));
        }

        if let Some(p) = self
            .data
            .iter()
            .find(|p| !(p.lat.is_finite() && p.lon.is_finite()))
        {
            return Err(WaveError::InvalidRecord(format!(
                "point has non-finite coordinates: ({}, {})",
                p.lat, p.lon
            )));
        }

        if let Some(p) = self.data.iter().find(|p| !p.value.is_finite()) {
            return Err(WaveError::InvalidRecord(format!(
                "point ({}, {}) has non-finite value {}",
                p.lat, p.lon, p.value
            )));
        }

        Ok(())
    }
}

/// A record as read back from a store, with its generated identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub id: Uuid,
    #[serde(flatten)]
    pub record: GridRecord,
}
