//! Bounding box types and operations.

use serde::{Deserialize, Serialize};

use crate::error::{WaveError, WaveResult};

/// A geographic bounding box in degrees.
///
/// Serialized as `[min_lon, min_lat, max_lon, max_lat]`, the layout stored in
/// every grid record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 4]", into = "[f64; 4]")]
pub struct BoundingBox {
    pub min_lon: f64,
    pub min_lat: f64,
    pub max_lon: f64,
    pub max_lat: f64,
}

/// Map any longitude onto the canonical [0, 360) range.
pub fn normalize_lon(lon: f64) -> f64 {
    let wrapped = lon.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

impl BoundingBox {
    /// Create a new bounding box from corner coordinates.
    pub fn new(min_lon: f64, min_lat: f64, max_lon: f64, max_lat: f64) -> Self {
        Self {
            min_lon,
            min_lat,
            max_lon,
            max_lat,
        }
    }

    /// Parse a comma separated string: "minlon,minlat,maxlon,maxlat".
    pub fn from_csv_string(s: &str) -> Result<Self, BboxParseError> {
        let parts: Vec<&str> = s.split(',').map(str::trim).collect();
        if parts.len() != 4 {
            return Err(BboxParseError::InvalidFormat(s.to_string()));
        }

        let parse = |p: &str| {
            p.parse::<f64>()
                .map_err(|_| BboxParseError::InvalidNumber(p.to_string()))
        };

        Ok(Self {
            min_lon: parse(parts[0])?,
            min_lat: parse(parts[1])?,
            max_lon: parse(parts[2])?,
            max_lat: parse(parts[3])?,
        })
    }

    /// Check that every edge is finite and that min < max on both axes.
    pub fn validate(&self) -> WaveResult<()> {
        let edges = [self.min_lon, self.min_lat, self.max_lon, self.max_lat];
        if edges.iter().any(|v| !v.is_finite()) {
            return Err(WaveError::InvalidBbox(format!(
                "non-finite edge in {:?}",
                edges
            )));
        }
        if self.min_lon >= self.max_lon {
            return Err(WaveError::InvalidBbox(format!(
                "min_lon {} must be less than max_lon {}",
                self.min_lon, self.max_lon
            )));
        }
        if self.min_lat >= self.max_lat {
            return Err(WaveError::InvalidBbox(format!(
                "min_lat {} must be less than max_lat {}",
                self.min_lat, self.max_lat
            )));
        }
        Ok(())
    }

    /// Width of the bounding box in degrees of longitude.
    pub fn width(&self) -> f64 {
        self.max_lon - self.min_lon
    }

    /// Height of the bounding box in degrees of latitude.
    pub fn height(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    /// Inclusive latitude test.
    pub fn contains_lat(&self, lat: f64) -> bool {
        lat >= self.min_lat && lat <= self.max_lat
    }

    /// Inclusive longitude test in the canonical [0, 360) convention.
    ///
    /// Both the tested longitude and the box edges are normalised first, so a
    /// box given as `[-10, ..., 10, ...]` matches grid longitudes 350..360 and
    /// 0..10 alike.
    pub fn contains_lon(&self, lon: f64) -> bool {
        if self.width() >= 360.0 {
            return true;
        }

        let lon = normalize_lon(lon);
        let west = normalize_lon(self.min_lon);
        let east = normalize_lon(self.max_lon);

        if west <= east {
            lon >= west && lon <= east
        } else {
            // Span crosses the prime meridian after normalisation
            lon >= west || lon <= east
        }
    }

    /// Check if a point is contained within this bbox (edges included).
    pub fn contains_point(&self, lon: f64, lat: f64) -> bool {
        self.contains_lat(lat) && self.contains_lon(lon)
    }

    /// The record layout `[min_lon, min_lat, max_lon, max_lat]`.
    pub fn to_array(&self) -> [f64; 4] {
        [self.min_lon, self.min_lat, self.max_lon, self.max_lat]
    }
}

impl From<[f64; 4]> for BoundingBox {
    fn from(v: [f64; 4]) -> Self {
        BoundingBox::new(v[0], v[1], v[2], v[3])
    }
}

impl From<BoundingBox> for [f64; 4] {
    fn from(b: BoundingBox) -> Self {
        b.to_array()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BboxParseError {
    #[error("Invalid bbox format: {0}. Expected 'minlon,minlat,maxlon,maxlat'")]
    InvalidFormat(String),

    #[error("Invalid number in bbox: {0}")]
    InvalidNumber(String),
}
