//! Decoded raster fields and their coordinate axes.

use serde::{Deserialize, Serialize};

use crate::error::{WaveError, WaveResult};

/// A decoded meteorological variable on a 2-D grid.
///
/// Samples are stored row-major: row `i` is a latitude index, column `j` a
/// longitude index.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterField {
    nlat: usize,
    nlon: usize,
    values: Vec<f64>,
}

impl RasterField {
    /// Wrap a flat row-major buffer, checking it holds `nlat * nlon` samples.
    pub fn new(nlat: usize, nlon: usize, values: Vec<f64>) -> WaveResult<Self> {
        let expected = nlat * nlon;
        if values.len() != expected {
            return Err(WaveError::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Self { nlat, nlon, values })
    }

    /// Build a field by evaluating `f(i, j)` for every cell.
    pub fn from_fn(nlat: usize, nlon: usize, mut f: impl FnMut(usize, usize) -> f64) -> Self {
        let mut values = Vec::with_capacity(nlat * nlon);
        for i in 0..nlat {
            for j in 0..nlon {
                values.push(f(i, j));
            }
        }
        Self { nlat, nlon, values }
    }

    /// (nlat, nlon)
    pub fn shape(&self) -> (usize, usize) {
        (self.nlat, self.nlon)
    }

    pub fn nlat(&self) -> usize {
        self.nlat
    }

    pub fn nlon(&self) -> usize {
        self.nlon
    }

    /// Sample at row `i`, column `j`.
    ///
    /// Panics if the indices are outside the field.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        self.values[i * self.nlon + j]
    }

    /// Flat row-major view of all samples.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// A latitude or longitude coordinate axis.
#[derive(Debug, Clone, PartialEq)]
pub enum Axis {
    /// One value per row (latitude) or column (longitude), broadcast across
    /// the other dimension.
    Regular(Vec<f64>),
    /// One value per cell, co-indexed with the field.
    Curvilinear {
        nlat: usize,
        nlon: usize,
        values: Vec<f64>,
    },
}

impl Axis {
    /// Evenly spaced regular axis from `start` to `stop` inclusive.
    pub fn linspace(start: f64, stop: f64, n: usize) -> Self {
        let values = match n {
            0 => Vec::new(),
            1 => vec![start],
            _ => {
                let step = (stop - start) / (n - 1) as f64;
                (0..n).map(|k| start + k as f64 * step).collect()
            }
        };
        Axis::Regular(values)
    }

    /// Curvilinear axis from a flat row-major buffer.
    pub fn curvilinear(nlat: usize, nlon: usize, values: Vec<f64>) -> WaveResult<Self> {
        let expected = nlat * nlon;
        if values.len() != expected {
            return Err(WaveError::ShapeMismatch {
                expected,
                actual: values.len(),
            });
        }
        Ok(Axis::Curvilinear { nlat, nlon, values })
    }

    /// Curvilinear axis built by evaluating `f(i, j)` for every cell.
    pub fn curvilinear_from_fn(
        nlat: usize,
        nlon: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Self {
        let mut values = Vec::with_capacity(nlat * nlon);
        for i in 0..nlat {
            for j in 0..nlon {
                values.push(f(i, j));
            }
        }
        Axis::Curvilinear { nlat, nlon, values }
    }

    /// Shape as a list of dimension lengths: `[n]` or `[nlat, nlon]`.
    pub fn shape(&self) -> Vec<usize> {
        match self {
            Axis::Regular(v) => vec![v.len()],
            Axis::Curvilinear { nlat, nlon, .. } => vec![*nlat, *nlon],
        }
    }
}

/// One sample kept by the crop filter.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub lat: f64,
    pub lon: f64,
    pub value: f64,
}

/// Grid spacing derived from the first two samples of each axis.
///
/// Serialized as `[lon_step, lat_step]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f64; 2]", into = "[f64; 2]")]
pub struct Resolution {
    pub lon_step: f64,
    pub lat_step: f64,
}

impl Resolution {
    pub fn new(lon_step: f64, lat_step: f64) -> Self {
        Self { lon_step, lat_step }
    }

    pub fn to_array(&self) -> [f64; 2] {
        [self.lon_step, self.lat_step]
    }
}

impl From<[f64; 2]> for Resolution {
    fn from(v: [f64; 2]) -> Self {
        Resolution::new(v[0], v[1])
    }
}

impl From<Resolution> for [f64; 2] {
    fn from(r: Resolution) -> Self {
        r.to_array()
    }
}
