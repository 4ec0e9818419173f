//! GRIB2 decoding through the external `wgrib2` tool.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, instrument};

use wave_common::{Axis, RasterField};

use crate::error::DecodeError;

/// GFS Wave 0.25 degree global grid.
pub const GFS_WAVE_NLAT: usize = 721;
pub const GFS_WAVE_NLON: usize = 1440;

/// A decoded field and the axes it lives on.
#[derive(Debug, Clone)]
pub struct DecodedRaster {
    pub field: RasterField,
    pub lat: Axis,
    pub lon: Axis,
}

/// Turns a GRIB file on disk into one variable's raster.
#[async_trait]
pub trait RasterSource: Send + Sync {
    async fn decode(&self, path: &Path, variable: &str) -> Result<DecodedRaster, DecodeError>;
}

/// Runs `wgrib2 <file> -match :<VAR>: -no_header -text <out>` and reads
/// the dump onto a fixed regular grid.
#[derive(Debug, Clone)]
pub struct Wgrib2Source {
    program: PathBuf,
    nlat: usize,
    nlon: usize,
}

impl Wgrib2Source {
    /// Decoder for the GFS Wave global grid.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self::with_grid(program, GFS_WAVE_NLAT, GFS_WAVE_NLON)
    }

    pub fn with_grid(program: impl Into<PathBuf>, nlat: usize, nlon: usize) -> Self {
        Self {
            program: program.into(),
            nlat,
            nlon,
        }
    }

    pub fn program(&self) -> &Path {
        &self.program
    }

    /// Latitude runs -90 to 90, longitude 0 to 360 minus one step.
    pub fn axes(&self) -> (Axis, Axis) {
        let step = 360.0 / self.nlon as f64;
        (
            Axis::linspace(-90.0, 90.0, self.nlat),
            Axis::linspace(0.0, 360.0 - step, self.nlon),
        )
    }
}

impl Default for Wgrib2Source {
    fn default() -> Self {
        Self::new("wgrib2")
    }
}

#[async_trait]
impl RasterSource for Wgrib2Source {
    #[instrument(skip(self), fields(program = %self.program.display()))]
    async fn decode(&self, path: &Path, variable: &str) -> Result<DecodedRaster, DecodeError> {
        let out = tempfile::Builder::new()
            .prefix("wgrib2-")
            .suffix(".txt")
            .tempfile()?;

        let output = Command::new(&self.program)
            .arg(path)
            .arg("-match")
            .arg(format!(":{}:", variable))
            .arg("-no_header")
            .arg("-text")
            .arg(out.path())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| DecodeError::Invocation {
                program: self.program.clone(),
                message: e.to_string(),
            })?;

        if !output.status.success() {
            return Err(DecodeError::DecoderFailed {
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let text = tokio::fs::read_to_string(out.path()).await?;
        let field = parse_text_dump(&text, variable, self.nlat, self.nlon)?;
        let (lat, lon) = self.axes();

        debug!(nlat = self.nlat, nlon = self.nlon, "Decoded field");

        Ok(DecodedRaster { field, lat, lon })
    }
}

/// Parse whitespace separated values into an `nlat x nlon` row-major field.
///
/// An empty dump means `-match` selected nothing. `nan` and `inf` tokens are
/// rejected since they cannot be stored as JSON numbers.
pub fn parse_text_dump(
    text: &str,
    variable: &str,
    nlat: usize,
    nlon: usize,
) -> Result<RasterField, DecodeError> {
    let expected = nlat * nlon;
    let mut values = Vec::with_capacity(expected);

    for (index, token) in text.split_whitespace().enumerate() {
        let v = token
            .parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| DecodeError::Parse {
                index,
                token: token.to_string(),
            })?;
        values.push(v);
    }

    if values.is_empty() {
        return Err(DecodeError::VariableNotFound(variable.to_string()));
    }

    let actual = values.len();
    RasterField::new(nlat, nlon, values)
        .map_err(|_| DecodeError::ShapeMismatch { expected, actual })
}
