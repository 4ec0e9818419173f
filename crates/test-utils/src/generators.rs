//! Generators for synthetic rasters, axes and upstream payloads.
//!
//! The patterns are predictable so tests can check exactly which cells a
//! crop kept.

use wave_common::{Axis, RasterField};

/// GFS Wave global grid: 721 latitudes x 1440 longitudes.
pub const GFS_WAVE_NLAT: usize = 721;
pub const GFS_WAVE_NLON: usize = 1440;

/// Creates a field where each cell value is `col * 1000 + row`.
///
/// ```
/// use test_utils::create_indexed_field;
///
/// let field = create_indexed_field(5, 10);
/// assert_eq!(field.len(), 50);
/// assert_eq!(field.get(0, 1), 1000.0);
/// assert_eq!(field.get(1, 0), 1.0);
/// ```
pub fn create_indexed_field(nlat: usize, nlon: usize) -> RasterField {
    RasterField::from_fn(nlat, nlon, |row, col| (col * 1000 + row) as f64)
}

/// Creates a wave-direction-like field in degrees [0, 360).
///
/// Direction rotates with longitude and drifts with latitude.
pub fn create_wave_direction_field(nlat: usize, nlon: usize) -> RasterField {
    RasterField::from_fn(nlat, nlon, |row, col| {
        let lon_factor = col as f64 / nlon.max(1) as f64;
        let lat_factor = row as f64 / nlat.max(1) as f64;
        (lon_factor * 360.0 + lat_factor * 45.0) % 360.0
    })
}

/// Regular axis `start, start + step, ...` with `n` samples.
pub fn regular_axis(start: f64, step: f64, n: usize) -> Axis {
    Axis::Regular((0..n).map(|k| start + k as f64 * step).collect())
}

/// The regular axes the wgrib2 text dump is decoded onto.
///
/// Latitude runs south to north, longitude east from 0.
pub fn gfs_wave_axes() -> (Axis, Axis) {
    let step = 360.0 / GFS_WAVE_NLON as f64;
    (
        Axis::linspace(-90.0, 90.0, GFS_WAVE_NLAT),
        Axis::linspace(0.0, 360.0 - step, GFS_WAVE_NLON),
    )
}

/// Curvilinear copies of two regular axes, broadcast to the full field shape.
pub fn broadcast_to_curvilinear(lat: &[f64], lon: &[f64]) -> (Axis, Axis) {
    let (nlat, nlon) = (lat.len(), lon.len());
    (
        Axis::curvilinear_from_fn(nlat, nlon, |i, _| lat[i]),
        Axis::curvilinear_from_fn(nlat, nlon, |_, j| lon[j]),
    )
}

/// Text in the shape `wgrib2 -no_header -text` writes: one value per line,
/// row-major.
pub fn wgrib2_text_dump(field: &RasterField) -> String {
    let mut out = String::with_capacity(field.len() * 8);
    for v in field.values() {
        out.push_str(&v.to_string());
        out.push('\n');
    }
    out
}

/// A body that looks like a GRIB2 message of the given size: "GRIB" header,
/// zero padding, "7777" trailer.
pub fn synthetic_grib_payload(size: usize) -> Vec<u8> {
    let mut body = vec![0u8; size.max(8)];
    body[..4].copy_from_slice(b"GRIB");
    let n = body.len();
    body[n - 4..].copy_from_slice(b"7777");
    body
}
