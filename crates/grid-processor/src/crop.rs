//! Bounding box crop of a raster field.

use tracing::debug;
use wave_common::{Axis, BoundingBox, GridPoint, RasterField, Resolution};

use crate::error::{AxisKind, CropError, Result};

/// Points kept by a crop, in source scan order, plus the grid spacing.
#[derive(Debug, Clone, PartialEq)]
pub struct CropResult {
    pub points: Vec<GridPoint>,
    pub resolution: Resolution,
}

/// Crop `field` to `bbox`.
///
/// Every cell is visited in row-major order; a cell is kept when its latitude
/// and longitude both fall inside the closed box. Longitudes are compared in
/// the [0, 360) convention, but points are reported at their native
/// coordinates. The resolution comes from the uncropped axes, so it is
/// returned even when no point matches.
pub fn crop(
    field: &RasterField,
    lat_axis: &Axis,
    lon_axis: &Axis,
    bbox: &BoundingBox,
) -> Result<CropResult> {
    let shape = field.shape();
    check_axis(lat_axis, AxisKind::Latitude, shape)?;
    check_axis(lon_axis, AxisKind::Longitude, shape)?;

    let resolution = resolution(lat_axis, lon_axis)?;

    let (nlat, nlon) = shape;
    let mut points = Vec::new();

    for i in 0..nlat {
        for j in 0..nlon {
            let lat = coord_at(lat_axis, AxisKind::Latitude, nlon, i, j);
            if !bbox.contains_lat(lat) {
                continue;
            }
            let lon = coord_at(lon_axis, AxisKind::Longitude, nlon, i, j);
            if !bbox.contains_lon(lon) {
                continue;
            }
            points.push(GridPoint {
                lat,
                lon,
                value: field.get(i, j),
            });
        }
    }

    debug!(
        nlat,
        nlon,
        points = points.len(),
        lon_step = resolution.lon_step,
        lat_step = resolution.lat_step,
        "Cropped raster"
    );

    Ok(CropResult { points, resolution })
}

/// Derive `[lon_step, lat_step]` from the first two samples of each axis.
///
/// Regular axes use `|a[1] - a[0]|`. Curvilinear longitude uses the first
/// row (`[0][1] - [0][0]`), curvilinear latitude the first column
/// (`[1][0] - [0][0]`).
pub fn resolution(lat_axis: &Axis, lon_axis: &Axis) -> Result<Resolution> {
    let lon_step = match lon_axis {
        Axis::Regular(v) => {
            require_len(v.len(), AxisKind::Longitude)?;
            (v[1] - v[0]).abs()
        }
        Axis::Curvilinear { nlat, nlon, values } => {
            require_len(*nlon, AxisKind::Longitude)?;
            require_rows(*nlat, AxisKind::Longitude)?;
            (values[1] - values[0]).abs()
        }
    };

    let lat_step = match lat_axis {
        Axis::Regular(v) => {
            require_len(v.len(), AxisKind::Latitude)?;
            (v[1] - v[0]).abs()
        }
        Axis::Curvilinear { nlat, nlon, values } => {
            require_len(*nlat, AxisKind::Latitude)?;
            require_rows(*nlon, AxisKind::Latitude)?;
            (values[*nlon] - values[0]).abs()
        }
    };

    Ok(Resolution::new(lon_step, lat_step))
}

fn require_len(len: usize, axis: AxisKind) -> Result<()> {
    if len < 2 {
        return Err(CropError::AxisTooShort { axis, len });
    }
    Ok(())
}

// The cross dimension of a curvilinear axis only needs one sample.
fn require_rows(len: usize, axis: AxisKind) -> Result<()> {
    if len == 0 {
        return Err(CropError::AxisTooShort { axis, len });
    }
    Ok(())
}

/// An axis must be length-N along its own dimension or exactly the field shape.
fn check_axis(axis: &Axis, kind: AxisKind, field: (usize, usize)) -> Result<()> {
    let (nlat, nlon) = field;
    let ok = match axis {
        Axis::Regular(v) => match kind {
            AxisKind::Latitude => v.len() == nlat,
            AxisKind::Longitude => v.len() == nlon,
        },
        Axis::Curvilinear {
            nlat: a,
            nlon: b,
            values,
        } => (*a, *b) == field && values.len() == nlat * nlon,
    };

    if !ok {
        return Err(CropError::AxisShape {
            axis: kind,
            actual: axis.shape(),
            field,
        });
    }

    let along = match kind {
        AxisKind::Latitude => nlat,
        AxisKind::Longitude => nlon,
    };
    require_len(along, kind)
}

#[inline]
fn coord_at(axis: &Axis, kind: AxisKind, nlon: usize, i: usize, j: usize) -> f64 {
    match axis {
        Axis::Regular(v) => match kind {
            AxisKind::Latitude => v[i],
            AxisKind::Longitude => v[j],
        },
        Axis::Curvilinear { values, .. } => values[i * nlon + j],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario() -> (RasterField, Axis, Axis) {
        let field = RasterField::from_fn(4, 4, |i, j| (i * 4 + j) as f64);
        let lats = Axis::Regular(vec![10.0, 20.0, 30.0, 40.0]);
        let lons = Axis::Regular(vec![100.0, 110.0, 120.0, 130.0]);
        (field, lats, lons)
    }

    #[test]
    fn test_four_by_four_scenario() {
        let (field, lats, lons) = scenario();
        let bbox = BoundingBox::new(105.0, 15.0, 125.0, 35.0);

        let result = crop(&field, &lats, &lons, &bbox).unwrap();

        let coords: Vec<(f64, f64)> = result.points.iter().map(|p| (p.lat, p.lon)).collect();
        assert_eq!(
            coords,
            vec![(20.0, 110.0), (20.0, 120.0), (30.0, 110.0), (30.0, 120.0)]
        );
        let values: Vec<f64> = result.points.iter().map(|p| p.value).collect();
        assert_eq!(values, vec![5.0, 6.0, 9.0, 10.0]);
        assert_eq!(result.resolution, Resolution::new(10.0, 10.0));
    }

    #[test]
    fn test_regular_lat_axis_wrong_length() {
        let (field, _, lons) = scenario();
        let lats = Axis::Regular(vec![10.0, 20.0, 30.0]);
        let bbox = BoundingBox::new(0.0, 0.0, 1.0, 1.0);

        let err = crop(&field, &lats, &lons, &bbox).unwrap_err();
        assert!(matches!(
            err,
            CropError::AxisShape {
                axis: AxisKind::Latitude,
                ..
            }
        ));
    }

    #[test]
    fn test_single_column_is_too_short() {
        let field = RasterField::from_fn(3, 1, |i, _| i as f64);
        let lats = Axis::Regular(vec![0.0, 1.0, 2.0]);
        let lons = Axis::Regular(vec![5.0]);
        let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);

        let err = crop(&field, &lats, &lons, &bbox).unwrap_err();
        assert!(matches!(
            err,
            CropError::AxisTooShort {
                axis: AxisKind::Longitude,
                len: 1
            }
        ));
    }
}
