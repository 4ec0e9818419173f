//! Integration tests for bounding box cropping.

use grid_processor::{crop, resolution, CropError};
use test_utils::fixtures;
use test_utils::{
    assert_approx_eq, broadcast_to_curvilinear, create_indexed_field, create_wave_direction_field,
    gfs_wave_axes, regular_axis,
};
use wave_common::{Axis, BoundingBox, RasterField, Resolution};

fn bbox_of(t: (f64, f64, f64, f64)) -> BoundingBox {
    BoundingBox::new(t.0, t.1, t.2, t.3)
}

// ============================================================================
// Containment and ordering
// ============================================================================

#[test]
fn test_every_point_inside_bbox() {
    let field = create_wave_direction_field(37, 72);
    let lat = regular_axis(-90.0, 5.0, 37);
    let lon = regular_axis(0.0, 5.0, 72);
    let bbox = BoundingBox::new(42.5, -33.0, 118.0, 12.5);

    let result = crop(&field, &lat, &lon, &bbox).unwrap();

    assert!(!result.points.is_empty());
    assert!(result.points.len() <= field.len());
    for p in &result.points {
        assert!(p.lat >= bbox.min_lat && p.lat <= bbox.max_lat, "lat {}", p.lat);
        assert!(p.lon >= bbox.min_lon && p.lon <= bbox.max_lon, "lon {}", p.lon);
    }
}

#[test]
fn test_points_follow_row_major_scan_order() {
    let field = create_indexed_field(6, 6);
    let lat = regular_axis(0.0, 1.0, 6);
    let lon = regular_axis(0.0, 1.0, 6);
    let bbox = BoundingBox::new(1.0, 1.0, 3.0, 4.0);

    let result = crop(&field, &lat, &lon, &bbox).unwrap();

    let coords: Vec<(f64, f64)> = result.points.iter().map(|p| (p.lat, p.lon)).collect();
    let mut expected = Vec::new();
    for lat in 1..=4 {
        for lon in 1..=3 {
            expected.push((lat as f64, lon as f64));
        }
    }
    assert_eq!(coords, expected);

    // col * 1000 + row
    assert_eq!(result.points[0].value, 1001.0);
    assert_eq!(result.points.last().unwrap().value, 3004.0);
}

#[test]
fn test_boundary_points_are_included() {
    let field = create_indexed_field(5, 5);
    let lat = regular_axis(0.0, 10.0, 5);
    let lon = regular_axis(100.0, 10.0, 5);
    // Edges sit exactly on grid lines
    let bbox = BoundingBox::new(110.0, 10.0, 130.0, 30.0);

    let result = crop(&field, &lat, &lon, &bbox).unwrap();

    assert_eq!(result.points.len(), 9);
    let lats: Vec<f64> = result.points.iter().map(|p| p.lat).collect();
    let lons: Vec<f64> = result.points.iter().map(|p| p.lon).collect();
    assert!(lats.contains(&10.0) && lats.contains(&30.0));
    assert!(lons.contains(&110.0) && lons.contains(&130.0));
}

#[test]
fn test_scan_is_not_deduplicated() {
    // Repeated coordinates are all reported
    let field = RasterField::from_fn(2, 3, |i, j| (i * 3 + j) as f64);
    let lat = Axis::Regular(vec![5.0, 5.0]);
    let lon = Axis::Regular(vec![1.0, 1.0, 2.0]);
    let bbox = BoundingBox::new(0.0, 0.0, 10.0, 10.0);

    let result = crop(&field, &lat, &lon, &bbox).unwrap();
    assert_eq!(result.points.len(), 6);
    assert_eq!(result.resolution, Resolution::new(0.0, 0.0));
}

// ============================================================================
// Empty intersection
// ============================================================================

#[test]
fn test_empty_intersection_still_has_resolution() {
    let field = create_indexed_field(4, 4);
    let lat = Axis::Regular(vec![10.0, 20.0, 30.0, 40.0]);
    let lon = Axis::Regular(vec![100.0, 110.0, 120.0, 130.0]);

    let result = crop(&field, &lat, &lon, &bbox_of(fixtures::bbox::OFF_PLANET)).unwrap();

    assert!(result.points.is_empty());
    assert_eq!(result.resolution, Resolution::new(10.0, 10.0));
}

// ============================================================================
// Resolution
// ============================================================================

#[test]
fn test_resolution_quarter_degree() {
    let lat = regular_axis(0.0, 0.25, 8);
    let lon = regular_axis(0.0, 0.25, 8);
    let res = resolution(&lat, &lon).unwrap();
    assert_eq!(res.to_array(), [0.25, 0.25]);
}

#[test]
fn test_resolution_descending_axis_is_positive() {
    // North-to-south latitude ordering
    let lat = regular_axis(90.0, -0.5, 5);
    let lon = regular_axis(0.0, 1.0, 5);
    let res = resolution(&lat, &lon).unwrap();
    assert_eq!(res, Resolution::new(1.0, 0.5));
}

#[test]
fn test_resolution_curvilinear_matches_regular() {
    let lat_values = vec![-10.0, -9.5, -9.0, -8.5];
    let lon_values = vec![200.0, 200.25, 200.5];
    let (lat_c, lon_c) = broadcast_to_curvilinear(&lat_values, &lon_values);

    let curvi = resolution(&lat_c, &lon_c).unwrap();
    let regular = resolution(&Axis::Regular(lat_values), &Axis::Regular(lon_values)).unwrap();

    assert_eq!(curvi, regular);
    assert_eq!(curvi, Resolution::new(0.25, 0.5));
}

#[test]
fn test_resolution_curvilinear_uses_first_row_and_column() {
    // Spacing changes further into the grid; only the first pair counts
    let lat = Axis::curvilinear_from_fn(3, 3, |i, j| (i * i) as f64 * 2.0 + j as f64 * 0.1);
    let lon = Axis::curvilinear_from_fn(3, 3, |i, j| (j * j) as f64 * 3.0 + i as f64 * 0.1);

    let res = resolution(&lat, &lon).unwrap();
    assert_approx_eq!(res.lon_step, 3.0, 1e-12);
    assert_approx_eq!(res.lat_step, 2.0, 1e-12);
}

// ============================================================================
// Curvilinear axes
// ============================================================================

#[test]
fn test_curvilinear_crop_matches_regular_crop() {
    let field = create_wave_direction_field(10, 12);
    let lat_values: Vec<f64> = (0..10).map(|k| 30.0 + k as f64).collect();
    let lon_values: Vec<f64> = (0..12).map(|k| 120.0 + k as f64 * 0.5).collect();
    let (lat_c, lon_c) = broadcast_to_curvilinear(&lat_values, &lon_values);
    let bbox = BoundingBox::new(121.0, 32.0, 123.5, 36.0);

    let regular = crop(
        &field,
        &Axis::Regular(lat_values),
        &Axis::Regular(lon_values),
        &bbox,
    )
    .unwrap();
    let curvi = crop(&field, &lat_c, &lon_c, &bbox).unwrap();

    assert_eq!(regular, curvi);
    assert_eq!(regular.points.len(), 5 * 6);
}

#[test]
fn test_mixed_regular_lat_curvilinear_lon() {
    let field = create_indexed_field(3, 4);
    let lat = Axis::Regular(vec![0.0, 1.0, 2.0]);
    // Each row shifted east by one degree
    let lon = Axis::curvilinear_from_fn(3, 4, |i, j| 10.0 + j as f64 + i as f64);
    let bbox = BoundingBox::new(12.0, 0.0, 12.0 + 1e-9, 2.0);

    let result = crop(&field, &lat, &lon, &bbox).unwrap();

    let cells: Vec<(f64, f64)> = result.points.iter().map(|p| (p.lat, p.lon)).collect();
    assert_eq!(cells, vec![(0.0, 12.0), (1.0, 12.0), (2.0, 12.0)]);
}

// ============================================================================
// Longitude convention
// ============================================================================

#[test]
fn test_signed_bbox_on_0_360_grid_reports_native_lon() {
    let field = create_indexed_field(3, 360);
    let lat = regular_axis(-1.0, 1.0, 3);
    let lon = regular_axis(0.0, 1.0, 360);
    let bbox = BoundingBox::new(-2.0, -1.0, 2.0, 1.0);

    let result = crop(&field, &lat, &lon, &bbox).unwrap();

    let row: Vec<f64> = result
        .points
        .iter()
        .filter(|p| p.lat == 0.0)
        .map(|p| p.lon)
        .collect();
    assert_eq!(row, vec![0.0, 1.0, 2.0, 358.0, 359.0]);
    assert_eq!(result.points.len(), 15);
}

#[test]
fn test_prime_meridian_bbox_keeps_both_sides() {
    let field = create_wave_direction_field(21, 360);
    let lat = regular_axis(-10.0, 1.0, 21);
    let lon = regular_axis(0.0, 1.0, 360);

    let result = crop(&field, &lat, &lon, &bbox_of(fixtures::bbox::GULF_OF_GUINEA)).unwrap();

    // 11 latitudes x (0..=5 and 355..=359)
    assert_eq!(result.points.len(), 11 * 11);
    for p in &result.points {
        assert!(p.lat >= -5.0 && p.lat <= 5.0, "lat {}", p.lat);
        assert!(p.lon <= 5.0 || p.lon >= 355.0, "lon {}", p.lon);
    }
}

// ============================================================================
// Full GFS Wave grid
// ============================================================================

#[test]
fn test_gfs_wave_grid_busan_coast() {
    let field = create_wave_direction_field(721, 1440);
    let (lat, lon) = gfs_wave_axes();

    let result = crop(&field, &lat, &lon, &bbox_of(fixtures::bbox::BUSAN_COAST)).unwrap();

    // 34.5..35.75 and 128.5..129.75 at 0.25 degrees
    assert_eq!(result.points.len(), 36);
    assert_eq!(result.resolution, Resolution::new(0.25, 0.25));
    let first = result.points[0];
    assert_approx_eq!(first.lat, 34.5, 1e-9);
    assert_approx_eq!(first.lon, 128.5, 1e-9);
}

#[test]
fn test_gfs_wave_grid_global_bbox_keeps_everything() {
    let field = create_indexed_field(721, 1440);
    let (lat, lon) = gfs_wave_axes();

    let result = crop(&field, &lat, &lon, &bbox_of(fixtures::bbox::GLOBAL_0_360)).unwrap();

    let spec = fixtures::grid::GFS_WAVE_GLOBAL;
    assert_eq!(result.points.len(), spec.size());
    let (dx, dy) = spec.resolution();
    assert_approx_eq!(result.resolution.lon_step, dx, 1e-9);
    assert_approx_eq!(result.resolution.lat_step, dy, 1e-9);

    let last = result.points.last().unwrap();
    assert_approx_eq!(last.lat, spec.max_lat, 1e-9);
    assert_approx_eq!(last.lon, spec.max_lon, 1e-9);
}

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn test_curvilinear_axis_wrong_shape() {
    let field = create_indexed_field(3, 4);
    let lat = Axis::curvilinear_from_fn(4, 3, |i, _| i as f64);
    let lon = Axis::Regular(vec![0.0, 1.0, 2.0, 3.0]);
    let bbox = BoundingBox::new(0.0, 0.0, 5.0, 5.0);

    let err = crop(&field, &lat, &lon, &bbox).unwrap_err();
    assert!(matches!(err, CropError::AxisShape { .. }));
}

#[test]
fn test_single_row_field_is_too_short() {
    let field = create_indexed_field(1, 4);
    let lat = Axis::Regular(vec![0.0]);
    let lon = Axis::Regular(vec![0.0, 1.0, 2.0, 3.0]);
    let bbox = BoundingBox::new(0.0, -1.0, 5.0, 1.0);

    let err = crop(&field, &lat, &lon, &bbox).unwrap_err();
    assert!(matches!(err, CropError::AxisTooShort { len: 1, .. }));
    assert!(err.to_string().contains("latitude"));
}
