//! Grid cropping for decoded wave forecasts.
//!
//! Turns a dense raster (a field plus its latitude/longitude axes) into the
//! sparse list of points that fall inside a bounding box, together with the
//! grid resolution read off the axes.
//!
//! ```text
//! RasterField (nlat x nlon) + lat Axis + lon Axis + BoundingBox
//!      │
//!      ▼
//! crop()  ── full row-major scan, inclusive bbox test
//!      │
//!      ▼
//! CropResult { points: Vec<GridPoint>, resolution: [lon_step, lat_step] }
//! ```
//!
//! # Example
//!
//! ```
//! use grid_processor::crop;
//! use wave_common::{Axis, BoundingBox, RasterField};
//!
//! let field = RasterField::from_fn(4, 4, |i, j| (i * 4 + j) as f64);
//! let lats = Axis::Regular(vec![10.0, 20.0, 30.0, 40.0]);
//! let lons = Axis::Regular(vec![100.0, 110.0, 120.0, 130.0]);
//! let bbox = BoundingBox::new(105.0, 15.0, 125.0, 35.0);
//!
//! let result = crop(&field, &lats, &lons, &bbox).unwrap();
//! assert_eq!(result.points.len(), 4);
//! assert_eq!(result.resolution.to_array(), [10.0, 10.0]);
//! ```

pub mod crop;
pub mod error;

pub use crop::{crop, resolution, CropResult};
pub use error::{CropError, Result};
