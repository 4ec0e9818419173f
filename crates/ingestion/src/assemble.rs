//! Turning crop output into a storable record.

use grid_processor::CropResult;
use wave_common::{BoundingBox, ForecastCycle, GridRecord};

/// Build the record for one cycle's cropped points.
///
/// Points keep the order the crop produced them in. No validation happens
/// here; stores call [`GridRecord::validate`] before persisting.
pub fn assemble_record(
    cropped: CropResult,
    cycle: &ForecastCycle,
    variable: &str,
    bbox: BoundingBox,
) -> GridRecord {
    GridRecord {
        timestamp: cycle.timestamp(),
        variable: variable.to_string(),
        bbox,
        resolution: cropped.resolution,
        data: cropped.points,
    }
}
