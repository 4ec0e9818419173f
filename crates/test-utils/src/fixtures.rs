//! Common test fixtures for the GFS Wave cropper.

/// Bounding boxes as (min_lon, min_lat, max_lon, max_lat).
pub mod bbox {
    /// Coastal box off Busan, the default deployment crop
    pub const BUSAN_COAST: (f64, f64, f64, f64) = (128.3, 34.35, 129.8, 35.85);

    /// Whole globe in the [0, 360) convention
    pub const GLOBAL_0_360: (f64, f64, f64, f64) = (0.0, -90.0, 360.0, 90.0);

    /// Gulf of Guinea, straddles the prime meridian
    pub const GULF_OF_GUINEA: (f64, f64, f64, f64) = (-5.0, -5.0, 5.0, 5.0);

    /// Entirely outside any latitude axis
    pub const OFF_PLANET: (f64, f64, f64, f64) = (10.0, 95.0, 20.0, 100.0);

    /// Invalid bbox (min > max)
    pub const INVALID: (f64, f64, f64, f64) = (10.0, 10.0, 5.0, 5.0);
}

/// Grid specifications.
pub mod grid {
    /// GFS Wave global grid (0.25 degree resolution)
    pub const GFS_WAVE_GLOBAL: GridSpec = GridSpec {
        nlon: 1440,
        nlat: 721,
        min_lon: 0.0,
        max_lon: 359.75,
        min_lat: -90.0,
        max_lat: 90.0,
    };

    #[derive(Debug, Clone, Copy)]
    pub struct GridSpec {
        pub nlon: usize,
        pub nlat: usize,
        pub min_lon: f64,
        pub max_lon: f64,
        pub min_lat: f64,
        pub max_lat: f64,
    }

    impl GridSpec {
        pub fn size(&self) -> usize {
            self.nlon * self.nlat
        }

        /// (lon_step, lat_step) for an inclusive-endpoint grid.
        pub fn resolution(&self) -> (f64, f64) {
            let dx = (self.max_lon - self.min_lon) / (self.nlon - 1) as f64;
            let dy = (self.max_lat - self.min_lat) / (self.nlat - 1) as f64;
            (dx, dy)
        }
    }
}

/// Forecast cycle values.
pub mod time {
    /// Trigger date in request form
    pub const REQUEST_DATE: &str = "20250617";

    /// Same day in query form
    pub const QUERY_DATE: &str = "2025-06-17";
}

/// Variable names on both sides of the decoder.
pub mod variables {
    /// Primary wave direction, as named in GRIB2
    pub const WVDIR: &str = "WVDIR";

    /// Stored record name for WVDIR
    pub const WIND_DIRECTION: &str = "windDirection";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_gfs_wave_grid_size() {
        assert_eq!(grid::GFS_WAVE_GLOBAL.size(), 1440 * 721);
    }

    #[test]
    fn test_gfs_wave_resolution() {
        let (dx, dy) = grid::GFS_WAVE_GLOBAL.resolution();
        assert!((dx - 0.25).abs() < 1e-9);
        assert!((dy - 0.25).abs() < 1e-9);
    }
}
