//! Shared test utilities for the GFS Wave cropper workspace.
//!
//! This crate provides common testing infrastructure including:
//! - Synthetic raster/axis generators and wgrib2-style text dumps
//! - Common fixtures (bounding boxes, grid specs, cycle dates)
//! - A local HTTP stub standing in for the upstream archive
//! - Skip macros for optional data, databases and tools
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! test-utils = { path = "../test-utils" }
//! ```

pub mod fixtures;
pub mod generators;
pub mod paths;
pub mod upstream;

pub use generators::*;
pub use paths::*;
pub use upstream::{RecordedRequest, StubResponse, StubUpstream};

/// Skip a test if the required file is not found.
///
/// ```ignore
/// let path = require_test_file!("gfswave.t00z.global.0p25.f000.grib2");
/// ```
#[macro_export]
macro_rules! require_test_file {
    ($name:expr) => {{
        match $crate::find_test_file($name) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: Test file '{}' not found. Download test data or set TEST_DATA_DIR.",
                    $name
                );
                return;
            }
        }
    }};
}

/// Skip a test unless an environment variable is set; evaluates to its value.
///
/// ```ignore
/// let url = require_env!("TEST_DATABASE_URL");
/// ```
#[macro_export]
macro_rules! require_env {
    ($var:expr) => {{
        match std::env::var($var) {
            Ok(value) if !value.is_empty() => value,
            _ => {
                eprintln!("SKIPPED: environment variable '{}' not set.", $var);
                return;
            }
        }
    }};
}

/// Skip a test if an external executable is unavailable; evaluates to its path.
///
/// ```ignore
/// let wgrib2 = require_executable!("wgrib2", "WGRIB2_PATH");
/// ```
#[macro_export]
macro_rules! require_executable {
    ($name:expr, $override_var:expr) => {{
        match $crate::find_executable($name, $override_var) {
            Some(path) => path,
            None => {
                eprintln!(
                    "SKIPPED: executable '{}' not found on PATH or in {}.",
                    $name, $override_var
                );
                return;
            }
        }
    }};
}

/// Approximate floating-point equality assertion.
///
/// ```ignore
/// assert_approx_eq!(1.0001_f64, 1.0_f64, 0.001_f64); // passes
/// ```
#[macro_export]
macro_rules! assert_approx_eq {
    ($left:expr, $right:expr, $epsilon:expr) => {{
        let left: f64 = $left as f64;
        let right: f64 = $right as f64;
        let epsilon: f64 = $epsilon as f64;
        let diff = (left - right).abs();
        if diff > epsilon {
            panic!(
                "assertion failed: `(left ≈ right)`\n  left: `{:?}`,\n right: `{:?}`,\n  diff: `{:?}` > epsilon `{:?}`",
                left, right, diff, epsilon
            );
        }
    }};
}

/// Macro for approximate equality of coordinate pairs.
///
/// # Usage
///
/// ```ignore
/// use test_utils::assert_coords_approx_eq;
///
/// assert_coords_approx_eq!((1.0001, 2.0001), (1.0, 2.0), 0.001);
/// ```
#[macro_export]
macro_rules! assert_coords_approx_eq {
    (($x1:expr, $y1:expr), ($x2:expr, $y2:expr), $epsilon:expr) => {{
        $crate::assert_approx_eq!($x1, $x2, $epsilon);
        $crate::assert_approx_eq!($y1, $y2, $epsilon);
    }};
}
