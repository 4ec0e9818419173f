//! GFS Wave ingestion pipeline.
//!
//! Fetches one GRIB2 analysis file per forecast cycle, decodes a single
//! variable, crops it to a fixed bounding box and stores the result as a
//! [`GridRecord`](wave_common::GridRecord).
//!
//! # Architecture
//!
//! Each stage sits behind a trait so tests and deployments can swap it:
//!
//! - [`GribFetcher`]: upstream download (`HttpFetcher` over reqwest)
//! - [`RasterSource`]: GRIB2 decoding (`Wgrib2Source` runs the wgrib2 tool)
//! - [`storage::RecordStore`]: persistence (PostgreSQL or in-memory)
//!
//! [`Pipeline`] wires them together and is what the HTTP service calls.

pub mod assemble;
pub mod decode;
pub mod download;
pub mod error;
pub mod pipeline;
pub mod source;

// Re-exports
pub use assemble::assemble_record;
pub use decode::{parse_text_dump, DecodedRaster, RasterSource, Wgrib2Source};
pub use download::{FetchConfig, GribFetcher, HttpFetcher, BROWSER_USER_AGENT, DEFAULT_MIN_BYTES};
pub use error::{DecodeError, DownloadError, PipelineError, Result};
pub use pipeline::{Pipeline, PipelineConfig, PipelineSummary, DEFAULT_BBOX};
pub use source::{SourceUrl, UrlTemplate, NOMADS_BASE_URL};
