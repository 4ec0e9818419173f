//! One fetch, decode, crop and store run per trigger.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;
use tracing::{error, info, instrument};

use storage::RecordStore;
use wave_common::{BoundingBox, ForecastCycle, Resolution};

use crate::assemble::assemble_record;
use crate::decode::RasterSource;
use crate::download::GribFetcher;
use crate::error::{DownloadError, PipelineError, Result};
use crate::source::SourceUrl;

/// Coastal box off Busan.
pub const DEFAULT_BBOX: [f64; 4] = [128.3, 34.35, 129.8, 35.85];

/// What a run extracts and where it keeps scratch files.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    pub bbox: BoundingBox,
    /// Variable matched in the GRIB file
    pub grib_variable: String,
    /// Variable name records are stored and queried under
    pub record_variable: String,
    /// Parent for per-run scratch directories; system temp dir when unset
    pub work_dir: Option<PathBuf>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            bbox: BoundingBox::from(DEFAULT_BBOX),
            grib_variable: "WVDIR".to_string(),
            record_variable: "windDirection".to_string(),
            work_dir: None,
        }
    }
}

/// Result of a successful run, returned to the trigger caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineSummary {
    pub message: String,
    /// Number of cropped points stored
    #[serde(alias = "data_count")]
    pub point_count: usize,
    pub resolution: Resolution,
    pub source_url: String,
}

/// Fetch, decode, crop and store for one forecast cycle.
///
/// Stages run strictly in order and the first failure ends the run, so a
/// record is stored only when every earlier stage succeeded.
pub struct Pipeline {
    fetcher: Arc<dyn GribFetcher>,
    source: Arc<dyn RasterSource>,
    store: Arc<dyn RecordStore>,
    urls: SourceUrl,
    config: PipelineConfig,
}

impl Pipeline {
    pub fn new(
        fetcher: Arc<dyn GribFetcher>,
        source: Arc<dyn RasterSource>,
        store: Arc<dyn RecordStore>,
        urls: SourceUrl,
        config: PipelineConfig,
    ) -> Self {
        Self {
            fetcher,
            source,
            store,
            urls,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn urls(&self) -> &SourceUrl {
        &self.urls
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        &self.store
    }

    /// Run the pipeline for `date` (`YYYYMMDD`) and `hour` (`00|06|12|18`).
    #[instrument(skip(self), fields(variable = %self.config.grib_variable))]
    pub async fn run(&self, date: &str, hour: &str) -> Result<PipelineSummary> {
        let start = Instant::now();
        counter!("pipeline_runs_total").increment(1);

        let result = self.execute(date, hour).await;

        histogram!("pipeline_duration_seconds").record(start.elapsed().as_secs_f64());

        match &result {
            Ok(summary) => {
                counter!("pipeline_points_total").increment(summary.point_count as u64);
                info!(
                    points = summary.point_count,
                    resolution = ?summary.resolution.to_array(),
                    elapsed_ms = start.elapsed().as_millis() as u64,
                    "Pipeline run completed"
                );
            }
            Err(e) => {
                counter!("pipeline_failures_total", "stage" => e.stage()).increment(1);
                error!(stage = e.stage(), error = %e, "Pipeline run failed");
            }
        }

        result
    }

    async fn execute(&self, date: &str, hour: &str) -> Result<PipelineSummary> {
        let cycle = ForecastCycle::parse(date, hour)?;
        let url = self.urls.url_for(&cycle);

        // Removed on drop, on every exit path
        let scratch = self.scratch_dir().await?;
        let grib_path = scratch.path().join(SourceUrl::file_name(&cycle));

        self.fetcher.fetch(&url, &grib_path).await?;

        let raster = self
            .source
            .decode(&grib_path, &self.config.grib_variable)
            .await?;

        let bbox = self.config.bbox;
        let cropped = tokio::task::spawn_blocking(move || {
            grid_processor::crop(&raster.field, &raster.lat, &raster.lon, &bbox)
        })
        .await
        .map_err(|e| PipelineError::Task(e.to_string()))??;

        let resolution = cropped.resolution;
        let record = assemble_record(cropped, &cycle, &self.config.record_variable, bbox);
        let point_count = record.data.len();

        let id = self.store.insert(&record).await?;
        info!(id = %id, timestamp = %record.timestamp, points = point_count, "Record stored");

        Ok(PipelineSummary {
            message: format!(
                "{} data for {} saved successfully",
                self.config.record_variable, record.timestamp
            ),
            point_count,
            resolution,
            source_url: url,
        })
    }

    async fn scratch_dir(&self) -> Result<TempDir> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("gfswave-");

        let dir = match &self.config.work_dir {
            Some(parent) => {
                tokio::fs::create_dir_all(parent)
                    .await
                    .map_err(DownloadError::Io)?;
                builder.tempdir_in(parent)
            }
            None => builder.tempdir(),
        };

        Ok(dir.map_err(DownloadError::Io)?)
    }
}
