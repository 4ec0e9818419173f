//! Service configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};

use ingestion::{
    FetchConfig, PipelineConfig, SourceUrl, UrlTemplate, BROWSER_USER_AGENT, DEFAULT_BBOX,
    DEFAULT_MIN_BYTES, NOMADS_BASE_URL,
};
use storage::WriteMode;
use wave_common::BoundingBox;

/// Everything the service needs besides the listen address.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// PostgreSQL URL; records stay in memory when unset
    pub database_url: Option<String>,
    pub write_mode: WriteMode,
    pub base_url: String,
    pub url_template: UrlTemplate,
    pub download_timeout: Duration,
    pub min_download_bytes: u64,
    pub wgrib2_path: PathBuf,
    pub grib_variable: String,
    pub record_variable: String,
    pub bbox: BoundingBox,
    pub work_dir: Option<PathBuf>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            database_url: None,
            write_mode: WriteMode::Append,
            base_url: NOMADS_BASE_URL.to_string(),
            url_template: UrlTemplate::Archive,
            download_timeout: Duration::from_secs(300),
            min_download_bytes: DEFAULT_MIN_BYTES,
            wgrib2_path: PathBuf::from("wgrib2"),
            grib_variable: "WVDIR".to_string(),
            record_variable: "windDirection".to_string(),
            bbox: BoundingBox::from(DEFAULT_BBOX),
            work_dir: None,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Self::default();

        let write_mode = match get("STORE_WRITE_MODE") {
            Some(v) => v
                .parse::<WriteMode>()
                .map_err(|e| anyhow!("STORE_WRITE_MODE: {}", e))?,
            None => defaults.write_mode,
        };

        let url_template = match get("GFS_URL_TEMPLATE") {
            Some(v) => v
                .parse::<UrlTemplate>()
                .map_err(|e| anyhow!("GFS_URL_TEMPLATE: {}", e))?,
            None => defaults.url_template,
        };

        let download_timeout = match get("DOWNLOAD_TIMEOUT_SECS") {
            Some(v) => Duration::from_secs(
                v.parse()
                    .with_context(|| format!("DOWNLOAD_TIMEOUT_SECS is not a number: {}", v))?,
            ),
            None => defaults.download_timeout,
        };

        let min_download_bytes = match get("MIN_DOWNLOAD_BYTES") {
            Some(v) => v
                .parse()
                .with_context(|| format!("MIN_DOWNLOAD_BYTES is not a number: {}", v))?,
            None => defaults.min_download_bytes,
        };

        let bbox = match get("CROP_BBOX") {
            Some(v) => {
                let bbox = BoundingBox::from_csv_string(&v)
                    .with_context(|| format!("CROP_BBOX must be minlon,minlat,maxlon,maxlat: {}", v))?;
                bbox.validate().context("CROP_BBOX")?;
                bbox
            }
            None => defaults.bbox,
        };

        Ok(Self {
            database_url: get("DATABASE_URL"),
            write_mode,
            base_url: get("GFS_BASE_URL").unwrap_or(defaults.base_url),
            url_template,
            download_timeout,
            min_download_bytes,
            wgrib2_path: get("WGRIB2_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.wgrib2_path),
            grib_variable: get("GRIB_VARIABLE").unwrap_or(defaults.grib_variable),
            record_variable: get("RECORD_VARIABLE").unwrap_or(defaults.record_variable),
            bbox,
            work_dir: get("WORK_DIR").map(PathBuf::from),
        })
    }

    pub fn source_url(&self) -> SourceUrl {
        SourceUrl::new(&self.base_url, self.url_template, &self.grib_variable)
    }

    pub fn fetch_config(&self) -> FetchConfig {
        FetchConfig {
            timeout: self.download_timeout,
            min_bytes: self.min_download_bytes,
            user_agent: BROWSER_USER_AGENT.to_string(),
            ..FetchConfig::default()
        }
    }

    pub fn pipeline_config(&self) -> PipelineConfig {
        PipelineConfig {
            bbox: self.bbox,
            grib_variable: self.grib_variable.clone(),
            record_variable: self.record_variable.clone(),
            work_dir: self.work_dir.clone(),
        }
    }
}
