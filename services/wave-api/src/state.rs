//! Application state for the wave API.

use std::sync::Arc;

use anyhow::Result;
use metrics_exporter_prometheus::PrometheusHandle;
use tracing::{info, warn};

use ingestion::{HttpFetcher, Pipeline, Wgrib2Source};
use storage::{MemoryRecordStore, PgRecordStore, RecordStore};

use crate::config::ServiceConfig;

/// Shared application state.
pub struct AppState {
    /// Fetch, crop and store pipeline; also owns the record store.
    pub pipeline: Pipeline,

    /// Renders `/metrics`; absent when no recorder is installed.
    pub prometheus: Option<PrometheusHandle>,
}

impl AppState {
    /// Open the store and build the production pipeline.
    pub async fn new(config: &ServiceConfig, prometheus: Option<PrometheusHandle>) -> Result<Self> {
        let store = open_store(config).await?;
        let fetcher = HttpFetcher::new(config.fetch_config())?;
        let source = Wgrib2Source::new(&config.wgrib2_path);

        info!(
            store = store.backend(),
            base_url = %config.base_url,
            template = %config.url_template,
            wgrib2 = %config.wgrib2_path.display(),
            bbox = ?config.bbox.to_array(),
            "Pipeline configured"
        );

        let pipeline = Pipeline::new(
            Arc::new(fetcher),
            Arc::new(source),
            store,
            config.source_url(),
            config.pipeline_config(),
        );

        Ok(Self::from_pipeline(pipeline, prometheus))
    }

    pub fn from_pipeline(pipeline: Pipeline, prometheus: Option<PrometheusHandle>) -> Self {
        Self {
            pipeline,
            prometheus,
        }
    }

    pub fn store(&self) -> &Arc<dyn RecordStore> {
        self.pipeline.store()
    }

    /// Variable name records are stored and queried under.
    pub fn record_variable(&self) -> &str {
        &self.pipeline.config().record_variable
    }
}

/// PostgreSQL when `DATABASE_URL` is set, otherwise an in-memory store.
pub async fn open_store(config: &ServiceConfig) -> Result<Arc<dyn RecordStore>> {
    match &config.database_url {
        Some(url) => {
            let store = PgRecordStore::connect(url, config.write_mode).await?;
            store.migrate().await?;
            Ok(Arc::new(store))
        }
        None => {
            warn!("DATABASE_URL not set, records are kept in memory only");
            Ok(Arc::new(MemoryRecordStore::new(config.write_mode)))
        }
    }
}
