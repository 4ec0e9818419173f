//! HTTP handlers.

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension, Query},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{error, info};

use ingestion::{PipelineError, PipelineSummary};
use storage::{RecordQuery, StoreError};
use wave_common::{day_range, StoredRecord, WaveError};

use crate::state::AppState;

/// Request body for the trigger endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct TriggerRequest {
    /// `YYYYMMDD`
    pub date: String,
    /// `00`, `06`, `12` or `18`
    pub hour: String,
}

/// Query parameters for the read endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct WindDirectionParams {
    /// `YYYY-MM-DD`
    pub date: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub store: String,
}

/// Error rendered as `{ "error": message }`.
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

impl From<PipelineError> for ApiError {
    fn from(e: PipelineError) -> Self {
        Self {
            status: StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: e.to_string(),
        }
    }
}

impl From<WaveError> for ApiError {
    fn from(e: WaveError) -> Self {
        Self {
            status: StatusCode::from_u16(e.http_status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
            message: e.to_string(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(e: StoreError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: e.to_string(),
        }
    }
}

/// POST /api/gfs/wind-auto - Fetch, crop and store one forecast cycle
pub async fn wind_auto_handler(
    Extension(state): Extension<Arc<AppState>>,
    body: Result<Json<TriggerRequest>, JsonRejection>,
) -> Result<Json<PipelineSummary>, ApiError> {
    let Json(request) = body.map_err(|e| ApiError::bad_request(e.body_text()))?;

    info!(date = %request.date, hour = %request.hour, "Received trigger request");

    let summary = state
        .pipeline
        .run(&request.date, &request.hour)
        .await?;

    Ok(Json(summary))
}

/// GET /api/gfs/wind-direction - Stored records, optionally for one day
pub async fn wind_direction_handler(
    Extension(state): Extension<Arc<AppState>>,
    Query(params): Query<WindDirectionParams>,
) -> Result<Json<Vec<StoredRecord>>, ApiError> {
    let mut query = RecordQuery::variable(state.record_variable());

    if let Some(date) = params.date.as_deref() {
        let (start, end) = day_range(date)?;
        query = query.between(start, end);
    }

    let records = state.store().query(&query).await.map_err(|e| {
        error!(error = %e, "Record query failed");
        ApiError::from(e)
    })?;

    Ok(Json(records))
}

/// GET /health - Health check
pub async fn health_handler(Extension(state): Extension<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: "wave-api".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store().backend().to_string(),
    })
}

/// GET /metrics - Prometheus metrics
pub async fn metrics_handler(Extension(state): Extension<Arc<AppState>>) -> impl IntoResponse {
    let body = state
        .prometheus
        .as_ref()
        .map(|handle| handle.render())
        .unwrap_or_default();

    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        body,
    )
}
