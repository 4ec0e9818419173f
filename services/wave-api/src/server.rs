//! Router construction and serving.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    routing::{get, post},
    Extension, Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

use crate::handlers;
use crate::state::AppState;

/// Build the HTTP router.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/gfs/wind-auto", post(handlers::wind_auto_handler))
        .route(
            "/api/gfs/wind-direction",
            get(handlers::wind_direction_handler),
        )
        .route("/health", get(handlers::health_handler))
        .route("/metrics", get(handlers::metrics_handler))
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Serve until `shutdown` resolves, then let in-flight requests finish.
pub async fn serve<F>(state: Arc<AppState>, addr: SocketAddr, shutdown: F) -> anyhow::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Wave API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;

    Ok(())
}
