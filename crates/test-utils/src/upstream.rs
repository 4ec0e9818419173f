//! Local HTTP server standing in for the NOMADS archive.
//!
//! ```ignore
//! let stub = StubUpstream::start().await;
//! stub.respond("/file.grib2", StubResponse::ok(synthetic_grib_payload(20_000)));
//! let url = stub.url("/file.grib2");
//! ```

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode, Uri},
    response::IntoResponse,
    Router,
};

/// Canned response for one path.
#[derive(Debug, Clone)]
pub struct StubResponse {
    pub status: u16,
    pub body: Vec<u8>,
    pub delay: Option<Duration>,
}

impl StubResponse {
    pub fn ok(body: Vec<u8>) -> Self {
        Self {
            status: 200,
            body,
            delay: None,
        }
    }

    pub fn status(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.as_bytes().to_vec(),
            delay: None,
        }
    }

    /// Hold the response back for `delay` before answering.
    pub fn delayed(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }
}

/// A request the stub received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub path_and_query: String,
    pub user_agent: Option<String>,
}

#[derive(Default)]
struct StubState {
    routes: Mutex<HashMap<String, StubResponse>>,
    requests: Mutex<Vec<RecordedRequest>>,
}

/// Running stub server; stops when the test runtime shuts down.
pub struct StubUpstream {
    addr: SocketAddr,
    state: Arc<StubState>,
}

impl StubUpstream {
    /// Bind to an ephemeral localhost port and start serving.
    pub async fn start() -> Self {
        let state = Arc::new(StubState::default());
        let app = Router::new()
            .fallback(handle)
            .with_state(state.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind stub upstream");
        let addr = listener.local_addr().expect("Stub upstream has no address");

        tokio::spawn(async move {
            axum::serve(listener, app).await.ok();
        });

        Self { addr, state }
    }

    /// `http://127.0.0.1:<port>`
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url(), path)
    }

    /// Register a response for an exact request path (query ignored).
    pub fn respond(&self, path: &str, response: StubResponse) {
        self.state
            .routes
            .lock()
            .expect("stub routes poisoned")
            .insert(path.to_string(), response);
    }

    /// Every request received so far, in arrival order.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state
            .requests
            .lock()
            .expect("stub requests poisoned")
            .clone()
    }
}

async fn handle(
    State(state): State<Arc<StubState>>,
    uri: Uri,
    headers: HeaderMap,
) -> impl IntoResponse {
    let user_agent = headers
        .get(header::USER_AGENT)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    state
        .requests
        .lock()
        .expect("stub requests poisoned")
        .push(RecordedRequest {
            path_and_query: uri
                .path_and_query()
                .map(|pq| pq.to_string())
                .unwrap_or_else(|| uri.path().to_string()),
            user_agent,
        });

    let response = state
        .routes
        .lock()
        .expect("stub routes poisoned")
        .get(uri.path())
        .cloned();

    match response {
        Some(r) => {
            if let Some(delay) = r.delay {
                tokio::time::sleep(delay).await;
            }
            let status = StatusCode::from_u16(r.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (status, r.body)
        }
        None => (StatusCode::NOT_FOUND, b"not found".to_vec()),
    }
}
