//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with capture, operator, viewer and dashboard routes
//! - Wire up middleware (CORS, timeout, body limit, request ID, tracing)
//! - Dispatch inbound requests into the capture engine
//! - Expose operator actions over the `/api` routes

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get, put},
    Json, Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tower_http::{
    cors::CorsLayer,
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::broadcast::Broadcaster;
use crate::capture::{
    CaptureEngine, CapturedRequest, HistoryStore, OverrideKind, OverrideStore, ResponseDescriptor,
};
use crate::config::RelayConfig;
use crate::http::{dashboard, websocket};
use crate::lifecycle::ShutdownListener;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub engine: Arc<CaptureEngine>,
    pub history: Arc<HistoryStore>,
    pub overrides: Arc<OverrideStore>,
    pub broadcaster: Arc<Broadcaster>,
    pub max_body_size: usize,
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Self {
        let history = Arc::new(HistoryStore::new(config.history.capacity));
        let broadcaster = Arc::new(Broadcaster::new());
        let overrides = Arc::new(OverrideStore::new());
        let engine = Arc::new(CaptureEngine::new(
            history.clone(),
            broadcaster.clone(),
            overrides.clone(),
        ));

        let state = AppState {
            engine,
            history,
            overrides,
            broadcaster,
            max_body_size: config.security.max_body_size,
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &RelayConfig, state: AppState) -> Router {
        Router::new()
            .route("/", get(dashboard::render))
            .route("/ws", get(websocket::ws_handler))
            .route("/webhook", any(capture_handler))
            .route("/webhook/{*path}", any(capture_handler))
            .route("/api/history", get(get_history).delete(clear_history))
            .route("/api/response", put(set_override).delete(reset_override))
            .with_state(state)
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(RequestBodyLimitLayer::new(config.security.max_body_size))
            .layer(CorsLayer::permissive())
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener.
    pub async fn run(
        self,
        listener: TcpListener,
        shutdown: ShutdownListener,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown.wait())
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &RelayConfig {
        &self.config
    }
}

/// Capture handler: record the inbound request and answer per the override.
async fn capture_handler(State(state): State<AppState>, request: Request<Body>) -> Response {
    let method = request.method().to_string();
    let url = request.uri().to_string();
    let content_type = request
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);

    let bytes = match axum::body::to_bytes(request.into_body(), state.max_body_size).await {
        Ok(bytes) => bytes,
        Err(e) if is_length_limit(&e) => {
            tracing::warn!(error = %e, "capture body over limit");
            return (StatusCode::PAYLOAD_TOO_LARGE, "Request body too large").into_response();
        }
        Err(e) => {
            tracing::warn!(error = %e, "failed to read capture body");
            return (StatusCode::BAD_REQUEST, "Failed to read request body").into_response();
        }
    };
    let raw = String::from_utf8_lossy(&bytes).into_owned();

    let captured = state
        .engine
        .record(&method, &url, raw, content_type.as_deref());

    match state.engine.build_response(&captured) {
        ResponseDescriptor::Json(value) => Json(value).into_response(),
        ResponseDescriptor::Text(text) => text.into_response(),
    }
}

/// Whether a body-read failure was the size limit (as opposed to a
/// transport error mid-read).
fn is_length_limit(err: &axum::Error) -> bool {
    let mut source: Option<&(dyn std::error::Error + 'static)> = Some(err);
    while let Some(e) = source {
        if e.downcast_ref::<http_body_util::LengthLimitError>().is_some() {
            return true;
        }
        source = e.source();
    }
    false
}

/// Current history, newest first.
async fn get_history(State(state): State<AppState>) -> Json<Vec<CapturedRequest>> {
    Json(state.history.snapshot())
}

/// Operator action: drop all recorded captures.
async fn clear_history(State(state): State<AppState>) -> Json<Value> {
    state.history.clear();
    tracing::info!("history cleared");
    Json(json!({ "success": true }))
}

/// Payload for configuring the response override.
#[derive(Debug, Deserialize)]
pub struct SetOverrideRequest {
    pub kind: OverrideKind,
    pub body: String,
}

/// Operator action: install a response override.
async fn set_override(
    State(state): State<AppState>,
    Json(req): Json<SetOverrideRequest>,
) -> Response {
    match state.overrides.set(req.kind, &req.body) {
        Ok(()) => {
            tracing::info!(kind = ?req.kind, "response override set");
            Json(json!({ "success": true })).into_response()
        }
        Err(e) => {
            tracing::warn!(error = %e, "response override rejected");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "success": false, "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// Operator action: return to the default acknowledgment response.
async fn reset_override(State(state): State<AppState>) -> Json<Value> {
    state.overrides.clear();
    tracing::info!("response override cleared");
    Json(json!({ "success": true }))
}
