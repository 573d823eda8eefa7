// ============================================================
// Layer 1 — HTTP Inference Service
// ============================================================
// Routes:
//   GET  /         → 200 {"message": "..."}
//   POST /predict  → 200 {"response": "<answer>"}
//                    400 {"error": "No input provided"}
//
// CORS is fully permissive. The Inferencer is loaded BEFORE the
// listener binds and is shared read-only through an Arc, so a
// process that is serving always has a model.

pub mod error;
pub mod handlers;

use anyhow::{Context, Result};
use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::ml::inferencer::Inferencer;

/// Shared state for the server.
#[derive(Clone)]
pub struct AppState {
    pub inferencer: Arc<Inferencer>,
}

impl AppState {
    pub fn new(inferencer: Inferencer) -> Self {
        Self { inferencer: Arc::new(inferencer) }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/predict", post(handlers::predict))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `addr` and serve until the process is stopped.
pub async fn serve(inferencer: Inferencer, addr: SocketAddr) -> Result<()> {
    let app = router(AppState::new(inferencer));

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Cannot bind {addr}"))?;
    tracing::info!("Listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).await.context("HTTP server failed")?;
    Ok(())
}
