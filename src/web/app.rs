use super::handlers;
use crate::engine::SharedEngine;
use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::trace::{DefaultMakeSpan, TraceLayer};
use tracing::Level;

pub fn create_app(engine: SharedEngine, max_upload_bytes: usize) -> Router {
    Router::new()
        .route("/api/status", get(handlers::status))
        .route("/api/scan", post(handlers::scan))
        // Uploads larger than this are rejected before reaching the engine
        .layer(DefaultBodyLimit::max(max_upload_bytes))
        .layer(TraceLayer::new_for_http().make_span_with(DefaultMakeSpan::new().level(Level::INFO)))
        .with_state(engine)
}
