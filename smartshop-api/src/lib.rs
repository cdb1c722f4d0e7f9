//! smartshop-api library - HTTP backend for the SmartShop assistant
//!
//! Accepts an image, runs detection and OCR through external model
//! services, fuses the results into a ranked list plus a spoken summary,
//! and serves the product catalog and order store.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use sqlx::SqlitePool;
use smartshop_common::config::Config;

use crate::services::{DetectorService, OcrService, TtsService};

pub mod api;
pub mod db;
pub mod fusion;
pub mod services;

/// Application state shared across HTTP handlers.
///
/// Adapter services are constructed once in `main` and injected here;
/// handlers never reach for process-global state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: SqlitePool,
    /// Loaded application configuration
    pub config: Arc<Config>,
    /// Object detection adapter (remote inference service or mock)
    pub detector: Arc<DetectorService>,
    /// Vision OCR adapter
    pub ocr: Arc<OcrService>,
    /// Text-to-speech adapter
    pub tts: Arc<TtsService>,
    /// Directory generated audio files are served from
    pub audio_path: PathBuf,
}

impl AppState {
    /// Create new application state
    pub fn new(
        db: SqlitePool,
        config: Arc<Config>,
        detector: Arc<DetectorService>,
        ocr: Arc<OcrService>,
        tts: Arc<TtsService>,
        audio_path: PathBuf,
    ) -> Self {
        Self { db, config, detector, ocr, tts, audio_path }
    }
}

/// Build application router
///
/// API routes live under `/api/v1`; generated TTS audio is served from
/// disk under `/audio`.
pub fn build_router(state: AppState) -> Router {
    use axum::middleware;
    use axum::routing::{get, post};
    use tower_http::cors::CorsLayer;
    use tower_http::services::ServeDir;
    use tower_http::trace::TraceLayer;

    let api = Router::new()
        .route("/health", get(api::health_check))
        .route("/predict", post(api::predict_products))
        .route("/products/search", get(api::search_products))
        .route("/products", get(api::list_products))
        .route("/orders", post(api::create_order));

    Router::new()
        .route("/", get(api::service_info))
        .nest("/api/v1", api)
        .nest_service("/audio", ServeDir::new(&state.audio_path))
        .layer(middleware::from_fn(api::timing_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
