//! Health check and service info endpoints

use axum::extract::State;
use axum::Json;
use chrono::Utc;
use serde_json::{json, Value};
use std::collections::BTreeMap;

use crate::AppState;
use smartshop_common::api::HealthResponse;

/// GET /api/v1/health
///
/// Reports the status of all backend services.
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database_ok = sqlx::query("SELECT 1").execute(&state.db).await.is_ok();

    let mut services = BTreeMap::new();
    services.insert("detector".to_string(), state.detector.is_loaded());
    services.insert("ocr".to_string(), state.ocr.is_configured());
    services.insert("tts".to_string(), state.tts.is_enabled());
    services.insert("database".to_string(), database_ok);

    Json(HealthResponse {
        status: "healthy".to_string(),
        model_loaded: state.detector.is_loaded(),
        gemini_configured: state.ocr.is_configured(),
        services,
        timestamp: Utc::now().to_rfc3339(),
    })
}

/// GET /
///
/// Root endpoint with API information.
pub async fn service_info() -> Json<Value> {
    Json(json!({
        "name": "SmartShop AI Backend",
        "version": env!("CARGO_PKG_VERSION"),
        "status": "running",
        "health": "/api/v1/health",
    }))
}
