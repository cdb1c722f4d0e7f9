//! Integration tests for smartshop-api HTTP endpoints
//!
//! Run against a temporary database with the mock detector and OCR/TTS
//! disabled, so no network access or model services are needed.

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::util::ServiceExt; // for `oneshot` method

use smartshop_api::services::{DetectorService, OcrService, TtsService};
use smartshop_api::{build_router, AppState};
use smartshop_common::config::{Config, DetectionMode};
use smartshop_common::db::init_database;

/// Test helper: build the app against a fresh seeded database, mock
/// detector, unconfigured OCR, and disabled TTS. Returns the temp dir
/// guard so the database outlives the test body.
async fn setup_app() -> (axum::Router, TempDir) {
    let dir = TempDir::new().unwrap();
    let db = init_database(&dir.path().join("smartshop.db")).await.unwrap();

    let config = Config {
        detection_mode: DetectionMode::Mock,
        gemini_api_key: None,
        tts_enabled: false,
        ..Config::default()
    };

    let audio_path = dir.path().join("audio");
    let detector = Arc::new(DetectorService::new(&config).unwrap());
    let ocr = Arc::new(OcrService::new(&config).unwrap());
    let tts = Arc::new(TtsService::new(&config, audio_path.clone()).unwrap());

    let state = AppState::new(db, Arc::new(config), detector, ocr, tts, audio_path);
    (build_router(state), dir)
}

/// Test helper: GET request
fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

/// Test helper: POST request with a JSON body
fn post_json(uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Test helper: Extract JSON body from response
async fn extract_json(body: Body) -> Value {
    let bytes = axum::body::to_bytes(body, usize::MAX)
        .await
        .expect("Should read body");
    serde_json::from_slice(&bytes).expect("Should parse JSON")
}

/// Test helper: a small valid PNG as a base64 data URL
fn test_image_data_url(width: u32, height: u32) -> String {
    let image = image::DynamicImage::ImageRgb8(image::RgbImage::new(width, height));
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .unwrap();
    format!("data:image/png;base64,{}", BASE64.encode(&bytes))
}

// =============================================================================
// Health and info endpoints
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/api/v1/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["model_loaded"], true);
    assert_eq!(body["gemini_configured"], false);
    assert_eq!(body["services"]["database"], true);
    assert_eq!(body["services"]["tts"], false);
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn test_root_service_info() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "running");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn test_timing_header_present() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/api/v1/health")).await.unwrap();
    assert!(response.headers().contains_key("x-process-time"));
}

// =============================================================================
// Prediction endpoint
// =============================================================================

#[tokio::test]
async fn test_predict_mock_mode() {
    let (app, _dir) = setup_app().await;

    let request = post_json(
        "/api/v1/predict",
        &json!({
            "image": test_image_data_url(640, 480),
            "include_audio": false,
            "min_confidence": 0.25
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["total_items"], 2);
    assert_eq!(body["audio_url"], Value::Null);
    assert!(body["processing_time_ms"].is_number());

    // Ranked by confidence descending
    let detections = body["detections"].as_array().unwrap();
    assert_eq!(detections.len(), 2);
    assert_eq!(detections[0]["class_name"], "milk_pack");
    assert_eq!(detections[1]["class_name"], "biscuit_pack");
    assert_eq!(detections[0]["bbox"].as_array().unwrap().len(), 4);

    assert_eq!(
        body["summary"],
        "Detected 2 items. \
         Item 1: Amul Full Cream Milk 500ml. Confidence 92 percent. \
         Item 2: Parle Marie Gold 100g. Confidence 87 percent."
    );
}

#[tokio::test]
async fn test_predict_confidence_floor_filters() {
    let (app, _dir) = setup_app().await;

    let request = post_json(
        "/api/v1/predict",
        &json!({
            "image": test_image_data_url(640, 480),
            "include_audio": false,
            "min_confidence": 0.9
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["total_items"], 1);
    assert_eq!(
        body["summary"],
        "Detected 1 item. Item 1: Amul Full Cream Milk 500ml. Confidence 92 percent."
    );
}

#[tokio::test]
async fn test_predict_invalid_image_is_bad_request() {
    let (app, _dir) = setup_app().await;

    let request = post_json(
        "/api/v1/predict",
        &json!({
            "image": "not-a-valid-base64-image",
            "include_audio": false
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "error");
}

// =============================================================================
// Product catalog endpoints
// =============================================================================

#[tokio::test]
async fn test_product_search_by_brand() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(get("/api/v1/products/search?brand=amul"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 2);
    for product in matches {
        assert_eq!(product["brand"], "Amul");
        assert!(!product["variants"].as_array().unwrap().is_empty());
        assert!(!product["available_sizes"].as_array().unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_product_search_no_match_returns_fallback() {
    let (app, _dir) = setup_app().await;

    let response = app
        .oneshot(get("/api/v1/products/search?brand=nosuchbrand&quantity=250ml"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "fallback");

    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0]["product_id"], "fallback-001");
    assert_eq!(matches[0]["variants"][0]["size"], "250ml");
    assert_eq!(matches[0]["variants"][0]["price"], 99.0);
}

#[tokio::test]
async fn test_list_products_respects_limit() {
    let (app, _dir) = setup_app().await;

    let response = app.oneshot(get("/api/v1/products?limit=3")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["matches"].as_array().unwrap().len(), 3);
}

// =============================================================================
// Order endpoints
// =============================================================================

#[tokio::test]
async fn test_create_order() {
    let (app, _dir) = setup_app().await;

    let request = post_json(
        "/api/v1/orders",
        &json!({
            "items": [
                {"product_id": "PROD-001", "size": "500ml", "quantity": 2, "unit_price": 30.0},
                {"product_id": "PROD-003", "size": "100g", "quantity": 1, "unit_price": 20.0}
            ],
            "total_amount": 80.0,
            "currency": "INR"
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = extract_json(response.into_body()).await;
    assert_eq!(body["status"], "confirmed");

    let order_id = body["order_id"].as_str().unwrap();
    assert!(order_id.starts_with("ORD-"), "unexpected order id: {}", order_id);
    assert!(body["message"].as_str().unwrap().contains(order_id));
}

#[tokio::test]
async fn test_create_order_rejects_empty_items() {
    let (app, _dir) = setup_app().await;

    let request = post_json(
        "/api/v1/orders",
        &json!({"items": [], "total_amount": 10.0}),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_order_rejects_nonpositive_total() {
    let (app, _dir) = setup_app().await;

    let request = post_json(
        "/api/v1/orders",
        &json!({
            "items": [{"product_id": "PROD-001", "size": "1L", "quantity": 1, "unit_price": 58.0}],
            "total_amount": 0.0
        }),
    );
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
