//! HTTP API handlers for smartshop-api

use axum::extract::Request;
use axum::http::{HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::time::Instant;
use tracing::debug;

pub mod health;
pub mod orders;
pub mod predict;
pub mod products;

pub use health::{health_check, service_info};
pub use orders::create_order;
pub use predict::predict_products;
pub use products::{list_products, search_products};

/// Handler errors, mapped to HTTP status codes with a JSON body
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg),
            ApiError::Internal(msg) => (StatusCode::INTERNAL_SERVER_ERROR, msg),
        };

        let body = Json(json!({
            "status": "error",
            "message": message,
        }));

        (status, body).into_response()
    }
}

impl From<smartshop_common::Error> for ApiError {
    fn from(e: smartshop_common::Error) -> Self {
        match e {
            smartshop_common::Error::InvalidInput(msg) => ApiError::BadRequest(msg),
            other => ApiError::Internal(other.to_string()),
        }
    }
}

/// Request timing middleware: logs the request and adds an
/// `x-process-time` header (milliseconds) to every response.
pub async fn timing_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let mut response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    debug!("{} {} - {} - {:.2}ms", method, path, response.status(), elapsed_ms);

    if let Ok(value) = HeaderValue::from_str(&format!("{:.2}", elapsed_ms)) {
        response.headers_mut().insert("x-process-time", value);
    }

    response
}
