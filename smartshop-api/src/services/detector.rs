//! Object detection adapter
//!
//! Detection is delegated to an external YOLO inference service over
//! HTTP. A mock backend returns the fixed sample detections used by
//! tests and demos.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use smartshop_common::api::{BoundingBox, Detection};
use smartshop_common::config::{Config, DetectionMode};
use smartshop_common::{Error, Result};
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::services::image::encode_jpeg;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const JPEG_QUALITY: u8 = 85;

/// Request body sent to the remote inference service
#[derive(Debug, Serialize)]
struct InferenceRequest {
    /// Base64-encoded JPEG
    image: String,
    min_confidence: f32,
}

/// Response body from the remote inference service
#[derive(Debug, Deserialize)]
struct InferenceResponse {
    detections: Vec<InferenceDetection>,
}

#[derive(Debug, Deserialize)]
struct InferenceDetection {
    bbox: [f32; 4],
    class_name: String,
    confidence: f32,
}

/// Object detection service handle
pub struct DetectorService {
    mode: DetectionMode,
    endpoint: Option<String>,
    http_client: reqwest::Client,
}

impl DetectorService {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            mode: config.detection_mode,
            endpoint: config.detector_url.clone(),
            http_client,
        })
    }

    /// Whether a detection backend is available
    pub fn is_loaded(&self) -> bool {
        self.mode == DetectionMode::Mock || self.endpoint.is_some()
    }

    /// Whether the mock backend is active (mock detections arrive with
    /// text fields pre-filled, so the OCR pass is skipped)
    pub fn is_mock(&self) -> bool {
        self.mode == DetectionMode::Mock
    }

    /// Run product detection on an image
    pub async fn detect(
        &self,
        image: &DynamicImage,
        min_confidence: f32,
    ) -> Result<Vec<Detection>> {
        match self.mode {
            DetectionMode::Mock => Ok(mock_detections(image)),
            DetectionMode::Remote => self.detect_remote(image, min_confidence).await,
        }
    }

    async fn detect_remote(
        &self,
        image: &DynamicImage,
        min_confidence: f32,
    ) -> Result<Vec<Detection>> {
        let endpoint = self
            .endpoint
            .as_deref()
            .ok_or_else(|| Error::Internal("Detector service not configured".to_string()))?;

        let jpeg = encode_jpeg(image, JPEG_QUALITY)?;
        let request = InferenceRequest {
            image: BASE64.encode(&jpeg),
            min_confidence,
        };

        let url = format!("{}/detect", endpoint.trim_end_matches('/'));
        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| Error::Internal(format!("Detection failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Detector service returned {}",
                response.status()
            )));
        }

        let body: InferenceResponse = response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("Invalid detector response: {}", e)))?;

        let detections: Vec<Detection> = body
            .detections
            .into_iter()
            .map(|d| Detection {
                id: Uuid::new_v4().to_string(),
                bbox: BoundingBox::from(d.bbox),
                class_name: d.class_name,
                confidence: (d.confidence * 1000.0).round() / 1000.0,
                brand: None,
                product_name: None,
                quantity_text: None,
                raw_text: None,
            })
            .collect();

        info!("Detected {} products", detections.len());
        Ok(detections)
    }
}

/// Fixed sample detections scaled to the image dimensions
fn mock_detections(image: &DynamicImage) -> Vec<Detection> {
    let width = image.width() as f32;
    let height = image.height() as f32;

    let detections = vec![
        Detection {
            id: Uuid::new_v4().to_string(),
            bbox: BoundingBox::new(width * 0.1, height * 0.1, width * 0.4, height * 0.5),
            class_name: "milk_pack".to_string(),
            confidence: 0.92,
            brand: Some("Amul".to_string()),
            product_name: Some("Full Cream Milk".to_string()),
            quantity_text: Some("500ml".to_string()),
            raw_text: Some("Amul Full Cream Milk 500ml".to_string()),
        },
        Detection {
            id: Uuid::new_v4().to_string(),
            bbox: BoundingBox::new(width * 0.5, height * 0.2, width * 0.9, height * 0.6),
            class_name: "biscuit_pack".to_string(),
            confidence: 0.87,
            brand: Some("Parle".to_string()),
            product_name: Some("Marie Gold".to_string()),
            quantity_text: Some("100g".to_string()),
            raw_text: Some("Parle Marie Gold Biscuits 100g".to_string()),
        },
    ];

    info!("Returning {} mock detections", detections.len());
    detections
}
