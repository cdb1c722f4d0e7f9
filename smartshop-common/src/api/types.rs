//! API request/response types
//!
//! Wire-compatible with the frontend TypeScript types: bounding boxes
//! serialize as `[x1, y1, x2, y2]` arrays and absent OCR fields as `null`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Bounding box in pixel coordinates. `x1 < x2` and `y1 < y2` are expected
/// but not enforced; malformed boxes pass through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(from = "[f32; 4]", into = "[f32; 4]")]
pub struct BoundingBox {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl BoundingBox {
    pub fn new(x1: f32, y1: f32, x2: f32, y2: f32) -> Self {
        Self { x1, y1, x2, y2 }
    }

    pub fn width(&self) -> f32 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f32 {
        self.y2 - self.y1
    }
}

impl From<[f32; 4]> for BoundingBox {
    fn from(v: [f32; 4]) -> Self {
        Self { x1: v[0], y1: v[1], x2: v[2], y2: v[3] }
    }
}

impl From<BoundingBox> for [f32; 4] {
    fn from(b: BoundingBox) -> Self {
        [b.x1, b.y1, b.x2, b.y2]
    }
}

/// Single product detection result.
///
/// Identity fields (`id`, `bbox`, `class_name`, `confidence`) are assigned
/// by the detector and never altered afterwards; the four optional text
/// fields start absent and are only ever replaced wholesale by an OCR merge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    /// Unique detection ID, assigned by the detector
    pub id: String,
    /// Bounding box `[x1, y1, x2, y2]`
    pub bbox: BoundingBox,
    /// Detector class name (e.g. `milk_pack`)
    pub class_name: String,
    /// Detection confidence in [0, 1]
    pub confidence: f32,
    /// Brand from OCR
    pub brand: Option<String>,
    /// Product name from OCR
    pub product_name: Option<String>,
    /// Quantity text from OCR (e.g. `500ml`)
    pub quantity_text: Option<String>,
    /// Raw OCR text
    pub raw_text: Option<String>,
}

/// Text fields extracted from one OCR pass over a cropped detection region
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrFields {
    pub brand: Option<String>,
    pub product_name: Option<String>,
    pub quantity_text: Option<String>,
    pub raw_text: Option<String>,
}

/// Request body for product detection
#[derive(Debug, Clone, Deserialize)]
pub struct PredictRequest {
    /// Base64 data URL (`data:image/jpeg;base64,...`)
    pub image: String,
    /// Generate TTS audio for the summary
    #[serde(default = "default_include_audio")]
    pub include_audio: bool,
    /// Language for TTS
    #[serde(default = "default_language")]
    pub language: String,
    /// Minimum confidence threshold
    #[serde(default = "default_min_confidence")]
    pub min_confidence: f32,
}

fn default_include_audio() -> bool {
    true
}

fn default_language() -> String {
    "en".to_string()
}

fn default_min_confidence() -> f32 {
    0.25
}

/// Response body for product detection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictResponse {
    /// `"ok"` or `"error"`
    pub status: String,
    pub detections: Vec<Detection>,
    /// Natural language summary
    pub summary: Option<String>,
    /// URL path to the generated TTS audio file
    pub audio_url: Option<String>,
    pub processing_time_ms: Option<i64>,
    pub total_items: Option<usize>,
}

/// Product size variant with pricing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Size label (e.g. `500ml`, `1L`)
    pub size: String,
    pub price: f64,
    pub currency: String,
}

/// Product search result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductMatch {
    pub product_id: String,
    pub brand: String,
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
    pub available_sizes: Vec<String>,
    pub available_quantities: Vec<i64>,
    pub variants: Vec<ProductVariant>,
}

/// Product search response; `status` is `"ok"` or `"fallback"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductSearchResponse {
    pub status: String,
    pub matches: Vec<ProductMatch>,
}

/// Single item in an order creation request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderItemRequest {
    pub product_id: String,
    pub size: String,
    pub quantity: i64,
    pub unit_price: f64,
}

/// Order creation request
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OrderRequest {
    pub items: Vec<OrderItemRequest>,
    pub total_amount: f64,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    "INR".to_string()
}

/// Order creation response; `status` is `"confirmed"` or `"error"`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderResponse {
    pub status: String,
    pub order_id: Option<String>,
    pub message: Option<String>,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"healthy"` or `"unhealthy"`
    pub status: String,
    /// Detector backend availability
    pub model_loaded: bool,
    /// Gemini OCR configured
    pub gemini_configured: bool,
    /// Per-service status map
    pub services: BTreeMap<String, bool>,
    /// Server timestamp (RFC 3339)
    pub timestamp: String,
}
