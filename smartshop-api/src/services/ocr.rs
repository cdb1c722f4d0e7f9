//! Vision OCR adapter (Google Gemini)
//!
//! Reads brand, product name, and quantity text off a cropped product
//! label. Unconfigured or failed calls return the all-absent `OcrFields`
//! so enrichment never blocks a prediction.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::Deserialize;
use serde_json::json;
use smartshop_common::api::OcrFields;
use smartshop_common::config::Config;
use smartshop_common::{Error, Result};
use std::time::Duration;
use tracing::{debug, warn};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const LABEL_PROMPT: &str = "You are reading a supermarket product label image.\n\
Extract the following details in EXACTLY this format (one per line):\n\
\n\
Brand: <brand_name or Unknown>\n\
Product: <short product name or Unknown>\n\
Quantity: <quantity like 500ml, 1L, 100g, 10pcs or Unknown>\n\
Other: <any other relevant text, optional>\n\
\n\
Be concise and accurate. If you cannot determine a field, write \"Unknown\".\n\
Only extract what you can clearly see in the image.";

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    parts: Option<Vec<CandidatePart>>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

/// Vision OCR service handle
pub struct OcrService {
    api_key: Option<String>,
    model: String,
    http_client: reqwest::Client,
}

impl OcrService {
    pub fn new(config: &Config) -> Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_model.clone(),
            http_client,
        })
    }

    /// Whether an API key is configured
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    /// Read label text off a cropped product region (JPEG bytes).
    ///
    /// Total over its inputs: any failure is logged and collapses to the
    /// all-absent result.
    pub async fn read_label(&self, jpeg: &[u8]) -> OcrFields {
        let Some(api_key) = self.api_key.as_deref() else {
            debug!("Gemini not configured, returning defaults");
            return OcrFields::default();
        };

        match self.generate(api_key, jpeg).await {
            Ok(text) => parse_label_reply(&text),
            Err(e) => {
                warn!("OCR processing error: {}", e);
                OcrFields::default()
            }
        }
    }

    async fn generate(&self, api_key: &str, jpeg: &[u8]) -> Result<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            GEMINI_BASE_URL, self.model, api_key
        );

        let body = json!({
            "contents": [{
                "parts": [
                    { "text": LABEL_PROMPT },
                    {
                        "inline_data": {
                            "mime_type": "image/jpeg",
                            "data": BASE64.encode(jpeg),
                        }
                    }
                ]
            }]
        });

        let response = self
            .http_client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Internal(format!("Gemini request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "Gemini returned {}",
                response.status()
            )));
        }

        let body: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| Error::Internal(format!("Invalid Gemini response: {}", e)))?;

        let text = body
            .candidates
            .and_then(|mut c| c.drain(..).next())
            .and_then(|c| c.content)
            .and_then(|c| c.parts)
            .and_then(|mut p| p.drain(..).next())
            .and_then(|p| p.text)
            .ok_or_else(|| Error::Internal("Empty response from Gemini".to_string()))?;

        Ok(text)
    }
}

/// Parse the structured `Brand:` / `Product:` / `Quantity:` reply format.
/// Values equal to `Unknown` are treated as absent; `raw_text` carries the
/// whole reply.
fn parse_label_reply(text: &str) -> OcrFields {
    let trimmed = text.trim();
    let mut result = OcrFields {
        raw_text: if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        },
        ..OcrFields::default()
    };

    for line in trimmed.lines() {
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };

        let key = key.trim().to_lowercase();
        let value = value.trim();

        if value.is_empty() || value.eq_ignore_ascii_case("unknown") {
            continue;
        }

        match key.as_str() {
            "brand" => result.brand = Some(value.to_string()),
            "product" => result.product_name = Some(value.to_string()),
            "quantity" => result.quantity_text = Some(value.to_string()),
            _ => {}
        }
    }

    debug!("Parsed OCR result: {:?}", result);
    result
}
