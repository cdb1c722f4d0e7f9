//! Product detection endpoint
//!
//! Sequences the full prediction flow: decode image, detect, per-region
//! OCR enrichment, fusion, summary, optional speech synthesis.

use axum::extract::State;
use axum::Json;
use std::time::Instant;
use tracing::{info, warn};

use crate::api::ApiError;
use crate::services::image::{crop_detection, decode_data_url, encode_jpeg};
use crate::{fusion, AppState};
use smartshop_common::api::{PredictRequest, PredictResponse};

/// Padding around detection crops handed to OCR
const CROP_PADDING: f32 = 0.1;
const CROP_JPEG_QUALITY: u8 = 85;

/// POST /api/v1/predict
pub async fn predict_products(
    State(state): State<AppState>,
    Json(request): Json<PredictRequest>,
) -> Result<Json<PredictResponse>, ApiError> {
    let start = Instant::now();

    // 1. Decode image (bad input -> 400)
    let image = decode_data_url(&request.image)?;

    // 2. Run detection
    let detections = state
        .detector
        .detect(&image, request.min_confidence)
        .await?;

    // 3. OCR enrichment per detection. Mock detections arrive with text
    //    fields pre-filled, so the OCR pass is skipped in mock mode. An
    //    OCR failure keeps the un-enriched detection.
    let detections = if state.detector.is_mock() {
        detections
    } else {
        let mut enriched = Vec::with_capacity(detections.len());
        for detection in detections {
            let crop = crop_detection(&image, &detection.bbox, CROP_PADDING)
                .and_then(|crop| encode_jpeg(&crop, CROP_JPEG_QUALITY));

            match crop {
                Ok(jpeg) => {
                    let ocr = state.ocr.read_label(&jpeg).await;
                    enriched.push(fusion::merge_ocr(&detection, &ocr));
                }
                Err(e) => {
                    warn!("OCR skipped for detection {}: {}", detection.id, e);
                    enriched.push(detection);
                }
            }
        }
        enriched
    };

    // 4. Filter and rank
    let detections = fusion::filter_and_rank(&detections, request.min_confidence);

    // 5. Build summary
    let summary = fusion::build_summary(&detections);

    // 6. Optional TTS audio
    let audio_url = if request.include_audio {
        state.tts.synthesize(&summary, &request.language).await
    } else {
        None
    };

    let processing_time_ms = start.elapsed().as_millis() as i64;
    info!(
        "Prediction complete: {} items in {}ms",
        detections.len(),
        processing_time_ms
    );

    let total_items = detections.len();
    Ok(Json(PredictResponse {
        status: "ok".to_string(),
        detections,
        summary: Some(summary),
        audio_url,
        processing_time_ms: Some(processing_time_ms),
        total_items: Some(total_items),
    }))
}
