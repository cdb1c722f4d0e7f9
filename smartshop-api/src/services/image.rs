//! Image handling: base64 data URL decoding and detection-region cropping

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, GenericImageView};
use smartshop_common::api::BoundingBox;
use smartshop_common::{Error, Result};
use tracing::debug;

/// Decode a base64 data URL (`data:image/jpeg;base64,...`) into an image.
/// A bare base64 payload without the `data:` prefix is also accepted.
pub fn decode_data_url(data_url: &str) -> Result<DynamicImage> {
    let payload = if data_url.starts_with("data:") {
        match data_url.find(";base64,") {
            Some(idx) => &data_url[idx + ";base64,".len()..],
            None => {
                return Err(Error::InvalidInput(
                    "Failed to decode image: not a base64 data URL".to_string(),
                ))
            }
        }
    } else {
        data_url
    };

    let bytes = BASE64
        .decode(payload.trim())
        .map_err(|e| Error::InvalidInput(format!("Failed to decode image: {}", e)))?;

    let image = image::load_from_memory(&bytes)
        .map_err(|e| Error::InvalidInput(format!("Failed to decode image: {}", e)))?;

    debug!("Decoded image: {}x{}", image.width(), image.height());
    Ok(image)
}

/// Crop a detection region with fractional padding, clamped to the image
/// bounds (`padding = 0.1` adds 10% of the box size on each side).
pub fn crop_detection(
    image: &DynamicImage,
    bbox: &BoundingBox,
    padding: f32,
) -> Result<DynamicImage> {
    let width = image.width() as f32;
    let height = image.height() as f32;

    let pad_x = bbox.width() * padding;
    let pad_y = bbox.height() * padding;

    let x1 = (bbox.x1 - pad_x).max(0.0).min(width);
    let y1 = (bbox.y1 - pad_y).max(0.0).min(height);
    let x2 = (bbox.x2 + pad_x).max(0.0).min(width);
    let y2 = (bbox.y2 + pad_y).max(0.0).min(height);

    if x2 <= x1 || y2 <= y1 {
        return Err(Error::InvalidInput(format!(
            "Empty crop region for bbox [{}, {}, {}, {}]",
            bbox.x1, bbox.y1, bbox.x2, bbox.y2
        )));
    }

    let cropped = image.crop_imm(x1 as u32, y1 as u32, (x2 - x1) as u32, (y2 - y1) as u32);

    debug!(
        "Cropped region: {}x{} from bbox [{}, {}, {}, {}]",
        cropped.width(), cropped.height(), bbox.x1, bbox.y1, bbox.x2, bbox.y2
    );
    Ok(cropped)
}

/// Encode an image as JPEG bytes for transport to a model service
pub fn encode_jpeg(image: &DynamicImage, quality: u8) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);

    image
        .to_rgb8()
        .write_with_encoder(encoder)
        .map_err(|e| Error::Internal(format!("Failed to encode image: {}", e)))?;

    Ok(buffer)
}
