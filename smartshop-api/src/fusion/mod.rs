//! Detection fusion: combines detector output with OCR output and derives
//! a human-readable summary.
//!
//! Every function here is a pure, total transformation over its input.
//! There is no I/O, no shared state, and no failure path: malformed
//! upstream data (out-of-range confidence, empty class name, absent text
//! fields) degrades to the "Unknown product" defaults rather than erroring.

use smartshop_common::api::{Detection, OcrFields};

/// Merge OCR results into a detection.
///
/// Returns a new `Detection` whose identity fields (`id`, `bbox`,
/// `class_name`, `confidence`) are carried over exactly and whose four
/// text fields are replaced wholesale by the OCR result's fields.
///
/// The replacement is deliberately not a coalesce: an absent OCR field
/// clears a previously-set value. Callers wanting "keep old on empty"
/// must build that `OcrFields` themselves before calling.
pub fn merge_ocr(detection: &Detection, ocr: &OcrFields) -> Detection {
    Detection {
        id: detection.id.clone(),
        bbox: detection.bbox,
        class_name: detection.class_name.clone(),
        confidence: detection.confidence,
        brand: ocr.brand.clone(),
        product_name: ocr.product_name.clone(),
        quantity_text: ocr.quantity_text.clone(),
        raw_text: ocr.raw_text.clone(),
    }
}

/// Filter detections by confidence and sort descending.
///
/// Keeps detections with `confidence >= min_confidence`. The sort is
/// stable: equal-confidence detections retain their input order.
pub fn filter_and_rank(detections: &[Detection], min_confidence: f32) -> Vec<Detection> {
    let mut filtered: Vec<Detection> = detections
        .iter()
        .filter(|d| d.confidence >= min_confidence)
        .cloned()
        .collect();

    // sort_by is a stable sort; NaN confidences compare as equal and stay put
    filtered.sort_by(|a, b| {
        b.confidence
            .partial_cmp(&a.confidence)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    tracing::debug!("Cleaned {} -> {} detections", detections.len(), filtered.len());
    filtered
}

/// Build a natural language summary of detected products.
///
/// Items are numbered in the order given; callers normally pass the
/// output of [`filter_and_rank`]. The output is deterministic down to the
/// byte for identical input.
pub fn build_summary(detections: &[Detection]) -> String {
    if detections.is_empty() {
        return "No products detected.".to_string();
    }

    let count = detections.len();
    let plural = if count > 1 { "s" } else { "" };
    let mut parts = vec![format!("Detected {} item{}.", count, plural)];

    for (i, detection) in detections.iter().enumerate() {
        let desc = describe(detection).unwrap_or_else(|| "Unknown product".to_string());
        // Truncate, not round: 0.876 reads as 87 percent
        let confidence_pct = (detection.confidence * 100.0) as i32;

        parts.push(format!(
            "Item {}: {}. Confidence {} percent.",
            i + 1,
            desc,
            confidence_pct
        ));
    }

    parts.join(" ")
}

/// Create a display label for a detection, with the quantity in
/// parentheses (e.g. `Amul Full Cream Milk (500ml)`).
pub fn format_label(detection: &Detection) -> String {
    let mut parts = Vec::new();

    if let Some(brand) = &detection.brand {
        parts.push(brand.clone());
    }

    if let Some(name) = &detection.product_name {
        parts.push(name.clone());
    } else if !detection.class_name.is_empty() {
        parts.push(humanize_class_name(&detection.class_name));
    }

    if let Some(quantity) = &detection.quantity_text {
        parts.push(format!("({})", quantity));
    }

    if parts.is_empty() {
        "Unknown Product".to_string()
    } else {
        parts.join(" ")
    }
}

/// Space-joined description parts for the summary, or `None` when no part
/// is present.
fn describe(detection: &Detection) -> Option<String> {
    let mut parts = Vec::new();

    if let Some(brand) = &detection.brand {
        parts.push(brand.clone());
    }

    if let Some(name) = &detection.product_name {
        parts.push(name.clone());
    } else if !detection.class_name.is_empty() {
        parts.push(humanize_class_name(&detection.class_name));
    }

    if let Some(quantity) = &detection.quantity_text {
        parts.push(quantity.clone());
    }

    if parts.is_empty() {
        None
    } else {
        Some(parts.join(" "))
    }
}

/// Render a detector class name for humans: underscores become spaces and
/// each word is title-cased (`milk_pack` -> `Milk Pack`).
fn humanize_class_name(class_name: &str) -> String {
    let spaced = class_name.replace('_', " ");
    let mut out = String::with_capacity(spaced.len());
    let mut prev_alpha = false;

    for c in spaced.chars() {
        if c.is_alphabetic() {
            if prev_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(c);
            prev_alpha = false;
        }
    }

    out
}
