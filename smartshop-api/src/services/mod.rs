//! Adapter services for external models and I/O
//!
//! Each adapter is an explicitly constructed handle injected into
//! `AppState`; failures inside OCR and TTS degrade to absent results
//! rather than surfacing as request errors.

pub mod detector;
pub mod image;
pub mod ocr;
pub mod tts;

pub use detector::DetectorService;
pub use ocr::OcrService;
pub use tts::TtsService;
