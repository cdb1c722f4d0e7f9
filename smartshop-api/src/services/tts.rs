//! Text-to-speech adapter
//!
//! Fetches MP3 speech for a summary from the Google Translate TTS
//! endpoint and stores it under the audio directory, returning the URL
//! path the router serves it from. Disabled or failed synthesis yields
//! `None`, never an error.

use smartshop_common::config::Config;
use smartshop_common::{Error, Result};
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info, warn};
use uuid::Uuid;

const TTS_ENDPOINT: &str = "https://translate.google.com/translate_tts";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Text-to-speech service handle
pub struct TtsService {
    enabled: bool,
    audio_dir: PathBuf,
    http_client: reqwest::Client,
}

impl TtsService {
    pub fn new(config: &Config, audio_dir: PathBuf) -> Result<Self> {
        if config.tts_enabled {
            std::fs::create_dir_all(&audio_dir)?;
        }

        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| Error::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            enabled: config.tts_enabled,
            audio_dir,
            http_client,
        })
    }

    /// Whether TTS audio generation is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Generate an audio file for the given text.
    ///
    /// Returns the URL path to the audio file (e.g. `/audio/abc123.mp3`)
    /// or `None` when TTS is disabled, the text is empty, or synthesis
    /// fails.
    pub async fn synthesize(&self, text: &str, language: &str) -> Option<String> {
        if !self.enabled {
            debug!("TTS is disabled");
            return None;
        }

        if text.trim().is_empty() {
            warn!("Empty text provided for TTS");
            return None;
        }

        match self.fetch_and_store(text, language).await {
            Ok(url) => Some(url),
            Err(e) => {
                warn!("TTS generation failed: {}", e);
                None
            }
        }
    }

    async fn fetch_and_store(&self, text: &str, language: &str) -> Result<String> {
        let response = self
            .http_client
            .get(TTS_ENDPOINT)
            .query(&[
                ("ie", "UTF-8"),
                ("client", "tw-ob"),
                ("tl", language),
                ("q", text),
            ])
            .send()
            .await
            .map_err(|e| Error::Internal(format!("TTS request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(Error::Internal(format!(
                "TTS endpoint returned {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| Error::Internal(format!("TTS download failed: {}", e)))?;

        let filename = format!("{}.mp3", Uuid::new_v4());
        let filepath = self.audio_dir.join(&filename);
        tokio::fs::write(&filepath, &bytes).await?;

        info!("Generated TTS audio: {}", filepath.display());
        Ok(format!("/audio/{}", filename))
    }
}
