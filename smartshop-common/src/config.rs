//! Configuration loading and root folder resolution

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the root folder
pub const ROOT_ENV_VAR: &str = "SMARTSHOP_ROOT";

/// Resolve the root folder following the priority order:
/// 1. Command-line argument (highest priority)
/// 2. `SMARTSHOP_ROOT` environment variable
/// 3. `root_folder` key in the user config file
/// 4. OS-dependent compiled default (fallback)
pub fn resolve_root_folder(cli_arg: Option<&str>) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return PathBuf::from(path);
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(ROOT_ENV_VAR) {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Ok(config_path) = user_config_file() {
        if let Ok(toml_content) = std::fs::read_to_string(&config_path) {
            if let Ok(config) = toml::from_str::<toml::Value>(&toml_content) {
                if let Some(root_folder) = config.get("root_folder").and_then(|v| v.as_str()) {
                    return PathBuf::from(root_folder);
                }
            }
        }
    }

    // Priority 4: OS-dependent compiled default
    default_root_folder()
}

/// Get the user-level configuration file path for the platform
fn user_config_file() -> Result<PathBuf> {
    let path = dirs::config_dir()
        .map(|d| d.join("smartshop").join("config.toml"))
        .ok_or_else(|| Error::Config("Could not determine config directory".to_string()))?;

    if path.exists() {
        Ok(path)
    } else {
        Err(Error::Config(format!("Config file not found: {:?}", path)))
    }
}

/// OS-dependent default root folder path
fn default_root_folder() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join("smartshop"))
        .unwrap_or_else(|| PathBuf::from("/var/lib/smartshop"))
}

/// Detection backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    /// Delegate to a remote inference HTTP service
    Remote,
    /// Return fixed sample detections (testing / demos)
    Mock,
}

/// Application configuration, loaded from `{root}/config.toml` with
/// environment variable overrides for secrets. Every field has a default
/// so a missing or empty file yields a working configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// HTTP bind host
    pub host: String,
    /// HTTP bind port
    pub port: u16,
    /// Detection backend (remote inference service or mock fixtures)
    pub detection_mode: DetectionMode,
    /// Base URL of the remote detector inference service
    pub detector_url: Option<String>,
    /// Default minimum detection confidence threshold
    pub min_confidence: f32,
    /// Gemini API key for vision OCR (env override: GEMINI_API_KEY)
    pub gemini_api_key: Option<String>,
    /// Gemini model name for vision tasks
    pub gemini_model: String,
    /// Enable/disable TTS audio generation
    pub tts_enabled: bool,
    /// Default TTS language code
    pub tts_language: String,
    /// Audio storage directory, relative to the root folder
    pub audio_dir: String,
    /// Database file name, relative to the root folder
    pub database_file: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8000,
            detection_mode: DetectionMode::Remote,
            detector_url: None,
            min_confidence: 0.25,
            gemini_api_key: None,
            gemini_model: "gemini-2.0-flash".to_string(),
            tts_enabled: true,
            tts_language: "en".to_string(),
            audio_dir: "audio".to_string(),
            database_file: "smartshop.db".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `{root}/config.toml`, falling back to
    /// defaults when the file is absent, then apply environment overrides.
    pub fn load(root_folder: &Path) -> Result<Self> {
        let config_path = root_folder.join("config.toml");

        let mut config = if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content)
                .map_err(|e| Error::Config(format!("Invalid config file: {}", e)))?
        } else {
            Config::default()
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Environment overrides for values that should not live in the
    /// config file (secrets) or need per-deployment adjustment.
    fn apply_env_overrides(&mut self) {
        if let Ok(key) = std::env::var("GEMINI_API_KEY") {
            if !key.is_empty() {
                self.gemini_api_key = Some(key);
            }
        }
        if let Ok(url) = std::env::var("SMARTSHOP_DETECTOR_URL") {
            if !url.is_empty() {
                self.detector_url = Some(url);
            }
        }
    }

    /// Full path to the SQLite database file
    pub fn database_path(&self, root_folder: &Path) -> PathBuf {
        root_folder.join(&self.database_file)
    }

    /// Full path to the audio storage directory
    pub fn audio_path(&self, root_folder: &Path) -> PathBuf {
        root_folder.join(&self.audio_dir)
    }

    /// Socket address string for the HTTP listener
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Ensure the root folder and audio storage directory exist
    pub fn ensure_directories(&self, root_folder: &Path) -> Result<()> {
        std::fs::create_dir_all(root_folder)?;
        std::fs::create_dir_all(self.audio_path(root_folder))?;
        Ok(())
    }
}
