//! Tests for configuration loading and root folder resolution
//!
//! Note: Uses serial_test to prevent ENV variable race conditions. Tests
//! that manipulate SMARTSHOP_ROOT or GEMINI_API_KEY are marked #[serial].

use serial_test::serial;
use smartshop_common::config::{resolve_root_folder, Config, DetectionMode, ROOT_ENV_VAR};
use std::env;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn defaults_are_complete() {
    let config = Config::default();

    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.port, 8000);
    assert_eq!(config.detection_mode, DetectionMode::Remote);
    assert_eq!(config.detector_url, None);
    assert_eq!(config.min_confidence, 0.25);
    assert_eq!(config.gemini_model, "gemini-2.0-flash");
    assert!(config.tts_enabled);
    assert_eq!(config.tts_language, "en");
    assert_eq!(config.database_file, "smartshop.db");
}

#[test]
#[serial]
fn missing_config_file_yields_defaults() {
    env::remove_var("GEMINI_API_KEY");
    env::remove_var("SMARTSHOP_DETECTOR_URL");

    let dir = TempDir::new().unwrap();
    let config = Config::load(dir.path()).unwrap();

    assert_eq!(config.port, 8000);
    assert_eq!(config.gemini_api_key, None);
}

#[test]
#[serial]
fn config_file_overrides_defaults() {
    env::remove_var("GEMINI_API_KEY");
    env::remove_var("SMARTSHOP_DETECTOR_URL");

    let dir = TempDir::new().unwrap();
    std::fs::write(
        dir.path().join("config.toml"),
        r#"
port = 9090
detection_mode = "mock"
tts_enabled = false
"#,
    )
    .unwrap();

    let config = Config::load(dir.path()).unwrap();

    assert_eq!(config.port, 9090);
    assert_eq!(config.detection_mode, DetectionMode::Mock);
    assert!(!config.tts_enabled);
    // Unspecified keys keep their defaults
    assert_eq!(config.host, "0.0.0.0");
    assert_eq!(config.min_confidence, 0.25);
}

#[test]
#[serial]
fn invalid_config_file_is_an_error() {
    let dir = TempDir::new().unwrap();
    std::fs::write(dir.path().join("config.toml"), "port = \"not a number\"").unwrap();

    assert!(Config::load(dir.path()).is_err());
}

#[test]
#[serial]
fn env_overrides_api_key() {
    env::set_var("GEMINI_API_KEY", "test-key-123");
    env::remove_var("SMARTSHOP_DETECTOR_URL");

    let dir = TempDir::new().unwrap();
    let config = Config::load(dir.path()).unwrap();

    assert_eq!(config.gemini_api_key.as_deref(), Some("test-key-123"));

    env::remove_var("GEMINI_API_KEY");
}

#[test]
#[serial]
fn cli_argument_wins_root_resolution() {
    env::set_var(ROOT_ENV_VAR, "/tmp/from-env");

    let root = resolve_root_folder(Some("/tmp/from-cli"));
    assert_eq!(root, PathBuf::from("/tmp/from-cli"));

    env::remove_var(ROOT_ENV_VAR);
}

#[test]
#[serial]
fn env_var_used_when_no_cli_argument() {
    env::set_var(ROOT_ENV_VAR, "/tmp/from-env");

    let root = resolve_root_folder(None);
    assert_eq!(root, PathBuf::from("/tmp/from-env"));

    env::remove_var(ROOT_ENV_VAR);
}

#[test]
#[serial]
fn fallback_root_is_non_empty() {
    env::remove_var(ROOT_ENV_VAR);

    let root = resolve_root_folder(None);
    assert!(!root.as_os_str().is_empty());
}

#[test]
fn derived_paths_join_root() {
    let config = Config::default();
    let root = PathBuf::from("/srv/smartshop");

    assert_eq!(config.database_path(&root), PathBuf::from("/srv/smartshop/smartshop.db"));
    assert_eq!(config.audio_path(&root), PathBuf::from("/srv/smartshop/audio"));
    assert_eq!(config.bind_addr(), "0.0.0.0:8000");
}
