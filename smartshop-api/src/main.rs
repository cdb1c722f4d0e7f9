//! smartshop-api - SmartShop AI backend server
//!
//! Thin orchestration service: forwards images to detection and OCR
//! models, fuses the results into a summary, optionally synthesizes
//! speech, and persists products and orders in SQLite.

use std::sync::Arc;

use anyhow::Result;
use clap::Parser;
use tracing::{error, info, warn};

use smartshop_api::services::{DetectorService, OcrService, TtsService};
use smartshop_api::{build_router, AppState};
use smartshop_common::config::{resolve_root_folder, Config, DetectionMode};
use smartshop_common::db::init_database;

#[derive(Debug, Parser)]
#[command(name = "smartshop-api", about = "SmartShop AI backend server")]
struct Args {
    /// Root folder for database, config, and audio storage
    #[arg(long)]
    root_folder: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    info!("Starting SmartShop backend (smartshop-api) v{}", env!("CARGO_PKG_VERSION"));

    // Root folder resolution: CLI > env > config file > OS default
    let root_folder = resolve_root_folder(args.root_folder.as_deref());
    info!("Root folder: {}", root_folder.display());

    let config = Config::load(&root_folder)?;
    config.ensure_directories(&root_folder)?;

    let db_path = config.database_path(&root_folder);
    info!("Database path: {}", db_path.display());

    let pool = match init_database(&db_path).await {
        Ok(pool) => {
            info!("✓ Database ready");
            pool
        }
        Err(e) => {
            error!("Failed to initialize database: {}", e);
            return Err(e.into());
        }
    };

    let config = Arc::new(config);

    // Construct adapter services (dependency-injected, no singletons)
    let detector = Arc::new(DetectorService::new(&config)?);
    match config.detection_mode {
        DetectionMode::Mock => info!("Running in MOCK detection mode"),
        DetectionMode::Remote => {
            if detector.is_loaded() {
                info!("✓ Remote detector configured");
            } else {
                warn!("Remote detector not configured - set detector_url or SMARTSHOP_DETECTOR_URL");
            }
        }
    }

    let ocr = Arc::new(OcrService::new(&config)?);
    if ocr.is_configured() {
        info!("✓ Gemini OCR configured (model: {})", config.gemini_model);
    } else {
        warn!("Gemini OCR not configured - OCR will return defaults");
    }

    let audio_path = config.audio_path(&root_folder);
    let tts = Arc::new(TtsService::new(&config, audio_path.clone())?);
    if tts.is_enabled() {
        info!("✓ TTS enabled, audio path: {}", audio_path.display());
    }

    let state = AppState::new(pool, config.clone(), detector, ocr, tts, audio_path);
    let app = build_router(state);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("smartshop-api listening on http://{}", bind_addr);
    info!("Health check: http://{}/api/v1/health", bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}
