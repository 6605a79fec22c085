// Main entry point for attendance-scan-server.
// Loads the OCR engine, builds the Axum router and serves it until shutdown.

mod config;
mod engine;
mod shutdown_signal;
mod web;

use clap::Parser;
use config::AppConfig;
use engine::{NativeEngine, SharedEngine, UnavailableEngine};
use shutdown_signal::shutdown_signal;
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let config = AppConfig::parse();

    tracing_subscriber::fmt()
        .with_max_level(config.log_level)
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting attendance-scan-server...");

    let engine: SharedEngine = match &config.engine_library {
        Some(path) => {
            tracing::info!("Loading OCR engine from {:?}", path);
            // Loading runs the library's initializers, which we have to trust.
            match unsafe { NativeEngine::load(path) } {
                Ok(engine) => {
                    let info = engine.info();
                    tracing::info!(
                        "OCR engine '{}' {} loaded from {:?}",
                        info.name,
                        info.version,
                        engine.path()
                    );
                    tracing::debug!("OCR engine description: {}", info.description);
                    Arc::new(engine)
                }
                Err(e) => {
                    tracing::error!("FATAL: {}", e);
                    std::process::exit(1);
                }
            }
        }
        None => {
            tracing::warn!(
                "No OCR engine library configured. Every scan will fail with a process error."
            );
            Arc::new(UnavailableEngine)
        }
    };

    let app = web::create_app(engine, config.max_upload_bytes);
    tracing::info!("Axum router configured.");

    let listener = match web::create_listener(&config.host, config.port).await {
        Ok((addr, listener)) => {
            tracing::info!("Server successfully bound. Listening on {}", addr);
            listener
        }
        Err(e) => {
            tracing::error!("FATAL: Failed to bind server: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        tracing::error!("Server run error: {}", e);
    }

    tracing::info!("attendance-scan-server has shut down.");
}
