//! Cloze application binary - composition root.
//!
//! Ties together all Cloze crates into a single executable:
//! 1. Parse CLI arguments and load configuration from TOML
//! 2. Initialize the annotation client and the speech-to-text engine
//! 3. Start the axum HTTP server serving the exercise page and JSON API

mod cli;

use std::sync::Arc;

use clap::Parser;

use cloze_annotate::HttpAnnotator;
use cloze_api::{create_router, AppState};
use cloze_core::config::ClozeConfig;
use cloze_speech::WhisperTranscriber;

use cli::CliArgs;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();

    // Config.
    let config_file = args.resolve_config_path();
    let mut config = ClozeConfig::load_or_default(&config_file);
    config.server.port = args.resolve_port(config.server.port);
    config.server.host = args.resolve_host(&config.server.host);
    config.general.log_level = args.resolve_log_level(&config.general.log_level);

    // Tracing.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.general.log_level)),
        )
        .init();

    tracing::info!("Starting Cloze v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(path = %config_file.display(), "Configuration loaded");

    // Annotation client.
    let annotator = HttpAnnotator::new(&config.annotation);
    tracing::info!(endpoint = %config.annotation.endpoint, "Annotation client ready");

    // Speech-to-text engine. A missing model is a startup error, not a
    // request-time surprise.
    let speech = WhisperTranscriber::new(&config.speech)?;
    tracing::info!(model = %config.speech.model_path, "Speech engine ready");

    // HTTP server.
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState::new(config, Arc::new(annotator), Arc::new(speech));
    let router = create_router(state);

    let listener = match tokio::net::TcpListener::bind(&addr).await {
        Ok(l) => l,
        Err(e) => {
            tracing::error!(addr = %addr, error = %e, "Failed to bind — is another instance running?");
            tracing::error!("Try: cloze --port {}", args.resolve_port(5001) + 1);
            return Err(e.into());
        }
    };

    tracing::info!(addr = %addr, "HTTP server listening");
    tracing::info!("Exercise page at http://{}/", addr);

    axum::serve(listener, router).await?;

    Ok(())
}
