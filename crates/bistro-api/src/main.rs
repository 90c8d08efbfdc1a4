//! Bistro API: HTTP front-end for the restaurant assistant.
//!
//! Loads the table inventory once, wires the Ollama text generator and
//! the TTS endpoint, and serves the conversation routes.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use bistro_agent::{HuggingFaceTts, OllamaClient, Orchestrator};
use bistro_api::config::ApiConfig;
use bistro_api::routes::build_router;
use bistro_api::state::AppState;
use bistro_tables::TableInventory;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bistro-api starting");

    let config = ApiConfig::from_env();

    // Inventory problems are fatal at startup.
    let inventory = Arc::new(TableInventory::from_file(&config.tables_path)?);

    tracing::info!(
        host = %config.ollama.host,
        model = %config.ollama.model,
        extraction = ?config.extraction,
        "ollama text generator configured"
    );
    let generator = Arc::new(OllamaClient::new(config.ollama.clone())?);
    let orchestrator = Arc::new(Orchestrator::new(generator, inventory, config.extraction));
    let tts = Arc::new(HuggingFaceTts::new(config.tts.clone())?);

    let state = AppState::new(orchestrator).with_text_to_speech(tts);
    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(addr = %addr, "listening");

    axum::serve(listener, app).await?;

    Ok(())
}
