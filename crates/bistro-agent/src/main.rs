//! Bistro assistant: interactive terminal front-end.
//!
//! Reads one utterance per line from stdin and prints the phrased reply.
//! `:speak` reads the last reply aloud (writes a WAV file), `:listen`
//! takes the next utterance from the microphone (built with the
//! `microphone` feature), `:quit` exits.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

use bistro_agent::config::AgentConfig;
use bistro_agent::{AssistantError, HuggingFaceTts, OllamaClient, Orchestrator, Session};
use bistro_tables::TableInventory;

/// Shown when the generator is unavailable; details go to the logs.
const FAILURE_NOTICE: &str = "Désolé, le service est momentanément indisponible. Réessayez plus tard.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .with_writer(std::io::stderr)
        .init();

    tracing::info!(version = env!("CARGO_PKG_VERSION"), "bistro-agent starting");

    // ── Load config ─────────────────────────────────────────────
    let config = match std::env::args().nth(1) {
        Some(path) => AgentConfig::from_file(&path)?,
        None => AgentConfig::default(),
    };

    // ── Table inventory (fatal if missing or malformed) ─────────
    let inventory = Arc::new(TableInventory::from_file(&config.tables_path)?);

    // ── Text generator ──────────────────────────────────────────
    tracing::info!(
        host = %config.ollama.host,
        model = %config.ollama.model,
        extraction = ?config.extraction,
        "ollama text generator configured"
    );
    let generator = Arc::new(OllamaClient::new(config.ollama.clone())?);
    let orchestrator = Arc::new(Orchestrator::new(generator, inventory, config.extraction));

    let tts = Arc::new(HuggingFaceTts::new(config.tts.clone())?);
    #[allow(unused_mut)]
    let mut session = Session::new(orchestrator).with_text_to_speech(tts);

    // ── Microphone input ────────────────────────────────────────
    #[cfg(feature = "microphone")]
    {
        use bistro_agent::capture::CpalCapture;
        use bistro_agent::session::DEFAULT_LISTEN;
        use bistro_agent::{MicrophoneStt, WhisperClient};

        let stt = MicrophoneStt::new(
            Arc::new(CpalCapture::new()),
            WhisperClient::new(config.stt.clone())?,
        );
        session = session.with_speech_to_text(Arc::new(stt), DEFAULT_LISTEN);
        tracing::info!(endpoint = %config.stt.endpoint, "microphone input enabled");
    }

    tracing::info!("bistro-agent ready");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        match line {
            "" => continue,
            ":quit" | ":q" => break,
            ":listen" => match session.listen().await {
                Ok(Some(resp)) => println!("Assistant : {}", resp.assistant_text),
                Ok(None) => println!("Je n'ai rien entendu, pouvez-vous répéter ?"),
                Err(AssistantError::Speech(e)) => {
                    tracing::warn!(error = %e, "voice input failed");
                    println!("Micro indisponible, tapez votre message.");
                }
                Err(e) => {
                    tracing::error!(error = %e, "turn failed");
                    println!("{FAILURE_NOTICE}");
                }
            },
            ":speak" => match session.speak_last().await {
                Ok(Some(path)) => println!("🔊 {}", path.display()),
                Ok(None) => println!("Rien à lire pour l'instant."),
                Err(e) => {
                    tracing::error!(error = %e, "speech synthesis failed");
                    println!("{FAILURE_NOTICE}");
                }
            },
            text => match session.send_text(text).await {
                Ok(resp) => println!("Assistant : {}", resp.assistant_text),
                Err(e) => {
                    tracing::error!(error = %e, "turn failed");
                    println!("{FAILURE_NOTICE}");
                }
            },
        }
    }

    tracing::info!("bistro-agent stopped");
    Ok(())
}
