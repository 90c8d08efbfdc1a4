//! Assistant configuration, loadable from TOML.

use std::path::PathBuf;

use serde::Deserialize;

use crate::extraction::ExtractionMode;
use crate::llm::OllamaConfig;
use crate::speech::{SttConfig, TtsConfig};

/// Top-level configuration for the assistant.
#[derive(Debug, Clone, Deserialize)]
pub struct AgentConfig {
    /// Table inventory file, read once at startup.
    #[serde(default = "default_tables_path")]
    pub tables_path: PathBuf,
    /// How party sizes are extracted from reservation requests.
    #[serde(default)]
    pub extraction: ExtractionMode,
    /// Text generator settings.
    #[serde(default)]
    pub ollama: OllamaConfig,
    /// Text-to-speech settings.
    #[serde(default)]
    pub tts: TtsConfig,
    /// Speech-to-text settings, used for microphone input.
    #[serde(default)]
    pub stt: SttConfig,
}

fn default_tables_path() -> PathBuf {
    PathBuf::from("data/tables.json")
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            tables_path: default_tables_path(),
            extraction: ExtractionMode::default(),
            ollama: OllamaConfig::default(),
            tts: TtsConfig::default(),
            stt: SttConfig::default(),
        }
    }
}

impl AgentConfig {
    /// Load config from a TOML file path.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&contents)?;
        Ok(config)
    }
}
