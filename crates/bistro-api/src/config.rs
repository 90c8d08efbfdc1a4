//! API server configuration.

use std::path::PathBuf;

use bistro_agent::extraction::ExtractionMode;
use bistro_agent::{OllamaConfig, TtsConfig};

/// Top-level API server configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    /// Listen address (e.g., "0.0.0.0").
    pub host: String,
    /// Listen port.
    pub port: u16,
    /// Table inventory file, read once at startup.
    pub tables_path: PathBuf,
    pub extraction: ExtractionMode,
    pub ollama: OllamaConfig,
    pub tts: TtsConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

impl ApiConfig {
    /// Load config from environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();
        if let Some(host) = lookup("BISTRO_HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("BISTRO_PORT") {
            match port.parse() {
                Ok(p) => config.port = p,
                Err(_) => tracing::warn!(value = %port, "ignoring invalid BISTRO_PORT"),
            }
        }
        if let Some(path) = lookup("BISTRO_TABLES_PATH") {
            config.tables_path = PathBuf::from(path);
        }
        if let Some(mode) = lookup("BISTRO_EXTRACTION") {
            match mode.to_ascii_lowercase().as_str() {
                "rules" => config.extraction = ExtractionMode::Rules,
                "generator" => config.extraction = ExtractionMode::Generator,
                "tiered" => config.extraction = ExtractionMode::Tiered,
                _ => tracing::warn!(value = %mode, "ignoring invalid BISTRO_EXTRACTION"),
            }
        }
        if let Some(host) = lookup("OLLAMA_HOST") {
            config.ollama.host = host;
        }
        if let Some(model) = lookup("OLLAMA_MODEL") {
            config.ollama.model = model;
        }
        if let Some(token) = lookup("HF_TOKEN") {
            config.tts.token = token;
        }
        config
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            tables_path: PathBuf::from("data/tables.json"),
            extraction: ExtractionMode::default(),
            ollama: OllamaConfig::default(),
            tts: TtsConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn from_map(vars: &[(&str, &str)]) -> ApiConfig {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ApiConfig::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn default_config() {
        let config = ApiConfig::default();
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 3000);
        assert_eq!(config.tables_path, PathBuf::from("data/tables.json"));
        assert_eq!(config.extraction, ExtractionMode::Generator);
    }

    #[test]
    fn env_overrides() {
        let config = from_map(&[
            ("BISTRO_PORT", "8080"),
            ("BISTRO_TABLES_PATH", "/srv/tables.json"),
            ("BISTRO_EXTRACTION", "Tiered"),
            ("OLLAMA_HOST", "http://gpu-box:11434"),
            ("OLLAMA_MODEL", "mistral"),
            ("HF_TOKEN", "hf_abc"),
        ]);
        assert_eq!(config.port, 8080);
        assert_eq!(config.tables_path, PathBuf::from("/srv/tables.json"));
        assert_eq!(config.extraction, ExtractionMode::Tiered);
        assert_eq!(config.ollama.host, "http://gpu-box:11434");
        assert_eq!(config.ollama.model, "mistral");
        assert_eq!(config.tts.token, "hf_abc");
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let config = from_map(&[("BISTRO_PORT", "not-a-port"), ("BISTRO_EXTRACTION", "magic")]);
        assert_eq!(config.port, 3000);
        assert_eq!(config.extraction, ExtractionMode::Generator);
    }
}
