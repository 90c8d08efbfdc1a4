//! Bistro assistant — library crate for the restaurant conversation core.
//!
//! Re-exports all modules so the binaries (`bistro-agent`, `bistro-api`) and
//! external crates (e.g. `bistro-e2e-tests`) can reach `Orchestrator`,
//! `OllamaClient`, and the test doubles in `mock`.

#[cfg(feature = "microphone")]
pub mod capture;
pub mod config;
pub mod error;
pub mod extraction;
pub mod intent;
pub mod llm;
pub mod mock;
pub mod orchestrator;
pub mod prompts;
pub mod quantity;
pub mod session;
pub mod speech;

pub use error::{AssistantError, AssistantResult};
pub use intent::IntentClassifier;
pub use llm::{OllamaClient, OllamaConfig, TextGenerator};
pub use mock::{MockTextToSpeech, ScriptedCapture, ScriptedGenerator, ScriptedSpeechToText};
pub use orchestrator::Orchestrator;
pub use quantity::QuantityExtractor;
pub use session::Session;
pub use speech::{
    AudioCapture, AudioClip, HuggingFaceTts, MicrophoneStt, SpeechToText, SttConfig, TextToSpeech,
    TtsConfig, WhisperClient,
};
