//! Speech capabilities consumed as black boxes.
//!
//! The conversation core only ever sees text: `SpeechToText` hands back a
//! transcript (empty on silence) and `TextToSpeech` hands back the path of
//! a playable audio file.
//!
//! `MicrophoneStt` is the voice-input path: an `AudioCapture` records a
//! clip, silent clips are dropped, and the rest go to a Whisper endpoint.

use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::{AssistantError, AssistantResult};

/// Peak amplitude under which a capture counts as silence.
pub const SILENCE_THRESHOLD: f32 = 1e-4;

/// Capture audio for `duration` and transcribe it.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    /// Returns an empty string when nothing was heard.
    async fn transcribe(&self, duration: Duration) -> AssistantResult<String>;
}

/// Render text to an audio file.
#[async_trait]
pub trait TextToSpeech: Send + Sync {
    async fn synthesize(&self, text: &str) -> AssistantResult<PathBuf>;
}

/// True for an empty capture or one whose peak stays under the threshold.
pub fn is_silent(samples: &[f32]) -> bool {
    samples
        .iter()
        .map(|s| s.abs())
        .fold(0.0_f32, f32::max)
        < SILENCE_THRESHOLD
}

/// Mono PCM samples in `[-1.0, 1.0]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AudioClip {
    pub samples: Vec<f32>,
    pub sample_rate: u32,
}

impl AudioClip {
    pub fn new(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            samples,
            sample_rate,
        }
    }

    pub fn is_silent(&self) -> bool {
        is_silent(&self.samples)
    }

    /// Encode as a 16-bit mono PCM WAV file.
    pub fn to_wav(&self) -> Vec<u8> {
        let data_len = (self.samples.len() * 2) as u32;
        let mut out = Vec::with_capacity(44 + data_len as usize);
        out.extend_from_slice(b"RIFF");
        out.extend_from_slice(&(36 + data_len).to_le_bytes());
        out.extend_from_slice(b"WAVEfmt ");
        out.extend_from_slice(&16u32.to_le_bytes());
        out.extend_from_slice(&1u16.to_le_bytes()); // PCM
        out.extend_from_slice(&1u16.to_le_bytes()); // mono
        out.extend_from_slice(&self.sample_rate.to_le_bytes());
        out.extend_from_slice(&(self.sample_rate * 2).to_le_bytes());
        out.extend_from_slice(&2u16.to_le_bytes());
        out.extend_from_slice(&16u16.to_le_bytes());
        out.extend_from_slice(b"data");
        out.extend_from_slice(&data_len.to_le_bytes());
        for sample in &self.samples {
            let value = (sample.clamp(-1.0, 1.0) * f32::from(i16::MAX)) as i16;
            out.extend_from_slice(&value.to_le_bytes());
        }
        out
    }
}

/// Record audio from an input device.
#[async_trait]
pub trait AudioCapture: Send + Sync {
    async fn record(&self, duration: Duration) -> AssistantResult<AudioClip>;
}

/// Hosted speech-to-text (Whisper) endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct SttConfig {
    #[serde(default = "default_stt_endpoint")]
    pub endpoint: String,
    /// Bearer token; empty sends no Authorization header.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_stt_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_stt_endpoint() -> String {
    "https://api-inference.huggingface.co/models/openai/whisper-base".into()
}
fn default_stt_timeout_secs() -> u64 {
    60
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            endpoint: default_stt_endpoint(),
            token: String::new(),
            timeout_secs: default_stt_timeout_secs(),
        }
    }
}

#[derive(Deserialize)]
struct TranscriptionResponse {
    text: Option<String>,
}

/// Whisper transcription over a Hugging Face style inference endpoint.
///
/// Posts the clip as `audio/wav` and reads `{"text": ..}` back.
pub struct WhisperClient {
    client: reqwest::Client,
    config: SttConfig,
}

impl WhisperClient {
    pub fn new(config: SttConfig) -> AssistantResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssistantError::Speech(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    pub async fn transcribe_clip(&self, clip: &AudioClip) -> AssistantResult<String> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header(reqwest::header::CONTENT_TYPE, "audio/wav")
            .body(clip.to_wav());
        if !self.config.token.is_empty() {
            request = request.bearer_auth(&self.config.token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "stt request failed");
            AssistantError::Speech(format!("stt request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "stt endpoint returned non-200");
            return Err(AssistantError::Speech(format!("stt endpoint returned {status}")));
        }

        let body: TranscriptionResponse = response
            .json()
            .await
            .map_err(|e| AssistantError::Speech(format!("invalid stt response: {e}")))?;
        let text = body
            .text
            .ok_or_else(|| AssistantError::Speech("stt response has no text".into()))?;
        Ok(text.trim().to_string())
    }
}

/// Microphone input: capture, drop silence, transcribe.
pub struct MicrophoneStt {
    capture: Arc<dyn AudioCapture>,
    transcriber: WhisperClient,
}

impl MicrophoneStt {
    pub fn new(capture: Arc<dyn AudioCapture>, transcriber: WhisperClient) -> Self {
        Self {
            capture,
            transcriber,
        }
    }
}

#[async_trait]
impl SpeechToText for MicrophoneStt {
    async fn transcribe(&self, duration: Duration) -> AssistantResult<String> {
        let clip = self.capture.record(duration).await?;
        if clip.is_silent() {
            tracing::info!(samples = clip.samples.len(), "silent capture, not transcribing");
            return Ok(String::new());
        }

        let text = self.transcriber.transcribe_clip(&clip).await?;
        tracing::debug!(text = %text, "speech transcribed");
        Ok(text)
    }
}

/// Hosted text-to-speech inference endpoint settings.
#[derive(Debug, Clone, Deserialize)]
pub struct TtsConfig {
    /// Inference URL for the TTS model.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Bearer token; empty sends no Authorization header.
    #[serde(default)]
    pub token: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Where audio files are written. Defaults to the system temp dir.
    #[serde(default)]
    pub output_dir: Option<PathBuf>,
}

fn default_endpoint() -> String {
    "https://api-inference.huggingface.co/models/facebook/mms-tts-fra".into()
}
fn default_timeout_secs() -> u64 {
    30
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
            output_dir: None,
        }
    }
}

#[derive(Serialize)]
struct TtsRequest<'a> {
    inputs: &'a str,
}

/// Text-to-speech over a Hugging Face style inference endpoint.
///
/// The endpoint answers with raw WAV bytes which are persisted to a temp
/// file the caller owns.
pub struct HuggingFaceTts {
    client: reqwest::Client,
    config: TtsConfig,
}

impl HuggingFaceTts {
    pub fn new(config: TtsConfig) -> AssistantResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| AssistantError::Speech(format!("failed to build http client: {e}")))?;
        Ok(Self { client, config })
    }

    fn persist(&self, audio: &[u8]) -> AssistantResult<PathBuf> {
        let mut builder = tempfile::Builder::new();
        builder.prefix("bistro-tts-").suffix(".wav");
        let file = match &self.config.output_dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        };
        let mut file = file.map_err(|e| AssistantError::Speech(format!("temp file: {e}")))?;
        file.write_all(audio)
            .map_err(|e| AssistantError::Speech(format!("write audio: {e}")))?;
        let (_, path) = file
            .keep()
            .map_err(|e| AssistantError::Speech(format!("persist audio: {e}")))?;
        Ok(path)
    }
}

#[async_trait]
impl TextToSpeech for HuggingFaceTts {
    async fn synthesize(&self, text: &str) -> AssistantResult<PathBuf> {
        let mut request = self
            .client
            .post(&self.config.endpoint)
            .json(&TtsRequest { inputs: text });
        if !self.config.token.is_empty() {
            request = request.bearer_auth(&self.config.token);
        }

        let response = request.send().await.map_err(|e| {
            tracing::warn!(error = %e, "tts request failed");
            AssistantError::Speech(format!("tts request failed: {e}"))
        })?;

        if !response.status().is_success() {
            let status = response.status();
            tracing::warn!(status = %status, "tts endpoint returned non-200");
            return Err(AssistantError::Speech(format!("tts endpoint returned {status}")));
        }

        let audio = response
            .bytes()
            .await
            .map_err(|e| AssistantError::Speech(format!("tts body: {e}")))?;
        if audio.is_empty() {
            return Err(AssistantError::Speech("tts endpoint returned no audio".into()));
        }

        let path = self.persist(&audio)?;
        tracing::debug!(path = %path.display(), bytes = audio.len(), "speech synthesized");
        Ok(path)
    }
}
