//! Per-user interactive session around a shared orchestrator.
//!
//! Front-ends own one `Session` per user. It keeps only the last reply
//! (for read-aloud); the orchestrator itself stays stateless.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use bistro_protocol::AssistantResponse;

use crate::error::{AssistantError, AssistantResult};
use crate::orchestrator::Orchestrator;
use crate::speech::{SpeechToText, TextToSpeech};

/// Default microphone capture length.
pub const DEFAULT_LISTEN: Duration = Duration::from_secs(4);

pub struct Session {
    orchestrator: Arc<Orchestrator>,
    stt: Option<Arc<dyn SpeechToText>>,
    tts: Option<Arc<dyn TextToSpeech>>,
    listen_for: Duration,
    last_reply: Option<String>,
}

impl Session {
    pub fn new(orchestrator: Arc<Orchestrator>) -> Self {
        Self {
            orchestrator,
            stt: None,
            tts: None,
            listen_for: DEFAULT_LISTEN,
            last_reply: None,
        }
    }

    pub fn with_speech_to_text(mut self, stt: Arc<dyn SpeechToText>, listen_for: Duration) -> Self {
        self.stt = Some(stt);
        self.listen_for = listen_for;
        self
    }

    pub fn with_text_to_speech(mut self, tts: Arc<dyn TextToSpeech>) -> Self {
        self.tts = Some(tts);
        self
    }

    pub fn last_reply(&self) -> Option<&str> {
        self.last_reply.as_deref()
    }

    /// Handle typed input.
    pub async fn send_text(&mut self, text: &str) -> AssistantResult<AssistantResponse> {
        let response = self.orchestrator.handle(text).await?;
        self.last_reply = Some(response.assistant_text.clone());
        Ok(response)
    }

    /// Capture speech and handle the transcript.
    ///
    /// Returns `Ok(None)` when nothing was heard; the caller should ask the
    /// user to repeat.
    pub async fn listen(&mut self) -> AssistantResult<Option<AssistantResponse>> {
        let stt = self
            .stt
            .clone()
            .ok_or_else(|| AssistantError::Speech("speech-to-text not configured".into()))?;

        let transcript = stt.transcribe(self.listen_for).await?;
        let transcript = transcript.trim();
        if transcript.is_empty() {
            tracing::debug!("silence captured, nothing to handle");
            return Ok(None);
        }

        self.send_text(transcript).await.map(Some)
    }

    /// Synthesize the last reply. `Ok(None)` when there is nothing to say yet.
    pub async fn speak_last(&self) -> AssistantResult<Option<PathBuf>> {
        let Some(text) = self.last_reply.as_deref() else {
            return Ok(None);
        };
        let tts = self
            .tts
            .as_ref()
            .ok_or_else(|| AssistantError::Speech("text-to-speech not configured".into()))?;
        tts.synthesize(text).await.map(Some)
    }
}
