//! Test doubles for the external capabilities.
//!
//! Each records its calls for assertion. Thread-safe via `Mutex` (fine
//! for test contexts).

use std::collections::VecDeque;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use bistro_protocol::ChatMessage;

use crate::error::{AssistantError, AssistantResult};
use crate::llm::TextGenerator;
use crate::speech::{AudioCapture, AudioClip, SpeechToText, TextToSpeech};

/// A recorded generation request.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub messages: Vec<ChatMessage>,
    /// Whether the caller asked for JSON output.
    pub json: bool,
}

/// Text generator that replays scripted replies in order.
///
/// Once the script is exhausted it returns the fallback reply if one was
/// set, otherwise `GenerationUnavailable`.
pub struct ScriptedGenerator {
    replies: Mutex<VecDeque<AssistantResult<String>>>,
    fallback: Option<String>,
    requests: Mutex<Vec<RecordedRequest>>,
}

impl ScriptedGenerator {
    pub fn new(replies: Vec<AssistantResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            fallback: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always answer with `reply`.
    pub fn always(reply: impl Into<String>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            fallback: Some(reply.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// Always fail with `GenerationUnavailable`.
    pub fn unavailable() -> Self {
        Self::new(Vec::new())
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_reply(&self, messages: &[ChatMessage], json: bool) -> AssistantResult<String> {
        self.requests.lock().unwrap().push(RecordedRequest {
            messages: messages.to_vec(),
            json,
        });
        match self.replies.lock().unwrap().pop_front() {
            Some(reply) => reply,
            None => self.fallback.clone().ok_or_else(|| {
                AssistantError::GenerationUnavailable("no scripted reply left".into())
            }),
        }
    }
}

#[async_trait]
impl TextGenerator for ScriptedGenerator {
    async fn generate(&self, messages: &[ChatMessage]) -> AssistantResult<String> {
        self.next_reply(messages, false)
    }

    async fn generate_json(&self, messages: &[ChatMessage]) -> AssistantResult<String> {
        self.next_reply(messages, true)
    }
}

/// Speech-to-text double that returns scripted transcripts.
///
/// An exhausted script behaves like silence (empty transcript).
pub struct ScriptedSpeechToText {
    transcripts: Mutex<VecDeque<String>>,
    durations: Mutex<Vec<Duration>>,
}

impl ScriptedSpeechToText {
    pub fn new(transcripts: Vec<String>) -> Self {
        Self {
            transcripts: Mutex::new(transcripts.into()),
            durations: Mutex::new(Vec::new()),
        }
    }

    /// Capture durations requested so far.
    pub fn durations(&self) -> Vec<Duration> {
        self.durations.lock().unwrap().clone()
    }
}

#[async_trait]
impl SpeechToText for ScriptedSpeechToText {
    async fn transcribe(&self, duration: Duration) -> AssistantResult<String> {
        self.durations.lock().unwrap().push(duration);
        Ok(self.transcripts.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Capture double that replays scripted clips.
///
/// An exhausted script yields an empty (silent) clip.
pub struct ScriptedCapture {
    clips: Mutex<VecDeque<AudioClip>>,
    durations: Mutex<Vec<Duration>>,
}

impl ScriptedCapture {
    pub fn new(clips: Vec<AudioClip>) -> Self {
        Self {
            clips: Mutex::new(clips.into()),
            durations: Mutex::new(Vec::new()),
        }
    }

    pub fn durations(&self) -> Vec<Duration> {
        self.durations.lock().unwrap().clone()
    }
}

#[async_trait]
impl AudioCapture for ScriptedCapture {
    async fn record(&self, duration: Duration) -> AssistantResult<AudioClip> {
        self.durations.lock().unwrap().push(duration);
        Ok(self.clips.lock().unwrap().pop_front().unwrap_or_default())
    }
}

/// Text-to-speech double that records texts and returns fake paths.
pub struct MockTextToSpeech {
    spoken: Mutex<Vec<String>>,
}

impl MockTextToSpeech {
    pub fn new() -> Self {
        Self {
            spoken: Mutex::new(Vec::new()),
        }
    }

    /// Texts synthesized so far.
    pub fn spoken(&self) -> Vec<String> {
        self.spoken.lock().unwrap().clone()
    }
}

impl Default for MockTextToSpeech {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextToSpeech for MockTextToSpeech {
    async fn synthesize(&self, text: &str) -> AssistantResult<PathBuf> {
        let mut spoken = self.spoken.lock().unwrap();
        spoken.push(text.to_string());
        Ok(PathBuf::from(format!("/tmp/mock-tts-{}.wav", spoken.len())))
    }
}
