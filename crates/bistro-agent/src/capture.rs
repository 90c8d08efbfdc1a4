//! Microphone capture through the default input device (cpal).

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};

use crate::error::{AssistantError, AssistantResult};
use crate::speech::{AudioCapture, AudioClip};

/// Records from the host's default input device, downmixed to mono.
#[derive(Debug, Default)]
pub struct CpalCapture;

impl CpalCapture {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AudioCapture for CpalCapture {
    async fn record(&self, duration: Duration) -> AssistantResult<AudioClip> {
        // cpal streams are not Send; keep the whole capture on one thread.
        tokio::task::spawn_blocking(move || record_blocking(duration))
            .await
            .map_err(|e| AssistantError::Speech(format!("capture task failed: {e}")))?
    }
}

fn record_blocking(duration: Duration) -> AssistantResult<AudioClip> {
    let device = cpal::default_host()
        .default_input_device()
        .ok_or_else(|| AssistantError::Speech("no input device".into()))?;
    let supported = device
        .default_input_config()
        .map_err(|e| AssistantError::Speech(format!("input config: {e}")))?;
    if supported.sample_format() != cpal::SampleFormat::F32 {
        return Err(AssistantError::Speech(format!(
            "unsupported sample format {:?}",
            supported.sample_format()
        )));
    }

    let config = supported.config();
    let channels = usize::from(config.channels.max(1));
    let sample_rate = config.sample_rate.0;

    let buffer = Arc::new(Mutex::new(Vec::<f32>::new()));
    let sink = buffer.clone();
    let stream = device
        .build_input_stream(
            &config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                if let Ok(mut buf) = sink.lock() {
                    buf.extend(
                        data.chunks(channels)
                            .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32),
                    );
                }
            },
            |err| tracing::warn!(error = %err, "input stream error"),
            None,
        )
        .map_err(|e| AssistantError::Speech(format!("input stream: {e}")))?;

    tracing::info!(secs = duration.as_secs_f32(), sample_rate, "recording");
    stream
        .play()
        .map_err(|e| AssistantError::Speech(format!("start capture: {e}")))?;
    std::thread::sleep(duration);
    drop(stream);

    let samples = buffer
        .lock()
        .map(|buf| buf.clone())
        .map_err(|_| AssistantError::Speech("capture buffer poisoned".into()))?;
    Ok(AudioClip::new(samples, sample_rate))
}
