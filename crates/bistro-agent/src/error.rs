//! Assistant error types.

use thiserror::Error;

/// Errors surfaced to callers of the assistant.
///
/// An unclear party size is not an error; it is `None` and leads to a
/// clarification question.
#[derive(Debug, Error)]
pub enum AssistantError {
    /// The external text generator failed or timed out. Never retried here.
    #[error("generation unavailable: {0}")]
    GenerationUnavailable(String),

    #[error("speech error: {0}")]
    Speech(String),
}

/// Convenience alias for assistant results.
pub type AssistantResult<T> = Result<T, AssistantError>;
