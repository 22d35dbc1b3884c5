//! Speech-to-text collaborator seam.
//!
//! The meeting session treats transcription as an opaque producer of
//! text updates: a recognizer is started, yields progressively longer
//! transcripts over a channel, and is stopped when the meeting ends.
//! Failures never reach the session as errors — they arrive as a
//! terminal [`RecognizerUpdate::Failed`] item and the meeting keeps
//! going without a transcript.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecognizerError {
    #[error("microphone or speech access denied")]
    AccessDenied,
    #[error("speech recognizer unavailable: {0}")]
    Unavailable(String),
    #[error("transcribing audio failed: {0}")]
    TranscriptionFailed(String),
}

/// One item from a running recognizer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerUpdate {
    /// The latest full transcript so far.
    Transcript(String),
    /// The recognizer gave up; no more updates follow.
    Failed(RecognizerError),
}

/// Receiving side of a recognizer's update stream. Closes when the
/// recognizer is stopped or fails.
pub type RecognizerUpdates = mpsc::UnboundedReceiver<RecognizerUpdate>;

/// Trait for speech-to-text backends the session can record with.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Begin transcribing and return the update stream.
    async fn start(&self) -> Result<RecognizerUpdates, RecognizerError>;

    /// Stop transcribing and close the update stream. Idempotent.
    async fn stop(&self);
}

/// Recognizer used when speech-to-text is disabled or unsupported:
/// starts successfully and produces no text.
pub struct NullRecognizer;

#[async_trait]
impl SpeechRecognizer for NullRecognizer {
    async fn start(&self) -> Result<RecognizerUpdates, RecognizerError> {
        let (_tx, rx) = mpsc::unbounded_channel();
        Ok(rx)
    }

    async fn stop(&self) {}
}
