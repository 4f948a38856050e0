//! Cloze speech crate - speech-to-text boundary.
//!
//! Provides a trait-based abstraction for transcribing an uploaded audio
//! file, a whisper.cpp implementation behind the `whisper` feature, and a
//! mock for testing without a loaded model.

pub mod whisper;

use std::path::Path;

use async_trait::async_trait;

use cloze_core::error::ClozeError;

pub use whisper::WhisperTranscriber;

/// The result of a transcription operation.
#[derive(Debug, Clone)]
pub struct Transcription {
    /// Full recognized text.
    pub text: String,
    /// Detected or configured language.
    pub language: String,
    /// Total audio duration in seconds.
    pub duration_secs: f32,
}

/// Service for transcribing an audio file to text.
///
/// The engine is a heavyweight process-wide singleton loaded once at
/// startup; implementations must be shareable behind
/// `Arc<dyn SpeechToText>`. The caller owns the audio file's lifecycle —
/// implementations only read it.
#[async_trait]
pub trait SpeechToText: Send + Sync {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription, ClozeError>;
}

/// Mock transcription service returning a canned result.
///
/// Used for testing and development without requiring a real model. A
/// failing variant exercises the error paths of callers.
#[derive(Debug, Clone)]
pub struct MockSpeechToText {
    text: String,
    fail: bool,
}

impl Default for MockSpeechToText {
    fn default() -> Self {
        Self::new()
    }
}

impl MockSpeechToText {
    pub fn new() -> Self {
        Self {
            text: "[mock transcription]".to_string(),
            fail: false,
        }
    }

    /// A mock that returns the given text.
    pub fn with_text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            fail: false,
        }
    }

    /// A mock whose transcribe call always fails.
    pub fn failing() -> Self {
        Self {
            text: String::new(),
            fail: true,
        }
    }
}

#[async_trait]
impl SpeechToText for MockSpeechToText {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription, ClozeError> {
        if self.fail {
            return Err(ClozeError::Transcription(
                "mock transcription failure".to_string(),
            ));
        }

        if !audio_path.exists() {
            return Err(ClozeError::Transcription(format!(
                "Audio file not found: {}",
                audio_path.display()
            )));
        }

        tracing::debug!(path = %audio_path.display(), "Mock transcription generated");

        Ok(Transcription {
            text: self.text.clone(),
            language: "en".to_string(),
            duration_secs: 0.0,
        })
    }
}
