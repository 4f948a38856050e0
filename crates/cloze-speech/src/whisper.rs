//! Whisper transcription via whisper-rs (whisper.cpp bindings).
//!
//! When compiled with the `whisper` feature, loads a GGML model file at
//! startup and runs speech-to-text inference on WAV audio read from disk.
//! Without the feature, provides a stub that fails at transcribe time so
//! the service can still run end to end.

use std::path::Path;

use async_trait::async_trait;

use cloze_core::config::SpeechConfig;
use cloze_core::error::ClozeError;

use crate::{SpeechToText, Transcription};

/// Whisper transcription service backed by whisper.cpp.
///
/// Holds a loaded model context reused across transcription calls.
pub struct WhisperTranscriber {
    #[cfg(feature = "whisper")]
    ctx: whisper_rs::WhisperContext,
    config: SpeechConfig,
}

impl WhisperTranscriber {
    /// Create a new transcriber by loading a GGML model file.
    ///
    /// # Errors
    /// Returns `ClozeError::Transcription` if the model file doesn't exist
    /// or fails to load.
    #[cfg(feature = "whisper")]
    pub fn new(config: &SpeechConfig) -> Result<Self, ClozeError> {
        use whisper_rs::{WhisperContext, WhisperContextParameters};

        let model_path = &config.model_path;
        if !Path::new(model_path).exists() {
            return Err(ClozeError::Transcription(format!(
                "Whisper model file not found: {}",
                model_path
            )));
        }

        tracing::info!(model = %model_path, lang = %config.language, "Loading Whisper model");

        let params = WhisperContextParameters::default();
        let ctx = WhisperContext::new_with_params(model_path, params).map_err(|e| {
            ClozeError::Transcription(format!("Failed to load Whisper model: {}", e))
        })?;

        tracing::info!("Whisper model loaded");
        Ok(Self {
            ctx,
            config: config.clone(),
        })
    }

    /// Stub constructor when the `whisper` feature is disabled.
    #[cfg(not(feature = "whisper"))]
    pub fn new(config: &SpeechConfig) -> Result<Self, ClozeError> {
        tracing::warn!(
            "WhisperTranscriber created without `whisper` feature — transcription will fail"
        );
        Ok(Self {
            config: config.clone(),
        })
    }

    /// Get a reference to the configuration.
    pub fn config(&self) -> &SpeechConfig {
        &self.config
    }
}

// ---------------------------------------------------------------------------
// Real implementation (whisper feature enabled)
// ---------------------------------------------------------------------------

#[cfg(feature = "whisper")]
#[async_trait]
impl SpeechToText for WhisperTranscriber {
    async fn transcribe(&self, audio_path: &Path) -> Result<Transcription, ClozeError> {
        use whisper_rs::{FullParams, SamplingStrategy};

        let samples = read_wav_mono(audio_path)?;
        if samples.is_empty() {
            return Err(ClozeError::Transcription(
                "Audio file contains no samples".into(),
            ));
        }

        let duration_secs = samples.len() as f32 / 16000.0;
        tracing::debug!(
            samples = samples.len(),
            duration_secs,
            "Starting Whisper transcription"
        );

        // Inference is synchronous — whisper.cpp is CPU-bound.
        let mut state = self.ctx.create_state().map_err(|e| {
            ClozeError::Transcription(format!("Failed to create Whisper state: {}", e))
        })?;

        let mut params = FullParams::new(SamplingStrategy::Greedy { best_of: 1 });

        let lang = if self.config.language == "auto" {
            None
        } else {
            Some(self.config.language.as_str())
        };
        params.set_language(lang);
        params.set_print_progress(false);
        params.set_print_realtime(false);
        params.set_print_timestamps(false);

        state
            .full(params, &samples)
            .map_err(|e| ClozeError::Transcription(format!("Whisper inference failed: {}", e)))?;

        let n_segments = state.full_n_segments().map_err(|e| {
            ClozeError::Transcription(format!("Failed to get segment count: {}", e))
        })?;

        let mut full_text = String::new();
        for i in 0..n_segments {
            let text = state.full_get_segment_text(i).map_err(|e| {
                ClozeError::Transcription(format!("Failed to get segment {} text: {}", i, e))
            })?;
            if !full_text.is_empty() {
                full_text.push(' ');
            }
            full_text.push_str(text.trim());
        }

        tracing::info!(
            segments = n_segments,
            text_len = full_text.len(),
            "Transcription complete"
        );

        Ok(Transcription {
            text: full_text,
            language: lang.unwrap_or("auto").to_string(),
            duration_secs,
        })
    }
}

// ---------------------------------------------------------------------------
// Stub implementation (whisper feature disabled)
// ---------------------------------------------------------------------------

#[cfg(not(feature = "whisper"))]
#[async_trait]
impl SpeechToText for WhisperTranscriber {
    async fn transcribe(&self, _audio_path: &Path) -> Result<Transcription, ClozeError> {
        Err(ClozeError::Transcription(
            "Whisper transcription requires the `whisper` feature to be enabled".into(),
        ))
    }
}

// ---------------------------------------------------------------------------
// WAV decoding
// ---------------------------------------------------------------------------

/// Read a WAV file into 16 kHz mono f32 samples.
///
/// Multi-channel audio is averaged to mono; other sample rates are linearly
/// resampled to the 16 kHz Whisper expects.
#[cfg(feature = "whisper")]
fn read_wav_mono(path: &Path) -> Result<Vec<f32>, ClozeError> {
    let reader = hound::WavReader::open(path)
        .map_err(|e| ClozeError::Transcription(format!("Failed to read WAV: {}", e)))?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|e| ClozeError::Transcription(format!("Bad WAV sample: {}", e)))?,
        hound::SampleFormat::Int => reader
            .into_samples::<i16>()
            .map(|s| s.map(|v| v as f32 / i16::MAX as f32))
            .collect::<Result<_, _>>()
            .map_err(|e| ClozeError::Transcription(format!("Bad WAV sample: {}", e)))?,
    };

    let mono: Vec<f32> = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect();

    if spec.sample_rate == 16000 {
        Ok(mono)
    } else {
        Ok(resample(&mono, spec.sample_rate, 16000))
    }
}

/// Simple linear resampling from one sample rate to another.
///
/// Linear interpolation is sufficient for Whisper input, which is already
/// low-frequency speech.
#[cfg(feature = "whisper")]
fn resample(input: &[f32], from_rate: u32, to_rate: u32) -> Vec<f32> {
    if from_rate == to_rate || input.is_empty() {
        return input.to_vec();
    }

    let ratio = from_rate as f64 / to_rate as f64;
    let output_len = (input.len() as f64 / ratio).ceil() as usize;
    let mut output = Vec::with_capacity(output_len);

    for i in 0..output_len {
        let src_idx = i as f64 * ratio;
        let idx0 = src_idx.floor() as usize;
        let idx1 = (idx0 + 1).min(input.len() - 1);
        let frac = (src_idx - idx0 as f64) as f32;

        let sample = input[idx0] * (1.0 - frac) + input[idx1] * frac;
        output.push(sample);
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transcriber_no_model_file() {
        let config = SpeechConfig {
            model_path: "/nonexistent/model.bin".to_string(),
            language: "en".to_string(),
        };
        let result = WhisperTranscriber::new(&config);
        // Without whisper feature: succeeds (stub). With: fails (no file).
        #[cfg(feature = "whisper")]
        assert!(result.is_err());
        #[cfg(not(feature = "whisper"))]
        assert!(result.is_ok());
    }

    #[cfg(not(feature = "whisper"))]
    #[tokio::test]
    async fn test_stub_transcribe_returns_error() {
        let service = WhisperTranscriber::new(&SpeechConfig::default()).unwrap();
        let result = service.transcribe(Path::new("/tmp/audio.wav")).await;
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("whisper"));
    }

    #[cfg(not(feature = "whisper"))]
    #[test]
    fn test_config_accessor() {
        let config = SpeechConfig {
            model_path: "/my/model.bin".to_string(),
            language: "auto".to_string(),
        };
        let service = WhisperTranscriber::new(&config).unwrap();
        assert_eq!(service.config().model_path, "/my/model.bin");
        assert_eq!(service.config().language, "auto");
    }
}
