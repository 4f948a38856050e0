//! Application state shared across all route handlers.
//!
//! AppState holds the configuration and the long-lived engine handles. It
//! is passed to handlers via axum's State extractor. The engines are
//! initialized once at startup and read-only afterwards; per-request data
//! (documents, mask sets, answer keys) is never stored here.

use std::sync::Arc;
use std::time::Instant;

use cloze_annotate::Annotator;
use cloze_core::config::ClozeConfig;
use cloze_speech::SpeechToText;

/// Shared application state.
///
/// All fields use `Arc` for cheap cloning across handler tasks.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration, fixed after startup.
    pub config: Arc<ClozeConfig>,
    /// Annotation engine handle.
    pub annotator: Arc<dyn Annotator>,
    /// Speech-to-text engine handle.
    pub speech: Arc<dyn SpeechToText>,
    /// Server start time for uptime calculation.
    pub start_time: Instant,
}

impl AppState {
    /// Create a new AppState with the given engines.
    pub fn new(
        config: ClozeConfig,
        annotator: Arc<dyn Annotator>,
        speech: Arc<dyn SpeechToText>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            annotator,
            speech,
            start_time: Instant::now(),
        }
    }
}
