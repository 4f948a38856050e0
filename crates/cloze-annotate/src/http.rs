//! HTTP client for a remote annotation server.
//!
//! The tagging/parsing engine runs out of process (it is a heavyweight
//! model); this client POSTs text to its JSON endpoint and maps the wire
//! payload into the core [`Document`] type.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use cloze_core::config::AnnotationConfig;
use cloze_core::error::ClozeError;
use cloze_core::types::{Document, PosTag, Sentence, Word};

use crate::Annotator;

/// Annotator backed by a remote annotation server.
///
/// Holds a pre-configured `reqwest::Client` with the per-request timeout
/// from config; the client is cheap to clone and reused across requests.
pub struct HttpAnnotator {
    client: reqwest::Client,
    endpoint: String,
    language: String,
}

#[derive(Debug, Serialize)]
struct AnnotateRequest<'a> {
    text: &'a str,
    language: &'a str,
}

#[derive(Debug, Deserialize)]
struct AnnotateResponse {
    sentences: Vec<SentencePayload>,
}

#[derive(Debug, Deserialize)]
struct SentencePayload {
    words: Vec<WordPayload>,
}

#[derive(Debug, Deserialize)]
struct WordPayload {
    text: String,
    upos: String,
    #[serde(default)]
    deprel: String,
    #[serde(default)]
    head: usize,
}

impl HttpAnnotator {
    /// Build an annotator from application config.
    ///
    /// A default (no-timeout) client is used as a last-resort fallback if
    /// the builder fails, which should not happen in practice.
    pub fn new(config: &AnnotationConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "Failed to build HTTP client, using default");
                reqwest::Client::new()
            });

        Self {
            client,
            endpoint: config.endpoint.clone(),
            language: config.language.clone(),
        }
    }
}

/// Map the wire payload into a [`Document`].
///
/// Tags the engine emits outside the UD set fall back to `X` rather than
/// failing the request.
fn into_document(payload: AnnotateResponse) -> Document {
    let sentences = payload
        .sentences
        .into_iter()
        .map(|s| Sentence {
            words: s
                .words
                .into_iter()
                .map(|w| {
                    let tag = PosTag::parse(&w.upos).unwrap_or_else(|| {
                        tracing::debug!(upos = %w.upos, "Unknown tag from annotation engine");
                        PosTag::X
                    });
                    Word {
                        text: w.text,
                        tag,
                        relation: w.deprel,
                        head: w.head,
                    }
                })
                .collect(),
        })
        .collect();

    Document { sentences }
}

#[async_trait]
impl Annotator for HttpAnnotator {
    async fn annotate(&self, text: &str) -> Result<Document, ClozeError> {
        let request = AnnotateRequest {
            text,
            language: &self.language,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| ClozeError::Annotation(format!("Request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| ClozeError::Annotation(format!("Engine returned error: {}", e)))?;

        let payload: AnnotateResponse = response
            .json()
            .await
            .map_err(|e| ClozeError::Annotation(format!("Malformed engine response: {}", e)))?;

        let doc = into_document(payload);
        tracing::debug!(
            sentences = doc.sentences.len(),
            words = doc.words().count(),
            "Text annotated"
        );
        Ok(doc)
    }
}
