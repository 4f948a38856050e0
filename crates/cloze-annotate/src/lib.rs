//! Cloze annotation crate - the boundary to the external NLP engine.
//!
//! Provides a trait-based abstraction over part-of-speech tagging and
//! dependency parsing, an HTTP client implementation for a remote annotation
//! server, and a lexicon-driven mock for testing without a running engine.

pub mod http;

use std::collections::HashMap;

use async_trait::async_trait;

use cloze_core::error::ClozeError;
use cloze_core::types::{Document, PosTag, Sentence, Word};

pub use http::HttpAnnotator;

/// Service producing word-level annotations for raw text.
///
/// Given input text, returns an ordered sequence of sentences, each an
/// ordered sequence of words carrying a surface form, a coarse tag, and a
/// dependency relation plus head index. The engine is a process-wide
/// singleton initialized once at startup; implementations must be shareable
/// behind `Arc<dyn Annotator>`.
#[async_trait]
pub trait Annotator: Send + Sync {
    /// Annotate raw text into a [`Document`].
    ///
    /// A failure here is a total failure of the calling request; there is
    /// no partial-document mode.
    async fn annotate(&self, text: &str) -> Result<Document, ClozeError>;
}

/// Mock annotator driven by a word lexicon.
///
/// Tokenizes on whitespace, splits off trailing sentence punctuation as
/// PUNCT words, and tags each word from the lexicon (default
/// [`PosTag::X`] for unknown words). The first word of each sentence is the
/// root; every other word depends on it. Deterministic, so tests against
/// the page pipeline are reproducible.
#[derive(Debug, Clone, Default)]
pub struct MockAnnotator {
    lexicon: HashMap<String, PosTag>,
}

impl MockAnnotator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a mock with known word/tag pairs.
    pub fn with_tags<'a, I>(tags: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, PosTag)>,
    {
        Self {
            lexicon: tags
                .into_iter()
                .map(|(w, t)| (w.to_string(), t))
                .collect(),
        }
    }

    fn tag_of(&self, word: &str) -> PosTag {
        self.lexicon.get(word).copied().unwrap_or(PosTag::X)
    }
}

#[async_trait]
impl Annotator for MockAnnotator {
    async fn annotate(&self, text: &str) -> Result<Document, ClozeError> {
        let mut sentences = Vec::new();
        let mut words: Vec<Word> = Vec::new();

        for token in text.split_whitespace() {
            let (core, punct) = match token.strip_suffix(['.', '!', '?']) {
                Some(stripped) if !stripped.is_empty() => {
                    (stripped, Some(&token[stripped.len()..]))
                }
                _ => (token, None),
            };

            let head = if words.is_empty() { 0 } else { 1 };
            let relation = if head == 0 { "root" } else { "dep" };
            words.push(Word {
                text: core.to_string(),
                tag: self.tag_of(core),
                relation: relation.to_string(),
                head,
            });

            if let Some(p) = punct {
                words.push(Word {
                    text: p.to_string(),
                    tag: PosTag::Punct,
                    relation: "punct".to_string(),
                    head: 1,
                });
                sentences.push(Sentence {
                    words: std::mem::take(&mut words),
                });
            }
        }

        if !words.is_empty() {
            sentences.push(Sentence { words });
        }

        Ok(Document { sentences })
    }
}
