//! Domain types shared across the Cloze crates.
//!
//! Word-level annotations arrive from the external NLP engine as a
//! [`Document`]; the exercise crate consumes them to build masked text and
//! answer keys. All of these structures are request-scoped and never
//! persisted.

use serde::{Deserialize, Serialize};

/// Universal Dependencies coarse part-of-speech tag.
///
/// This is the full UD tag set the annotation engine can emit. Only a
/// 14-tag subset (see [`PosTag::RECOGNIZED`]) is accepted from user input
/// as a masking category; `Intj`, `Part`, and `X` can appear on annotated
/// words but are never maskable by tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PosTag {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
}

impl PosTag {
    /// The recognized masking vocabulary: the tags a caller may select as
    /// mask categories. Checkbox values outside this set are dropped.
    pub const RECOGNIZED: [PosTag; 14] = [
        PosTag::Adj,
        PosTag::Adp,
        PosTag::Adv,
        PosTag::Aux,
        PosTag::Cconj,
        PosTag::Det,
        PosTag::Noun,
        PosTag::Num,
        PosTag::Pron,
        PosTag::Propn,
        PosTag::Verb,
        PosTag::Punct,
        PosTag::Sconj,
        PosTag::Sym,
    ];

    /// The canonical UD string for this tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            PosTag::Adj => "ADJ",
            PosTag::Adp => "ADP",
            PosTag::Adv => "ADV",
            PosTag::Aux => "AUX",
            PosTag::Cconj => "CCONJ",
            PosTag::Det => "DET",
            PosTag::Intj => "INTJ",
            PosTag::Noun => "NOUN",
            PosTag::Num => "NUM",
            PosTag::Part => "PART",
            PosTag::Pron => "PRON",
            PosTag::Propn => "PROPN",
            PosTag::Punct => "PUNCT",
            PosTag::Sconj => "SCONJ",
            PosTag::Sym => "SYM",
            PosTag::Verb => "VERB",
            PosTag::X => "X",
        }
    }

    /// Parse a UD tag string. Case-sensitive; returns `None` for anything
    /// that is not an exact tag name.
    pub fn parse(s: &str) -> Option<PosTag> {
        match s {
            "ADJ" => Some(PosTag::Adj),
            "ADP" => Some(PosTag::Adp),
            "ADV" => Some(PosTag::Adv),
            "AUX" => Some(PosTag::Aux),
            "CCONJ" => Some(PosTag::Cconj),
            "DET" => Some(PosTag::Det),
            "INTJ" => Some(PosTag::Intj),
            "NOUN" => Some(PosTag::Noun),
            "NUM" => Some(PosTag::Num),
            "PART" => Some(PosTag::Part),
            "PRON" => Some(PosTag::Pron),
            "PROPN" => Some(PosTag::Propn),
            "PUNCT" => Some(PosTag::Punct),
            "SCONJ" => Some(PosTag::Sconj),
            "SYM" => Some(PosTag::Sym),
            "VERB" => Some(PosTag::Verb),
            "X" => Some(PosTag::X),
            _ => None,
        }
    }

    /// Whether this tag is part of the recognized masking vocabulary.
    pub fn is_recognized(&self) -> bool {
        Self::RECOGNIZED.contains(self)
    }
}

impl std::fmt::Display for PosTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single annotated word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Word {
    /// Surface form as it appeared in the input.
    pub text: String,
    /// Coarse part-of-speech tag.
    pub tag: PosTag,
    /// Dependency relation label (e.g., "nsubj", "root").
    pub relation: String,
    /// 1-based position of the syntactic head within the sentence;
    /// 0 means this word is the root.
    pub head: usize,
}

/// An ordered sequence of words. Order is significant and preserved in all
/// downstream output.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub words: Vec<Word>,
}

/// An ordered sequence of sentences, produced fresh per request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub sentences: Vec<Sentence>,
}

/// One entry in a dependency listing: a word, its relation, and the surface
/// text of its head (`None` for the root).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Dependency {
    pub text: String,
    pub relation: String,
    pub head: Option<String>,
}

impl Document {
    /// Iterate all words in document order (sentence order, then word order).
    pub fn words(&self) -> impl Iterator<Item = &Word> {
        self.sentences.iter().flat_map(|s| s.words.iter())
    }

    pub fn is_empty(&self) -> bool {
        self.sentences.iter().all(|s| s.words.is_empty())
    }

    /// Flatten the document into a dependency listing, resolving each head
    /// index to the head word's text within its sentence.
    ///
    /// A head index of 0 marks the sentence root and resolves to `None`;
    /// an out-of-range index (malformed annotation) also resolves to `None`
    /// rather than failing the request.
    pub fn dependencies(&self) -> Vec<Dependency> {
        let mut out = Vec::new();
        for sentence in &self.sentences {
            for word in &sentence.words {
                let head = if word.head > 0 {
                    sentence.words.get(word.head - 1).map(|w| w.text.clone())
                } else {
                    None
                };
                out.push(Dependency {
                    text: word.text.clone(),
                    relation: word.relation.clone(),
                    head,
                });
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn word(text: &str, tag: PosTag, relation: &str, head: usize) -> Word {
        Word {
            text: text.to_string(),
            tag,
            relation: relation.to_string(),
            head,
        }
    }

    #[test]
    fn test_pos_tag_round_trip() {
        for tag in [
            PosTag::Adj,
            PosTag::Adp,
            PosTag::Adv,
            PosTag::Aux,
            PosTag::Cconj,
            PosTag::Det,
            PosTag::Intj,
            PosTag::Noun,
            PosTag::Num,
            PosTag::Part,
            PosTag::Pron,
            PosTag::Propn,
            PosTag::Punct,
            PosTag::Sconj,
            PosTag::Sym,
            PosTag::Verb,
            PosTag::X,
        ] {
            assert_eq!(PosTag::parse(tag.as_str()), Some(tag));
        }
    }

    #[test]
    fn test_pos_tag_parse_rejects_unknown() {
        assert_eq!(PosTag::parse("VB"), None);
        assert_eq!(PosTag::parse("VBZ"), None);
        assert_eq!(PosTag::parse("noun"), None);
        assert_eq!(PosTag::parse(""), None);
        assert_eq!(PosTag::parse("NOUN "), None);
    }

    #[test]
    fn test_recognized_vocabulary() {
        assert_eq!(PosTag::RECOGNIZED.len(), 14);
        assert!(PosTag::Noun.is_recognized());
        assert!(PosTag::Verb.is_recognized());
        // Full UD set members outside the masking vocabulary.
        assert!(!PosTag::Intj.is_recognized());
        assert!(!PosTag::Part.is_recognized());
        assert!(!PosTag::X.is_recognized());
    }

    #[test]
    fn test_pos_tag_serde_uses_ud_names() {
        let json = serde_json::to_string(&PosTag::Cconj).unwrap();
        assert_eq!(json, "\"CCONJ\"");
        let tag: PosTag = serde_json::from_str("\"PROPN\"").unwrap();
        assert_eq!(tag, PosTag::Propn);
    }

    #[test]
    fn test_document_words_order() {
        let doc = Document {
            sentences: vec![
                Sentence {
                    words: vec![
                        word("The", PosTag::Det, "det", 2),
                        word("cat", PosTag::Noun, "root", 0),
                    ],
                },
                Sentence {
                    words: vec![word("sat", PosTag::Verb, "root", 0)],
                },
            ],
        };

        let texts: Vec<&str> = doc.words().map(|w| w.text.as_str()).collect();
        assert_eq!(texts, vec!["The", "cat", "sat"]);
        assert!(!doc.is_empty());
    }

    #[test]
    fn test_dependencies_resolve_heads() {
        let doc = Document {
            sentences: vec![Sentence {
                words: vec![
                    word("The", PosTag::Det, "det", 2),
                    word("cat", PosTag::Noun, "nsubj", 3),
                    word("sat", PosTag::Verb, "root", 0),
                ],
            }],
        };

        let deps = doc.dependencies();
        assert_eq!(deps.len(), 3);
        assert_eq!(deps[0].head.as_deref(), Some("cat"));
        assert_eq!(deps[1].head.as_deref(), Some("sat"));
        assert_eq!(deps[2].head, None);
        assert_eq!(deps[2].relation, "root");
    }

    #[test]
    fn test_dependencies_out_of_range_head_is_none() {
        let doc = Document {
            sentences: vec![Sentence {
                words: vec![word("lone", PosTag::Noun, "dep", 9)],
            }],
        };
        assert_eq!(doc.dependencies()[0].head, None);
    }

    #[test]
    fn test_empty_document() {
        let doc = Document::default();
        assert!(doc.is_empty());
        assert!(doc.dependencies().is_empty());
        assert_eq!(doc.words().count(), 0);
    }
}
