//! The masking engine: document traversal, placeholder emission, and
//! answer-key construction.

use std::collections::BTreeMap;

use cloze_core::types::Document;

use crate::filter::MaskSet;

/// Mapping from 1-based blank index (assigned in document order) to the
/// original word text that was masked.
pub type AnswerKey = BTreeMap<u32, String>;

/// The output of [`mask`]: the cloze-formatted text and its answer key.
///
/// The two are always in bijection: every index in `answer_key` appears
/// exactly once in `text` as a `(n)` placeholder, and vice versa.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaskedExercise {
    pub text: String,
    pub answer_key: AnswerKey,
}

/// English contraction forms masked regardless of tag when the contraction
/// policy is enabled. Matching is case-sensitive; any word containing the
/// substring `n't` is covered by a separate rule.
const CONTRACTIONS: &[&str] = &[
    "can't",
    "won't",
    "wouldn't",
    "shouldn't",
    "mustn't",
    "couldn't",
    "didn't",
    "isn't",
    "aren't",
    "wasn't",
    "weren't",
    "haven't",
    "hasn't",
    "hadn't",
    "it's",
    "that's",
    "they're",
    "you're",
    "we're",
    "I'll",
    "he'll",
    "she'll",
    "you'll",
    "they'll",
];

fn is_contraction(text: &str) -> bool {
    CONTRACTIONS.contains(&text) || text.contains("n't")
}

/// Mask the selected parts of speech in a document.
///
/// Sentences are processed in order, words within each sentence in order.
/// A word is masked when its tag is in `mask_set`, or — with
/// `mask_contractions` enabled — when its surface text is a known
/// contraction form, independently of its tag. Masked words are replaced by
/// `(n)` placeholders numbered from 1 across the whole document (the counter
/// never resets per sentence), and recorded in the answer key under the same
/// index.
///
/// All emitted tokens are joined with single spaces; sentence boundaries are
/// not marked in the output. With an empty `mask_set` (and the contraction
/// policy off) the output text is the space-joined original words verbatim.
///
/// Pure function of its inputs; no side effects.
pub fn mask(document: &Document, mask_set: &MaskSet, mask_contractions: bool) -> MaskedExercise {
    let mut tokens: Vec<String> = Vec::new();
    let mut answer_key = AnswerKey::new();
    let mut counter: u32 = 1;

    for sentence in &document.sentences {
        for word in &sentence.words {
            let masked = mask_set.contains(&word.tag)
                || (mask_contractions && is_contraction(&word.text));
            if masked {
                tokens.push(format!("({})", counter));
                answer_key.insert(counter, word.text.clone());
                counter += 1;
            } else {
                tokens.push(word.text.clone());
            }
        }
    }

    tracing::debug!(
        words = tokens.len(),
        blanks = answer_key.len(),
        "Masked document"
    );

    MaskedExercise {
        text: tokens.join(" "),
        answer_key,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::filter::filter_recognized;
    use cloze_core::types::{PosTag, Sentence, Word};

    fn word(text: &str, tag: PosTag) -> Word {
        Word {
            text: text.to_string(),
            tag,
            relation: "dep".to_string(),
            head: 0,
        }
    }

    fn doc(sentences: Vec<Vec<Word>>) -> Document {
        Document {
            sentences: sentences
                .into_iter()
                .map(|words| Sentence { words })
                .collect(),
        }
    }

    fn placeholder_indices(text: &str) -> Vec<u32> {
        text.split_whitespace()
            .filter_map(|tok| {
                tok.strip_prefix('(')
                    .and_then(|t| t.strip_suffix(')'))
                    .and_then(|t| t.parse().ok())
            })
            .collect()
    }

    #[test]
    fn test_empty_mask_set_is_identity() {
        let d = doc(vec![vec![
            word("The", PosTag::Det),
            word("cat", PosTag::Noun),
            word("sat", PosTag::Verb),
            word(".", PosTag::Punct),
        ]]);
        let out = mask(&d, &MaskSet::new(), false);
        assert_eq!(out.text, "The cat sat .");
        assert!(out.answer_key.is_empty());
    }

    #[test]
    fn test_masks_selected_tag_with_numbered_placeholders() {
        let d = doc(vec![vec![
            word("The", PosTag::Det),
            word("cat", PosTag::Noun),
            word("sat", PosTag::Verb),
        ]]);
        let out = mask(&d, &filter_recognized(["NOUN", "VERB"]), true);
        assert_eq!(out.text, "The (1) (2)");
        assert_eq!(out.answer_key.get(&1).unwrap(), "cat");
        assert_eq!(out.answer_key.get(&2).unwrap(), "sat");
    }

    #[test]
    fn test_counter_spans_sentences_without_reset() {
        let d = doc(vec![
            vec![word("Dogs", PosTag::Noun), word("bark", PosTag::Verb)],
            vec![word("Cats", PosTag::Noun), word("purr", PosTag::Verb)],
        ]);
        let out = mask(&d, &filter_recognized(["NOUN"]), true);
        assert_eq!(out.text, "(1) bark (2) purr");
        assert_eq!(out.answer_key.get(&1).unwrap(), "Dogs");
        assert_eq!(out.answer_key.get(&2).unwrap(), "Cats");
    }

    #[test]
    fn test_placeholders_and_answer_key_in_bijection() {
        let d = doc(vec![
            vec![
                word("She", PosTag::Pron),
                word("quickly", PosTag::Adv),
                word("ran", PosTag::Verb),
                word("home", PosTag::Noun),
            ],
            vec![
                word("He", PosTag::Pron),
                word("followed", PosTag::Verb),
                word(".", PosTag::Punct),
            ],
        ]);
        let out = mask(&d, &filter_recognized(["PRON", "VERB", "ADV"]), true);

        let indices = placeholder_indices(&out.text);
        assert_eq!(indices.len(), out.answer_key.len());
        // Indices are exactly 1..=N with no gaps or repeats, in order.
        let expected: Vec<u32> = (1..=out.answer_key.len() as u32).collect();
        assert_eq!(indices, expected);
        let keys: Vec<u32> = out.answer_key.keys().copied().collect();
        assert_eq!(keys, expected);
    }

    #[test]
    fn test_contraction_masked_independently_of_tag() {
        // "can't" tagged AUX, mask set only VERB: still masked via the
        // contraction list.
        let d = doc(vec![vec![
            word("I", PosTag::Pron),
            word("can't", PosTag::Aux),
            word("go", PosTag::Verb),
        ]]);
        let out = mask(&d, &filter_recognized(["VERB"]), true);
        assert_eq!(out.text, "I (1) (2)");
        assert_eq!(out.answer_key.get(&1).unwrap(), "can't");
        assert_eq!(out.answer_key.get(&2).unwrap(), "go");
    }

    #[test]
    fn test_nt_substring_rule() {
        // Not on the fixed list, but contains "n't".
        let d = doc(vec![vec![
            word("You", PosTag::Pron),
            word("needn't", PosTag::Aux),
            word("worry", PosTag::Verb),
        ]]);
        let out = mask(&d, &MaskSet::new(), true);
        assert_eq!(out.text, "You (1) worry");
        assert_eq!(out.answer_key.get(&1).unwrap(), "needn't");
    }

    #[test]
    fn test_contraction_matching_is_case_sensitive() {
        let d = doc(vec![vec![
            word("It's", PosTag::Pron),
            word("it's", PosTag::Pron),
        ]]);
        let out = mask(&d, &MaskSet::new(), true);
        // "It's" is not on the list; "it's" is.
        assert_eq!(out.text, "It's (1)");
    }

    #[test]
    fn test_contraction_policy_disabled_masks_by_tag_only() {
        let d = doc(vec![vec![
            word("I", PosTag::Pron),
            word("can't", PosTag::Aux),
            word("go", PosTag::Verb),
        ]]);
        let out = mask(&d, &filter_recognized(["VERB"]), false);
        assert_eq!(out.text, "I can't (1)");
        assert_eq!(out.answer_key.len(), 1);
    }

    #[test]
    fn test_empty_document() {
        let out = mask(&Document::default(), &filter_recognized(["NOUN"]), true);
        assert_eq!(out.text, "");
        assert!(out.answer_key.is_empty());
    }

    #[test]
    fn test_mask_is_deterministic() {
        let d = doc(vec![vec![
            word("Birds", PosTag::Noun),
            word("sing", PosTag::Verb),
        ]]);
        let set = filter_recognized(["NOUN", "VERB"]);
        assert_eq!(mask(&d, &set, true), mask(&d, &set, true));
    }
}
