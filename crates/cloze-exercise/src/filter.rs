//! Recognized-vocabulary filter for caller-supplied tag selections.
//!
//! Form checkbox values are untrusted input. They are narrowed to the fixed
//! recognized tag set before they reach the masking engine, which does no
//! further validation.

use std::collections::BTreeSet;

use cloze_core::types::PosTag;

/// The set of part-of-speech categories selected for masking.
pub type MaskSet = BTreeSet<PosTag>;

/// Narrow raw tag identifiers to the recognized masking vocabulary.
///
/// Unrecognized or misspelled identifiers are dropped silently; tags that
/// parse but sit outside the masking vocabulary (INTJ, PART, X) are dropped
/// as well. Idempotent: filtering an already-filtered set is a no-op.
pub fn filter_recognized<I, S>(requested: I) -> MaskSet
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    requested
        .into_iter()
        .filter_map(|raw| PosTag::parse(raw.as_ref()))
        .filter(|tag| tag.is_recognized())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_keeps_recognized_tags() {
        let tags = filter_recognized(["NOUN", "VERB", "ADJ"]);
        assert_eq!(tags.len(), 3);
        assert!(tags.contains(&PosTag::Noun));
        assert!(tags.contains(&PosTag::Verb));
        assert!(tags.contains(&PosTag::Adj));
    }

    #[test]
    fn test_filter_drops_unrecognized_silently() {
        let tags = filter_recognized(["NOUN", "VB", "VBZ", "noun", "NOUNS", "", "<script>"]);
        assert_eq!(tags.len(), 1);
        assert!(tags.contains(&PosTag::Noun));
    }

    #[test]
    fn test_filter_drops_non_maskable_ud_tags() {
        // Valid UD tags, but outside the masking vocabulary.
        let tags = filter_recognized(["INTJ", "PART", "X"]);
        assert!(tags.is_empty());
    }

    #[test]
    fn test_filter_deduplicates() {
        let tags = filter_recognized(["VERB", "VERB", "VERB"]);
        assert_eq!(tags.len(), 1);
    }

    #[test]
    fn test_filter_is_idempotent() {
        let raw = ["NOUN", "bogus", "PUNCT", "AUX"];
        let once = filter_recognized(raw);
        let twice = filter_recognized(once.iter().map(|t| t.as_str()));
        assert_eq!(once, twice);
    }

    #[test]
    fn test_filter_empty_input() {
        let tags = filter_recognized(Vec::<String>::new());
        assert!(tags.is_empty());
    }

    #[test]
    fn test_filter_accepts_full_vocabulary() {
        let all: Vec<&str> = PosTag::RECOGNIZED.iter().map(|t| t.as_str()).collect();
        let tags = filter_recognized(all);
        assert_eq!(tags.len(), PosTag::RECOGNIZED.len());
    }
}
