//! Judgment of a transcribed answer against the original text.

use serde::Serialize;

/// Whole-text correctness check.
///
/// Exact string equality after leading/trailing whitespace removal on both
/// sides. No normalization of case, punctuation, or internal whitespace.
pub fn judge(original: &str, transcribed: &str) -> bool {
    original.trim() == transcribed.trim()
}

/// Three-valued judgment state for the exercise page.
///
/// `Pending` means no transcription has been produced yet; it is distinct
/// from an incorrect answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Pending,
    Correct,
    Incorrect,
}

impl Verdict {
    /// Judge a transcription when one is available, else stay pending.
    pub fn evaluate(original: &str, transcribed: Option<&str>) -> Verdict {
        match transcribed {
            Some(t) if judge(original, t) => Verdict::Correct,
            Some(_) => Verdict::Incorrect,
            None => Verdict::Pending,
        }
    }
}
