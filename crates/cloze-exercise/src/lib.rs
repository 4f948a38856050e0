//! Cloze exercise crate - masking engine, tag filter, and judgment.
//!
//! Turns an annotated [`cloze_core::Document`] into a fill-in-the-blank
//! exercise (masked text + numbered answer key), narrows untrusted tag
//! selections to the recognized vocabulary, and judges a spoken answer's
//! transcription against the original text.

pub mod filter;
pub mod judge;
pub mod mask;

pub use filter::{filter_recognized, MaskSet};
pub use judge::{judge, Verdict};
pub use mask::{mask, AnswerKey, MaskedExercise};
