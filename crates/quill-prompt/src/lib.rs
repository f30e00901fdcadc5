//! Quill Prompt Engine
//!
//! Maps context bundles and author directives into final prompt strings.
//!
//! Each builder is a fixed arrangement of labeled sections joined by a
//! visual rule, with a trailing task-specific instruction block. The
//! engine performs no error substitution: a resource that failed to
//! resolve already carries its placeholder text from the store or
//! aggregator, and is composed as-is.
//!
//! The extraction prompt prescribes the exact heading format
//! (`## <CharacterName>` then `### <timestamp> - Update`) that the
//! extraction parser's structured pass consumes. The two are a matched
//! pair and must change together.

#![warn(missing_docs)]

mod continuation;
mod extraction;
mod revision;

pub use continuation::{ContinuationPrompt, DEFAULT_WORD_COUNT};
pub use extraction::ExtractionPrompt;
pub use revision::RevisionPrompt;

pub(crate) const RULE: &str =
    "-------------------------------------------------------------";

/// Append a rule-framed, titled section followed by its body.
pub(crate) fn push_section(out: &mut String, title: &str, body: &str) {
    out.push_str(RULE);
    out.push('\n');
    out.push_str(title);
    out.push('\n');
    out.push_str(RULE);
    out.push('\n');
    out.push_str(body);
    out.push_str("\n\n");
}

/// Append a one-line guidance note under the previous section.
pub(crate) fn push_note(out: &mut String, note: &str) {
    out.push_str(note);
    out.push_str("\n\n");
}
