//! Text resources and their resolution results

use std::fmt;

/// Logical identity of a text resource within the vault.
///
/// Roles name *what* a piece of text is for, independently of where it is
/// stored. They are used for labeling and logging; the context bundles in
/// [`crate::bundle`] carry the resolved bodies under role-named fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRole {
    /// The active manuscript being continued
    Manuscript,
    /// The story bible (world rules, arcs, timelines)
    StoryBible,
    /// The running log of prior character extractions
    Extractions,
    /// The most-recent manuscript excerpt used as immediate lead-in
    SlidingWindow,
    /// The third-party similarity index over the vault
    SimilarityIndex,
    /// A single character's note file, by character name
    CharacterNote(String),
}

impl fmt::Display for ResourceRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ResourceRole::Manuscript => write!(f, "manuscript"),
            ResourceRole::StoryBible => write!(f, "story bible"),
            ResourceRole::Extractions => write!(f, "extractions log"),
            ResourceRole::SlidingWindow => write!(f, "sliding window"),
            ResourceRole::SimilarityIndex => write!(f, "similarity index"),
            ResourceRole::CharacterNote(name) => write!(f, "character note '{}'", name),
        }
    }
}

/// The outcome of resolving a text resource.
///
/// Resolution is total: a resource that cannot be read degrades to a
/// [`ResourceBody::Diagnostic`] whose rendered text stands in for the
/// content, so downstream prompt composition never branches on
/// success/failure and never sees an error value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceBody {
    /// The resource was read successfully
    Content(String),
    /// The resource could not be read; the string is an inline placeholder
    /// (e.g. `[Error reading file: ...]`) shown where the content would go
    Diagnostic(String),
}

impl ResourceBody {
    /// The text to compose into a prompt, whichever variant this is.
    pub fn as_text(&self) -> &str {
        match self {
            ResourceBody::Content(text) | ResourceBody::Diagnostic(text) => text,
        }
    }

    /// Consume the body, yielding its text.
    pub fn into_text(self) -> String {
        match self {
            ResourceBody::Content(text) | ResourceBody::Diagnostic(text) => text,
        }
    }

    /// True if this body is a placeholder standing in for unreadable content.
    pub fn is_diagnostic(&self) -> bool {
        matches!(self, ResourceBody::Diagnostic(_))
    }
}

impl fmt::Display for ResourceBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_as_text_is_variant_blind() {
        let content = ResourceBody::Content("chapter one".to_string());
        let diagnostic = ResourceBody::Diagnostic("[Error reading file: gone]".to_string());

        assert_eq!(content.as_text(), "chapter one");
        assert_eq!(diagnostic.as_text(), "[Error reading file: gone]");
    }

    #[test]
    fn test_is_diagnostic() {
        assert!(!ResourceBody::Content("x".to_string()).is_diagnostic());
        assert!(ResourceBody::Diagnostic("x".to_string()).is_diagnostic());
    }

    #[test]
    fn test_role_display() {
        assert_eq!(ResourceRole::StoryBible.to_string(), "story bible");
        assert_eq!(
            ResourceRole::CharacterNote("Alice".to_string()).to_string(),
            "character note 'Alice'"
        );
    }
}
