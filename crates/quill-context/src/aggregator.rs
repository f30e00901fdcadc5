//! Bundle construction over the document store

use crate::format::format_notes;
use quill_domain::{
    CharacterNoteSet, ContinuationContext, ExtractionContext, ResourceBody, ResourceRole,
    RevisionContext,
};
use quill_store::{FileStore, IndexProbe};
use std::path::Path;
use tracing::{debug, info, warn};

/// Related-excerpt budget for continuation prompts.
pub const CONTINUATION_EXCERPT_LIMIT: usize = 64;

/// Related-excerpt budget for revision prompts (half of continuation; a
/// localized edit needs less surrounding canon).
pub const REVISION_EXCERPT_LIMIT: usize = 32;

/// Fixed placeholder when no similarity index exists in the vault.
const NO_INDEX_PLACEHOLDER: &str =
    "[Similarity index: no data found - the indexing plugin has not run on this vault]";

/// Relative vault paths for a continuation bundle.
#[derive(Debug, Clone, Copy)]
pub struct ContinuationPaths<'a> {
    /// The active manuscript
    pub manuscript: &'a str,
    /// The story bible
    pub story_bible: &'a str,
    /// The running extractions log
    pub extractions: &'a str,
    /// The sliding-window excerpt
    pub sliding_window: &'a str,
}

/// Relative vault paths for a revision bundle.
#[derive(Debug, Clone, Copy)]
pub struct RevisionPaths<'a> {
    /// The story bible
    pub story_bible: &'a str,
    /// The running extractions log
    pub extractions: &'a str,
    /// The sliding-window excerpt
    pub sliding_window: &'a str,
    /// Folder holding one note file per character
    pub character_folder: &'a str,
}

/// Assembles context bundles for the three operation kinds.
///
/// Stateless; construct once and share, or construct per call. There is
/// no difference.
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextAggregator {
    store: FileStore,
}

impl ContextAggregator {
    /// Create an aggregator over the given store.
    pub fn new(store: FileStore) -> Self {
        Self { store }
    }

    /// Build the bundle for continuing the active manuscript.
    ///
    /// Five independent resolutions, fetched concurrently; each degrades
    /// to its own placeholder on failure and all complete before the
    /// bundle is returned.
    pub async fn continuation_context(
        &self,
        root: &Path,
        paths: &ContinuationPaths<'_>,
    ) -> ContinuationContext {
        info!("Assembling continuation context from {}", root.display());

        let (canon_excerpts, manuscript, story_bible, extractions, sliding_window) = tokio::join!(
            self.similar_excerpts(root, CONTINUATION_EXCERPT_LIMIT),
            self.fetch(root, paths.manuscript, ResourceRole::Manuscript),
            self.fetch(root, paths.story_bible, ResourceRole::StoryBible),
            self.fetch(root, paths.extractions, ResourceRole::Extractions),
            self.fetch(root, paths.sliding_window, ResourceRole::SlidingWindow),
        );

        ContinuationContext {
            canon_excerpts,
            manuscript,
            story_bible,
            extractions,
            sliding_window,
        }
    }

    /// Build the bundle for revising a selected passage.
    ///
    /// The selected passage itself is caller-supplied and never read from
    /// the vault. The full character-note set is folded into a single
    /// formatted block.
    pub async fn revision_context(
        &self,
        root: &Path,
        paths: &RevisionPaths<'_>,
    ) -> RevisionContext {
        info!("Assembling revision context from {}", root.display());

        let (sliding_window, story_bible, extractions, notes, canon_excerpts) = tokio::join!(
            self.fetch(root, paths.sliding_window, ResourceRole::SlidingWindow),
            self.fetch(root, paths.story_bible, ResourceRole::StoryBible),
            self.fetch(root, paths.extractions, ResourceRole::Extractions),
            self.store.list_notes(root, paths.character_folder),
            self.similar_excerpts(root, REVISION_EXCERPT_LIMIT),
        );

        RevisionContext {
            sliding_window,
            story_bible,
            extractions,
            character_notes: ResourceBody::Content(format_notes(&notes)),
            canon_excerpts,
        }
    }

    /// Build the supporting material for a character-extraction prompt.
    pub async fn extraction_context(
        &self,
        root: &Path,
        story_bible: &str,
        character_folder: &str,
    ) -> ExtractionContext {
        info!("Assembling extraction context from {}", root.display());

        let (character_notes, story_bible) = tokio::join!(
            self.store.list_notes(root, character_folder),
            self.fetch(root, story_bible, ResourceRole::StoryBible),
        );

        ExtractionContext {
            character_notes,
            story_bible,
        }
    }

    /// Current character notes, used to show state prior to extraction.
    pub async fn character_notes(&self, root: &Path, folder: &str) -> CharacterNoteSet {
        self.store.list_notes(root, folder).await
    }

    async fn fetch(&self, root: &Path, relative: &str, role: ResourceRole) -> ResourceBody {
        let body = self.store.resolve(root, relative).await;
        if body.is_diagnostic() {
            warn!("Degraded {} at '{}' to placeholder: {}", role, relative, body.as_text());
        } else {
            debug!("Resolved {} at '{}' ({} chars)", role, relative, body.as_text().len());
        }
        body
    }

    /// Render the similarity lookup to a prompt-ready body.
    ///
    /// A missing index is a neutral state; a present-but-unparseable index
    /// carries its cause inline; a loaded index reports what is available,
    /// bounded by `limit`. The embedding lookup itself belongs to the
    /// third-party plugin that owns the data.
    async fn similar_excerpts(&self, root: &Path, limit: usize) -> ResourceBody {
        match self.store.probe_similarity_index(root).await {
            IndexProbe::Missing => ResourceBody::Content(NO_INDEX_PLACEHOLDER.to_string()),
            IndexProbe::Unreadable(cause) => {
                warn!("Similarity index unreadable: {}", cause);
                ResourceBody::Diagnostic(format!(
                    "[Similarity index: error loading data - {}]",
                    cause
                ))
            }
            IndexProbe::Loaded { entries } => {
                debug!("Resolved {} ({} entries, limit {})", ResourceRole::SimilarityIndex, entries, limit);
                ResourceBody::Content(format!(
                    "[Similarity index loaded: {} entries indexed, up to {} related excerpts available]",
                    entries, limit
                ))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quill_store::SIMILARITY_INDEX_PATH;
    use std::path::PathBuf;

    const PATHS: ContinuationPaths<'static> = ContinuationPaths {
        manuscript: "Book Two.md",
        story_bible: "Story Bible.md",
        extractions: "Extractions.md",
        sliding_window: "Sliding Window.md",
    };

    const REVISION_PATHS: RevisionPaths<'static> = RevisionPaths {
        story_bible: "Story Bible.md",
        extractions: "Extractions.md",
        sliding_window: "Sliding Window.md",
        character_folder: "Characters",
    };

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_continuation_bundle_complete_when_every_read_fails() {
        let vault = tempfile::tempdir().unwrap();
        let aggregator = ContextAggregator::new(FileStore::new());

        let bundle = aggregator.continuation_context(vault.path(), &PATHS).await;

        // No resource is missing from the bundle; each degraded on its own.
        assert!(bundle.manuscript.is_diagnostic());
        assert!(bundle.story_bible.is_diagnostic());
        assert!(bundle.extractions.is_diagnostic());
        assert!(bundle.sliding_window.is_diagnostic());
        assert_eq!(bundle.canon_excerpts.as_text(), NO_INDEX_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_continuation_bundle_carries_content() {
        let vault = tempfile::tempdir().unwrap();
        write(vault.path(), "Book Two.md", "Chapter 12 begins.");
        write(vault.path(), "Story Bible.md", "The moons never set.");
        write(vault.path(), "Extractions.md", "## Mirelle\nowes the harbormaster");
        write(vault.path(), "Sliding Window.md", "She stepped off the pier.");

        let aggregator = ContextAggregator::new(FileStore::new());
        let bundle = aggregator.continuation_context(vault.path(), &PATHS).await;

        assert_eq!(bundle.manuscript.as_text(), "Chapter 12 begins.");
        assert_eq!(bundle.sliding_window.as_text(), "She stepped off the pier.");
        assert!(!bundle.story_bible.is_diagnostic());
    }

    #[tokio::test]
    async fn test_similarity_placeholders() {
        let vault = tempfile::tempdir().unwrap();
        let aggregator = ContextAggregator::new(FileStore::new());

        // Missing index
        let bundle = aggregator.continuation_context(vault.path(), &PATHS).await;
        assert_eq!(bundle.canon_excerpts.as_text(), NO_INDEX_PLACEHOLDER);

        // Unparseable index
        write(vault.path(), SIMILARITY_INDEX_PATH, "{broken");
        let bundle = aggregator.continuation_context(vault.path(), &PATHS).await;
        assert!(bundle.canon_excerpts.is_diagnostic());
        assert!(bundle.canon_excerpts.as_text().contains("error loading data"));

        // Loaded index mentions the continuation excerpt budget
        write(vault.path(), SIMILARITY_INDEX_PATH, r#"{"a.md": {}, "b.md": {}}"#);
        let bundle = aggregator.continuation_context(vault.path(), &PATHS).await;
        assert!(bundle.canon_excerpts.as_text().contains("2 entries"));
        assert!(bundle
            .canon_excerpts
            .as_text()
            .contains(&CONTINUATION_EXCERPT_LIMIT.to_string()));
    }

    #[tokio::test]
    async fn test_revision_bundle_folds_notes_and_halves_excerpt_limit() {
        let vault = tempfile::tempdir().unwrap();
        write(vault.path(), "Characters/Mirelle.md", "A smuggler.");
        write(vault.path(), SIMILARITY_INDEX_PATH, r#"{"a.md": {}}"#);

        let aggregator = ContextAggregator::new(FileStore::new());
        let bundle = aggregator.revision_context(vault.path(), &REVISION_PATHS).await;

        assert!(bundle.character_notes.as_text().contains("## Mirelle"));
        assert!(bundle.character_notes.as_text().contains("A smuggler."));
        assert!(bundle
            .canon_excerpts
            .as_text()
            .contains(&REVISION_EXCERPT_LIMIT.to_string()));
    }

    #[tokio::test]
    async fn test_revision_bundle_empty_notes_placeholder() {
        let vault = tempfile::tempdir().unwrap();

        let aggregator = ContextAggregator::new(FileStore::new());
        let bundle = aggregator.revision_context(vault.path(), &REVISION_PATHS).await;

        assert_eq!(bundle.character_notes.as_text(), crate::NO_NOTES_PLACEHOLDER);
    }

    #[tokio::test]
    async fn test_extraction_context_carries_notes_and_bible() {
        let vault = tempfile::tempdir().unwrap();
        write(vault.path(), "Characters/Yutta.md", "Speaks only in questions.");
        write(vault.path(), "Story Bible.md", "The moons never set.");

        let aggregator = ContextAggregator::new(FileStore::new());
        let context = aggregator
            .extraction_context(vault.path(), "Story Bible.md", "Characters")
            .await;

        assert_eq!(context.character_notes.len(), 1);
        assert_eq!(context.story_bible.as_text(), "The moons never set.");
    }

    #[tokio::test]
    async fn test_concurrent_aggregations_do_not_interfere() {
        let vault_a = tempfile::tempdir().unwrap();
        let vault_b = tempfile::tempdir().unwrap();
        write(vault_a.path(), "Book Two.md", "from vault a");
        write(vault_b.path(), "Book Two.md", "from vault b");

        let aggregator = ContextAggregator::new(FileStore::new());
        let (root_a, root_b): (PathBuf, PathBuf) =
            (vault_a.path().to_path_buf(), vault_b.path().to_path_buf());

        let (bundle_a, bundle_b) = tokio::join!(
            aggregator.continuation_context(&root_a, &PATHS),
            aggregator.continuation_context(&root_b, &PATHS),
        );

        assert_eq!(bundle_a.manuscript.as_text(), "from vault a");
        assert_eq!(bundle_b.manuscript.as_text(), "from vault b");
    }
}
