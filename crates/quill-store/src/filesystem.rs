//! Vault file resolution and character-note enumeration

use quill_domain::{CharacterNoteSet, ResourceBody};
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Filesystem adapter over the vault directory.
///
/// Stateless and trivially constructed; safe to share across concurrent
/// requests. All reads are non-mutating.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileStore;

impl FileStore {
    /// Create a new store.
    pub fn new() -> Self {
        Self
    }

    /// Resolve a resource at `relative` under `root` to its text.
    ///
    /// Never fails: any read error (missing file, permissions, invalid
    /// UTF-8) degrades to a [`ResourceBody::Diagnostic`] of the form
    /// `[Error reading file: <cause>]` so prompt assembly proceeds with a
    /// visible placeholder in place of the content.
    pub async fn resolve(&self, root: &Path, relative: impl AsRef<Path>) -> ResourceBody {
        read_lenient(&root.join(relative)).await
    }

    /// Enumerate character notes in `root/folder`.
    ///
    /// One `.md` file per character, name = file stem. A missing folder is
    /// a normal state (no characters extracted yet) and yields an empty
    /// set. Subdirectories and non-markdown files are skipped; a note file
    /// that exists but cannot be read keeps its slot with the diagnostic
    /// placeholder as its body.
    pub async fn list_notes(&self, root: &Path, folder: &str) -> CharacterNoteSet {
        let dir = root.join(folder);
        let mut notes = CharacterNoteSet::new();

        let mut entries = match fs::read_dir(&dir).await {
            Ok(entries) => entries,
            Err(e) => {
                debug!("Character folder {} not readable ({}), treating as empty", dir.display(), e);
                return notes;
            }
        };

        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            let is_file = entry
                .file_type()
                .await
                .map(|kind| kind.is_file())
                .unwrap_or(false);
            if !is_file {
                continue;
            }
            if path.extension().and_then(|ext| ext.to_str()) != Some("md") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|stem| stem.to_str()) else {
                continue;
            };

            let body = read_lenient(&path).await;
            notes.insert(name, body.into_text());
        }

        debug!("Enumerated {} character notes in {}", notes.len(), dir.display());
        notes
    }
}

/// Read a file, degrading any failure to an inline diagnostic.
async fn read_lenient(path: &Path) -> ResourceBody {
    match fs::read_to_string(path).await {
        Ok(text) => ResourceBody::Content(text),
        Err(e) => ResourceBody::Diagnostic(format!("[Error reading file: {}]", e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_resolve_reads_content() {
        let vault = tempfile::tempdir().unwrap();
        write(vault.path(), "Story Bible.md", "The moons never set.");

        let store = FileStore::new();
        let body = store.resolve(vault.path(), "Story Bible.md").await;

        assert_eq!(body, ResourceBody::Content("The moons never set.".to_string()));
    }

    #[tokio::test]
    async fn test_resolve_missing_file_degrades_to_diagnostic() {
        let vault = tempfile::tempdir().unwrap();

        let store = FileStore::new();
        let body = store.resolve(vault.path(), "missing.md").await;

        assert!(body.is_diagnostic());
        assert!(body.as_text().starts_with("[Error reading file:"));
        assert!(body.as_text().contains("Error"));
    }

    #[tokio::test]
    async fn test_resolve_invalid_utf8_degrades_to_diagnostic() {
        let vault = tempfile::tempdir().unwrap();
        std::fs::write(vault.path().join("binary.md"), [0xff, 0xfe, 0x00, 0x01]).unwrap();

        let store = FileStore::new();
        let body = store.resolve(vault.path(), "binary.md").await;

        assert!(body.is_diagnostic());
    }

    #[tokio::test]
    async fn test_list_notes_missing_folder_is_empty() {
        let vault = tempfile::tempdir().unwrap();

        let store = FileStore::new();
        let notes = store.list_notes(vault.path(), "Characters").await;

        assert!(notes.is_empty());
    }

    #[tokio::test]
    async fn test_list_notes_uses_file_stem_as_name() {
        let vault = tempfile::tempdir().unwrap();
        write(vault.path(), "Characters/Mirelle.md", "A smuggler with a debt.");
        write(vault.path(), "Characters/Aldous.md", "A cartographer.");

        let store = FileStore::new();
        let notes = store.list_notes(vault.path(), "Characters").await;

        assert_eq!(notes.len(), 2);
        assert_eq!(notes.get("Mirelle"), Some("A smuggler with a debt."));
        assert_eq!(notes.get("Aldous"), Some("A cartographer."));
    }

    #[tokio::test]
    async fn test_list_notes_skips_non_markdown_and_subdirectories() {
        let vault = tempfile::tempdir().unwrap();
        write(vault.path(), "Characters/Mirelle.md", "A smuggler.");
        write(vault.path(), "Characters/notes.txt", "not a character");
        std::fs::create_dir_all(vault.path().join("Characters/archive")).unwrap();

        let store = FileStore::new();
        let notes = store.list_notes(vault.path(), "Characters").await;

        assert_eq!(notes.len(), 1);
        let names: Vec<&str> = notes.names().collect();
        assert_eq!(names, vec!["Mirelle"]);
    }

    #[tokio::test]
    async fn test_resolve_rejects_nothing_concurrently() {
        // Independent resolutions share no state; run a fan-out against a
        // mix of readable and unreadable paths and check every slot filled.
        let vault = tempfile::tempdir().unwrap();
        write(vault.path(), "a.md", "alpha");

        let store = FileStore::new();
        let root: PathBuf = vault.path().to_path_buf();
        let (a, b, c) = tokio::join!(
            store.resolve(&root, "a.md"),
            store.resolve(&root, "b.md"),
            store.resolve(&root, "c.md"),
        );

        assert_eq!(a.as_text(), "alpha");
        assert!(b.is_diagnostic());
        assert!(c.is_diagnostic());
    }
}
