//! Similarity-index probe
//!
//! The vault may carry an embedding index maintained by a third-party
//! plugin at a fixed relative path. The index data is opaque JSON owned by
//! that plugin; the store only checks existence and parseability and never
//! writes to it.

use crate::filesystem::FileStore;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::debug;

/// Fixed relative path of the similarity-index data file under the vault root.
pub const SIMILARITY_INDEX_PATH: &str = ".obsidian/plugins/smart-connections/data.json";

/// Outcome of probing the similarity-index data file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IndexProbe {
    /// No data file exists; the plugin has not indexed this vault.
    /// A normal state, not an error.
    Missing,
    /// A data file exists but could not be read or parsed as JSON
    Unreadable(String),
    /// The data file parsed; `entries` is the number of top-level records
    Loaded {
        /// Count of top-level entries in the index data
        entries: usize,
    },
}

impl FileStore {
    /// Probe the similarity index under `root`.
    pub async fn probe_similarity_index(&self, root: &Path) -> IndexProbe {
        let path = root.join(SIMILARITY_INDEX_PATH);

        let raw = match fs::read_to_string(&path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!("No similarity index at {}", path.display());
                return IndexProbe::Missing;
            }
            Err(e) => return IndexProbe::Unreadable(e.to_string()),
        };

        match serde_json::from_str::<serde_json::Value>(&raw) {
            Ok(data) => {
                let entries = data.as_object().map_or(0, |map| map.len());
                debug!("Similarity index parsed: {} entries", entries);
                IndexProbe::Loaded { entries }
            }
            Err(e) => IndexProbe::Unreadable(e.to_string()),
        }
    }
}
