//! Quill Document Store
//!
//! Filesystem adapter over an author's note vault.
//!
//! # Architecture
//!
//! The store resolves named text resources (manuscript, story bible,
//! extractions log, sliding window, character notes) to raw text and
//! probes the third-party similarity index. Resolution is total by
//! contract: a failed read degrades to an inline diagnostic placeholder
//! instead of an error, so prompt assembly upstream never branches on
//! read failures.
//!
//! # Examples
//!
//! ```no_run
//! use quill_store::FileStore;
//! use std::path::Path;
//!
//! # async fn example() {
//! let store = FileStore::new();
//! let body = store.resolve(Path::new("/vault"), "Story Bible.md").await;
//! // Unreadable files yield "[Error reading file: ...]" rather than an Err
//! println!("{}", body.as_text());
//! # }
//! ```

#![warn(missing_docs)]

mod filesystem;
mod similarity;

pub use filesystem::FileStore;
pub use similarity::{IndexProbe, SIMILARITY_INDEX_PATH};
