//! Quill Context Aggregator
//!
//! Collects heterogeneous vault resources into the fixed-shape context
//! bundles the prompt layer consumes.
//!
//! # Architecture
//!
//! ```text
//! caller → ContextAggregator → FileStore (concurrent reads) → bundle
//! ```
//!
//! Each bundle's resources are independent reads with no cross-resource
//! dependency, so one aggregation fans them out concurrently and waits for
//! all of them; every resource degrades to a placeholder individually and
//! no partial bundle is ever returned. The aggregator holds no state
//! across calls and is safe to use from concurrent requests.

#![warn(missing_docs)]

mod aggregator;
mod format;

pub use aggregator::{
    ContextAggregator, ContinuationPaths, RevisionPaths, CONTINUATION_EXCERPT_LIMIT,
    REVISION_EXCERPT_LIMIT,
};
pub use format::{format_notes, NOTE_SEPARATOR, NO_NOTES_PLACEHOLDER};
