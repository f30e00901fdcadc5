//! Quill Service
//!
//! The orchestration facade over the assembly/parsing pipeline.
//!
//! # Architecture
//!
//! ```text
//! caller → StudioService → ContextAggregator → prompt builder
//!                        → ModelProvider (opaque, async)
//!                        → extraction parser (extraction only)
//!        ← generated text / character updates
//! ```
//!
//! Three operations: continue the active manuscript, revise a selected
//! passage, extract character updates from a passage. Aggregation and
//! parsing are total; the only failure classes a caller sees are invalid
//! configuration, a missing selection, and an opaque provider error.
//!
//! # Example
//!
//! ```no_run
//! use quill_llm::MockProvider;
//! use quill_service::{ExtractionRequest, StudioService, StudioSettings};
//!
//! # async fn example() -> Result<(), quill_service::ServiceError> {
//! let settings = StudioSettings {
//!     vault_root: "/vault".into(),
//!     manuscript_path: "Book Two.md".to_string(),
//!     story_bible_path: "Story Bible.md".to_string(),
//!     extractions_path: "Extractions.md".to_string(),
//!     sliding_window_path: "Sliding Window.md".to_string(),
//!     character_folder: "Characters".to_string(),
//!     provider: "anthropic".to_string(),
//!     model: "claude-sonnet-4-5".to_string(),
//!     api_key: "sk-...".to_string(),
//!     max_tokens: None,
//! };
//!
//! let service = StudioService::new(settings, MockProvider::default())?;
//! let outcome = service
//!     .extract_characters(ExtractionRequest {
//!         selected_text: "Mirelle paid him in silence.".to_string(),
//!     })
//!     .await?;
//!
//! for update in outcome.extraction.records() {
//!     println!("{}: {}", update.character, update.update);
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod service;


pub use config::StudioSettings;
pub use error::ServiceError;
pub use service::{
    ContinuationRequest, ExtractionMetadata, ExtractionOutcome, ExtractionRequest,
    RevisionRequest, StudioService,
};
