//! Quill Extractor
//!
//! Converts free-form model output into structured character-update
//! records.
//!
//! # Overview
//!
//! The extraction prompt asks the model to report one section per
//! character in a fixed heading format. Models mostly comply; when they do
//! not, a coarse proper-noun heuristic salvages candidate names rather
//! than returning nothing. The parse is total: malformed or empty input
//! yields an empty result, never an error.
//!
//! # Tiers
//!
//! 1. **Structured**: split on `## <CharacterName>` headings, strip the
//!    `### <timestamp> - Update` line, keep non-empty sections.
//! 2. **Heuristic** (only when tier 1 yields zero records): capitalized
//!    word runs of up to three words become candidate names, each carrying
//!    the whole raw output as its update. Advisory precision only.
//! 3. **Empty**: a valid outcome, not an error.
//!
//! # Example
//!
//! ```
//! use quill_extractor::parse_extraction;
//!
//! let output = "## Mirelle\n### 2031-04-02 - Update\nPaid off the harbormaster.";
//! let extraction = parse_extraction(output);
//!
//! assert_eq!(extraction.len(), 1);
//! assert_eq!(extraction.records()[0].character, "Mirelle");
//! assert_eq!(extraction.records()[0].update, "Paid off the harbormaster.");
//! ```

#![warn(missing_docs)]

mod parser;

pub use parser::parse_extraction;
pub use quill_domain::{CharacterUpdate, Extraction};
