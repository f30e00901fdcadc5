//! Character-update records recovered from model output

use serde::{Deserialize, Serialize};

/// A single structured character update.
///
/// Produced only by the extraction parser; immutable once created. A record
/// has no lifecycle beyond the extraction call that produced it; appending
/// it to a character's note file is the caller's responsibility.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CharacterUpdate {
    /// Character name the update is attributed to (non-empty)
    pub character: String,
    /// Update body to append to the character's note (non-empty)
    pub update: String,
}

impl CharacterUpdate {
    /// Validate that both fields are non-empty.
    pub fn validate(&self) -> Result<(), String> {
        if self.character.trim().is_empty() {
            return Err("character is empty".to_string());
        }
        if self.update.trim().is_empty() {
            return Err("update is empty".to_string());
        }
        Ok(())
    }
}

/// Result of parsing model extraction output.
///
/// The parse is a two-tier recovery pipeline: the structured pass runs
/// first, the heuristic pass only when the structured pass yields zero
/// records, and `Empty` when both come up dry. Partial structured success
/// never falls through to the heuristic tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Extraction {
    /// Records recovered from the requested heading format
    Structured(Vec<CharacterUpdate>),
    /// Records guessed by the proper-noun fallback; attribution is coarse
    /// and each update body is the entire raw model output
    Heuristic(Vec<CharacterUpdate>),
    /// No records could be recovered; a valid, non-error outcome
    Empty,
}

impl Extraction {
    /// The recovered records, in order of first appearance.
    pub fn records(&self) -> &[CharacterUpdate] {
        match self {
            Extraction::Structured(records) | Extraction::Heuristic(records) => records,
            Extraction::Empty => &[],
        }
    }

    /// Number of recovered records.
    pub fn len(&self) -> usize {
        self.records().len()
    }

    /// True if no records were recovered.
    pub fn is_empty(&self) -> bool {
        self.records().is_empty()
    }

    /// True if the records came from the low-precision fallback and should
    /// be treated as advisory rather than accurate attribution.
    pub fn is_advisory(&self) -> bool {
        matches!(self, Extraction::Heuristic(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn update(character: &str, body: &str) -> CharacterUpdate {
        CharacterUpdate {
            character: character.to_string(),
            update: body.to_string(),
        }
    }

    #[test]
    fn test_validate_rejects_empty_fields() {
        assert!(update("Alice", "said hello").validate().is_ok());
        assert!(update("", "said hello").validate().is_err());
        assert!(update("Alice", "  ").validate().is_err());
    }

    #[test]
    fn test_records_accessor() {
        let records = vec![update("Alice", "x")];
        assert_eq!(Extraction::Structured(records.clone()).records(), &records[..]);
        assert_eq!(Extraction::Heuristic(records.clone()).records(), &records[..]);
        assert!(Extraction::Empty.records().is_empty());
    }

    #[test]
    fn test_advisory_flag() {
        let records = vec![update("Alice", "x")];
        assert!(!Extraction::Structured(records.clone()).is_advisory());
        assert!(Extraction::Heuristic(records).is_advisory());
        assert!(!Extraction::Empty.is_advisory());
    }
}
