//! Character-note block formatting

use quill_domain::CharacterNoteSet;

/// Separator between characters in the formatted block.
pub const NOTE_SEPARATOR: &str = "\n---\n\n";

/// Fixed placeholder rendered for an empty note set.
pub const NO_NOTES_PLACEHOLDER: &str = "[No character notes found]";

/// Fold a note set into a single text block for prompt inclusion.
///
/// Per character: a `## <name>` heading line, then the note body, entries
/// joined by [`NOTE_SEPARATOR`]. Deterministic given the same ordered set;
/// splitting the block back on the separator recovers the same
/// (name, body) pairs in order.
pub fn format_notes(notes: &CharacterNoteSet) -> String {
    if notes.is_empty() {
        return NO_NOTES_PLACEHOLDER.to_string();
    }

    let formatted: Vec<String> = notes
        .iter()
        .map(|note| format!("## {}\n{}\n", note.name, note.body))
        .collect();

    formatted.join(NOTE_SEPARATOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(pairs: &[(&str, &str)]) -> CharacterNoteSet {
        let mut notes = CharacterNoteSet::new();
        for (name, body) in pairs {
            notes.insert(*name, *body);
        }
        notes
    }

    #[test]
    fn test_empty_set_formats_to_placeholder() {
        assert_eq!(format_notes(&CharacterNoteSet::new()), NO_NOTES_PLACEHOLDER);
    }

    #[test]
    fn test_single_note_block() {
        let block = format_notes(&set(&[("Mirelle", "A smuggler with a debt.")]));
        assert_eq!(block, "## Mirelle\nA smuggler with a debt.\n");
    }

    #[test]
    fn test_format_is_deterministic() {
        let notes = set(&[("A", "one"), ("B", "two")]);
        assert_eq!(format_notes(&notes), format_notes(&notes));
    }

    #[test]
    fn test_round_trip_recovers_pairs_in_order() {
        let pairs = [
            ("Mirelle", "A smuggler with a debt."),
            ("Aldous", "A cartographer.\nKeeps maps of drowned cities."),
            ("Yutta", "Speaks only in questions."),
        ];
        let block = format_notes(&set(&pairs));

        let recovered: Vec<(String, String)> = block
            .split(NOTE_SEPARATOR)
            .map(|entry| {
                let (heading, body) = entry.split_once('\n').unwrap();
                (
                    heading.strip_prefix("## ").unwrap().to_string(),
                    body.trim_end_matches('\n').to_string(),
                )
            })
            .collect();

        let expected: Vec<(String, String)> = pairs
            .iter()
            .map(|(name, body)| (name.to_string(), body.to_string()))
            .collect();
        assert_eq!(recovered, expected);
    }
}
