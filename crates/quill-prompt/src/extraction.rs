//! Prompt instructing the model to extract character information
//!
//! The output format prescribed here is exactly what the extraction
//! parser's structured pass consumes; change them together.

use crate::{push_note, push_section};
use quill_domain::CharacterNoteSet;

/// Builds the character-extraction prompt for an analyzed passage.
pub struct ExtractionPrompt<'a> {
    selected_text: &'a str,
    notes: Option<&'a CharacterNoteSet>,
    story_bible: &'a str,
}

impl<'a> ExtractionPrompt<'a> {
    /// Create a builder for the passage to analyze.
    pub fn new(selected_text: &'a str) -> Self {
        Self {
            selected_text,
            notes: None,
            story_bible: "",
        }
    }

    /// Include the current character notes so the model updates rather
    /// than restates them.
    pub fn with_notes(mut self, notes: &'a CharacterNoteSet) -> Self {
        self.notes = Some(notes);
        self
    }

    /// Include the story bible for world context.
    pub fn with_story_bible(mut self, story_bible: &'a str) -> Self {
        self.story_bible = story_bible;
        self
    }

    /// Assemble the final prompt string.
    pub fn build(&self) -> String {
        let mut out = String::new();

        out.push_str("You are extracting character information from a narrative passage.\n\n");

        push_section(&mut out, "PASSAGE TO ANALYZE", self.selected_text);
        push_note(&mut out, "Extract character-relevant information from this passage.");

        push_section(&mut out, "EXISTING CHARACTER NOTES (IF ANY)", &self.format_notes());
        push_note(
            &mut out,
            "Current state of the character files. Update these with new information.",
        );

        push_section(&mut out, "STORY BIBLE — CONTEXT", self.story_bible);
        push_note(&mut out, "Use for world context and relationship structures.");

        out.push_str(TASK_BLOCK);

        out
    }

    /// Inline rendering of the note set for the prompt; no separator
    /// rules, one blank line between characters.
    fn format_notes(&self) -> String {
        let Some(notes) = self.notes else {
            return String::new();
        };
        let formatted: Vec<String> = notes
            .iter()
            .map(|note| format!("## {}\n{}", note.name, note.body))
            .collect();
        formatted.join("\n\n")
    }
}

const TASK_BLOCK: &str = r#"EXTRACTION TASK

Analyze the passage and extract:

1. **Character Identities**
   - Names mentioned
   - New aliases or titles
   - Role/function in scene

2. **Voice Evidence**
   - Syntax patterns
   - Speech cadence
   - Verbal tells or quirks

3. **New Traits/Revelations**
   - Physical descriptions
   - Personality traits
   - Skills or abilities shown
   - Emotional states

4. **Relationship Dynamics**
   - Interactions with other characters
   - Relationship changes or revelations
   - Power dynamics shifts

5. **Arc Progression**
   - Character development shown
   - Motivations revealed or changed
   - Goals or conflicts introduced

6. **Spoiler-Sensitive Information**
   - What must not be revealed yet
   - Foreshadowing present

Output in the following format for each character found:

## {CharacterName}

### {timestamp} - Update

**Voice Evidence:**
[quoted dialogue or narration]

**New Traits:**
- [trait]: [evidence]

**Relationships:**
- **{OtherCharacter}**: [relationship change and evidence]

**Arc Progression:**
[what changed in this passage]

**Spoiler Notes:**
[any sensitive information to track]

---

Each section will be appended to that character's note file."#;
