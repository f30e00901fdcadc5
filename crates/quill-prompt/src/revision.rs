//! Prompt for revising a single selected passage

use crate::{push_note, push_section};
use quill_domain::RevisionContext;

/// Builds the localized-revision prompt from a revision bundle and the
/// author's selected passage.
pub struct RevisionPrompt<'a> {
    context: &'a RevisionContext,
    selected_text: &'a str,
    directives: &'a str,
}

impl<'a> RevisionPrompt<'a> {
    /// Create a builder over the bundle and the passage to revise.
    /// The passage is caller-supplied, never read from the vault.
    pub fn new(context: &'a RevisionContext, selected_text: &'a str) -> Self {
        Self {
            context,
            selected_text,
            directives: "",
        }
    }

    /// The author's grievances and directives for this passage.
    pub fn directives(mut self, directives: &'a str) -> Self {
        self.directives = directives;
        self
    }

    /// Assemble the final prompt string.
    pub fn build(&self) -> String {
        let mut out = String::new();

        out.push_str("You are a line editor working on a specific passage that needs refinement.\n\n");

        push_section(&mut out, "SELECTED PASSAGE TO EDIT", self.selected_text);
        push_note(&mut out, "This is the passage the author wants revised.");

        push_section(&mut out, "AUTHOR GRIEVANCES + DIRECTIVES", self.directives);
        push_note(
            &mut out,
            "The author's specific concerns, style issues, or desired changes for this passage.",
        );

        push_section(&mut out, "IMMEDIATE CONTEXT — SLIDING WINDOW", self.context.sliding_window.as_text());
        push_note(&mut out, "Immediate narrative context around the selected passage.");

        push_section(&mut out, "STORY BIBLE + EXTRACTIONS — CANON CONSTRAINTS", self.context.story_bible.as_text());
        out.push_str(self.context.extractions.as_text());
        out.push_str("\n\n");
        push_note(
            &mut out,
            "Maintain consistency with world rules, character arcs, and established canon.",
        );

        push_section(&mut out, "CHARACTER NOTES — VOICE + CONTINUITY", self.context.character_notes.as_text());
        push_note(
            &mut out,
            "Use these to maintain character voice, relationships, and arc progression.",
        );

        push_section(&mut out, "RELATED EXCERPTS — STYLE ECHOES", self.context.canon_excerpts.as_text());
        push_note(&mut out, "Similar passages for tone and style reference.");

        out.push_str(TASK_BLOCK);

        out
    }
}

const TASK_BLOCK: &str = "\
YOUR TASK

Generate a SINGLE refined alternative to the selected passage that:
1. Addresses all author grievances and directives
2. Maintains continuity with the surrounding context
3. Preserves character voice and established canon
4. Matches the author's writing style
5. Flows seamlessly when inserted into the manuscript

Output ONLY the revised passage, ready to be pasted into the manuscript.";
