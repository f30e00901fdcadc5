//! Prompt for continuing the active manuscript

use crate::{push_note, push_section};
use quill_domain::ContinuationContext;

/// Target word count used when the author does not specify one.
pub const DEFAULT_WORD_COUNT: u32 = 2000;

/// Builds the continuation prompt from a continuation bundle.
pub struct ContinuationPrompt<'a> {
    context: &'a ContinuationContext,
    directives: &'a str,
    word_count: u32,
}

impl<'a> ContinuationPrompt<'a> {
    /// Create a builder over the given bundle.
    pub fn new(context: &'a ContinuationContext) -> Self {
        Self {
            context,
            directives: "",
            word_count: DEFAULT_WORD_COUNT,
        }
    }

    /// Author directives: a summary of events to be written, directorial
    /// guidance, or both.
    pub fn directives(mut self, directives: &'a str) -> Self {
        self.directives = directives;
        self
    }

    /// Target word count for the generated prose.
    pub fn word_count(mut self, word_count: u32) -> Self {
        self.word_count = word_count;
        self
    }

    /// Assemble the final prompt string.
    pub fn build(&self) -> String {
        let mut out = String::new();

        out.push_str(
            "You are continuing a multi-book narrative. \
             Interpret the following file contents as directed:\n\n",
        );

        push_section(&mut out, "PRIOR CANON — RELATED EXCERPTS", self.context.canon_excerpts.as_text());
        push_note(
            &mut out,
            "Use these excerpts to maintain continuity, tone, and world consistency. \
             Do NOT contradict established canon.",
        );

        push_section(&mut out, "ACTIVE MANUSCRIPT (CONTINUE THIS)", self.context.manuscript.as_text());
        push_note(&mut out, "Continue this manuscript.");

        push_section(&mut out, "STORY BIBLE + EXTRACTIONS — WORLD + RULESET", self.context.story_bible.as_text());
        out.push_str(self.context.extractions.as_text());
        out.push_str("\n\n");
        push_note(
            &mut out,
            "These define the rules of the world, character arcs, faction details, \
             timelines, tone, themes, and relationship structure. \
             They override the active manuscript in cases of conflict.",
        );

        push_section(&mut out, "SLIDING WINDOW — IMMEDIATE CONTEXT", self.context.sliding_window.as_text());
        push_note(&mut out, "Continue directly from this.");

        push_section(&mut out, "AUTHOR DIRECTIVES", self.directives);

        push_section(&mut out, "TARGET WORD COUNT", &format!("{} words", self.word_count));

        out.push_str(
            "Continue writing the active manuscript using all provided context. \
             Maintain continuity and match the author's voice. \
             Output prose only: no commentary, no headings, no notes outside the narrative.",
        );

        out
    }
}
