//! Two-tier parse of model extraction output

use quill_domain::{CharacterUpdate, Extraction};
use regex::Regex;
use std::collections::HashSet;
use std::sync::LazyLock;
use tracing::{debug, warn};

/// Maximal runs of capitalized words, used as candidate character names
/// when the model ignored the requested format.
static PROPER_NOUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[A-Z][a-z]+(?:\s+[A-Z][a-z]+)*\b").unwrap());

/// Candidate names longer than this many words are discarded.
const MAX_NAME_WORDS: usize = 3;

/// Parse model output into character-update records.
///
/// Total over its input: unparseable or empty text yields
/// [`Extraction::Empty`]. The heuristic tier runs only when the structured
/// tier produced zero records, never on partial success.
pub fn parse_extraction(text: &str) -> Extraction {
    let records = parse_structured(text);
    if !records.is_empty() {
        debug!("Structured parse recovered {} character updates", records.len());
        return Extraction::Structured(records);
    }

    let records = parse_heuristic(text);
    if records.is_empty() {
        Extraction::Empty
    } else {
        warn!(
            "Model output had no recognizable sections; proper-noun fallback guessed {} names",
            records.len()
        );
        Extraction::Heuristic(records)
    }
}

/// Structured pass: one record per `## <CharacterName>` section.
fn parse_structured(text: &str) -> Vec<CharacterUpdate> {
    let mut sections: Vec<(String, Vec<&str>)> = Vec::new();

    for line in text.lines() {
        if let Some(name) = section_heading(line) {
            sections.push((name.to_string(), Vec::new()));
        } else if let Some((_, body)) = sections.last_mut() {
            // Text before the first heading is ignored
            body.push(line);
        }
    }

    sections
        .into_iter()
        .filter_map(|(character, lines)| {
            if character.is_empty() {
                return None;
            }
            let update = section_body(&lines.join("\n"));
            if update.is_empty() {
                // Heading with nothing to report; dropped silently
                return None;
            }
            Some(CharacterUpdate { character, update })
        })
        .collect()
}

/// The character name if `line` is a level-2 heading, i.e. `##` followed
/// by whitespace. `###` lines are deeper headings, not section starts.
fn section_heading(line: &str) -> Option<&str> {
    let rest = line.strip_prefix("##")?;
    if !rest.starts_with(char::is_whitespace) {
        return None;
    }
    Some(rest.trim())
}

/// Trim a section and strip a single leading `### <timestamp> - Update`
/// line if present. The timestamp is not retained; only the note body
/// matters downstream.
fn section_body(section: &str) -> String {
    let trimmed = section.trim();
    let without_stamp = match trimmed.split_once('\n') {
        Some((first, rest)) if is_update_heading(first) => rest,
        // A section that is nothing but the timestamp line has no body
        None if is_update_heading(trimmed) => "",
        _ => trimmed,
    };
    without_stamp.trim().to_string()
}

fn is_update_heading(line: &str) -> bool {
    let Some(rest) = line.strip_prefix("###") else {
        return false;
    };
    rest.starts_with(char::is_whitespace) && rest.trim_end().ends_with("Update")
}

/// Heuristic pass: capitalized-word runs as candidate names.
///
/// Every candidate's update body is the entire raw input text. Coarse by
/// design; this tier exists to be better than returning nothing, not to
/// attribute accurately.
fn parse_heuristic(text: &str) -> Vec<CharacterUpdate> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut records = Vec::new();

    for candidate in PROPER_NOUN.find_iter(text) {
        let name = candidate.as_str();
        if name.split_whitespace().count() > MAX_NAME_WORDS {
            continue;
        }
        if !seen.insert(name) {
            continue;
        }
        records.push(CharacterUpdate {
            character: name.to_string(),
            update: text.to_string(),
        });
    }

    records
}
