//! Character notes read from the vault

/// A single character's note: the file-stem name and the note body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CharacterNote {
    /// Character name, derived from the note file's stem
    pub name: String,
    /// Full note body (or an inline diagnostic if the file was unreadable)
    pub body: String,
}

/// An ordered mapping from character name to note body.
///
/// Insertion order is directory enumeration order, which is not guaranteed
/// stable across platforms. Callers must not depend on ordering for
/// correctness, only for display.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CharacterNoteSet {
    notes: Vec<CharacterNote>,
}

impl CharacterNoteSet {
    /// Create an empty set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a note. Names are not deduplicated; the vault layout
    /// (one file per character) already guarantees uniqueness.
    pub fn insert(&mut self, name: impl Into<String>, body: impl Into<String>) {
        self.notes.push(CharacterNote {
            name: name.into(),
            body: body.into(),
        });
    }

    /// Look up a note body by character name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.notes
            .iter()
            .find(|note| note.name == name)
            .map(|note| note.body.as_str())
    }

    /// Iterate the notes in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &CharacterNote> {
        self.notes.iter()
    }

    /// Iterate the character names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.notes.iter().map(|note| note.name.as_str())
    }

    /// Number of notes in the set.
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// True if the set holds no notes.
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl FromIterator<(String, String)> for CharacterNoteSet {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        let mut set = CharacterNoteSet::new();
        for (name, body) in iter {
            set.insert(name, body);
        }
        set
    }
}
