//! Chords and chord progressions

use crate::error::{PluckError, PluckResult};

use super::Note;

/// A named, non-empty group of notes sounded together
#[derive(Debug, Clone, PartialEq)]
pub struct Chord {
    name: String,
    notes: Vec<Note>,
}

impl Chord {
    /// Create a chord from already-built notes
    pub fn new(name: &str, notes: Vec<Note>) -> PluckResult<Self> {
        if notes.is_empty() {
            return Err(PluckError::invalid(
                "notes",
                format!("chord '{}' has no notes", name),
            ));
        }

        Ok(Self {
            name: name.to_string(),
            notes,
        })
    }

    /// Create a chord from note names such as `["C3", "E4", "G4"]`
    pub fn parse<S: AsRef<str>>(name: &str, note_names: &[S]) -> PluckResult<Self> {
        let notes = note_names
            .iter()
            .map(|n| Note::parse(n.as_ref()))
            .collect::<PluckResult<Vec<_>>>()?;
        Self::new(name, notes)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    /// Number of notes in the chord
    pub fn len(&self) -> usize {
        self.notes.len()
    }

    /// Always false; kept for API symmetry with `len`
    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

/// The four-chord progression played by the demo: C, G, Am, F
pub fn default_progression() -> Vec<Chord> {
    [
        ("C major", ["C3", "E4", "G4"]),
        ("G major", ["G3", "B3", "D4"]),
        ("A minor", ["A3", "C3", "E4"]),
        ("F major", ["F3", "A3", "C3"]),
    ]
    .iter()
    .filter_map(|(name, notes)| Chord::parse(name, notes).ok())
    .collect()
}
