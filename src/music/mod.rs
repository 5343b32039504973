//! Musical building blocks: notes, chords, and the demo progression

mod chord;
mod note;

pub use chord::{default_progression, Chord};
pub use note::{midi_to_hz, Note, A4_HZ};
