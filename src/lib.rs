//! Pluck - plucked-string tones and chords
//!
//! Synthesizes guitar-like notes with the Karplus-Strong string model or an
//! additive harmonic stack, mixes them into chords, and plays the result on
//! an audio device or records it to a WAV file.

pub mod config;
pub mod engine;
pub mod error;
pub mod music;
pub mod synth;

pub use config::PluckConfig;
pub use engine::{Mixer, Performer, Sink};
pub use error::{PluckError, PluckResult};
pub use music::{Chord, Note};
pub use synth::{Algorithm, SampleBuffer, Synth};
